//! Configuration types for timetable search.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::catalog::{PERIOD_COUNT, Subject, period_index};
use super::school::Teacher;

/// Top-level configuration for a timetable search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Population and generation settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Genetic operator settings.
    #[serde(default)]
    pub operators: OperatorConfig,
    /// Penalty weights.
    #[serde(default)]
    pub fitness: FitnessWeights,
    /// Evaluation settings.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    /// Synthetic school used when no school file is provided.
    #[serde(default)]
    pub synthetic: SyntheticConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            operators: OperatorConfig::default(),
            fitness: FitnessWeights::default(),
            evaluation: EvaluationConfig::default(),
            synthetic: SyntheticConfig::default(),
            random_seed: None,
        }
    }
}

/// Population and generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of candidates per generation.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Maximum number of generations.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Best candidates copied unchanged into the next generation.
    #[serde(default = "default_elite")]
    pub elite: usize,
    /// Fraction of each generation filled with fresh random candidates.
    #[serde(default = "default_immigrant_rate")]
    pub immigrant_rate: f64,
    /// Stop after this many generations without improvement.
    #[serde(default = "default_stagnation_limit")]
    pub stagnation_limit: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            max_generations: default_max_generations(),
            elite: default_elite(),
            immigrant_rate: default_immigrant_rate(),
            stagnation_limit: default_stagnation_limit(),
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_max_generations() -> usize {
    100
}
fn default_elite() -> usize {
    5
}
fn default_immigrant_rate() -> f64 {
    0.1
}
fn default_stagnation_limit() -> usize {
    10
}

/// Genetic operator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Per-slot mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Number of contenders per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
        }
    }
}

fn default_mutation_rate() -> f64 {
    0.2
}
fn default_tournament_size() -> usize {
    3
}

/// Weight of each penalty category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Per period of deviation from the teacher load target.
    #[serde(default = "default_load_weight")]
    pub load: u32,
    /// Per class scheduled outside teacher availability.
    #[serde(default = "default_availability_weight")]
    pub availability: u32,
    /// Per mandatory subject missing from a semester.
    #[serde(default = "default_coverage_weight")]
    pub coverage: u32,
    /// Per core subject a student could not be placed in.
    #[serde(default = "default_student_core_weight")]
    pub student_core: u32,
    /// Per student without a PE placement.
    #[serde(default = "default_student_pe_weight")]
    pub student_pe: u32,
    /// Per unit of roster gender imbalance beyond one.
    #[serde(default = "default_gender_balance_weight")]
    pub gender_balance: u32,
}

impl FitnessWeights {
    /// Largest accepted weight for any category.
    pub const MAX: u32 = 1_000_000;

    /// Category names paired with their weights.
    pub fn named(&self) -> [(&'static str, u32); 6] {
        [
            ("load", self.load),
            ("availability", self.availability),
            ("coverage", self.coverage),
            ("student_core", self.student_core),
            ("student_pe", self.student_pe),
            ("gender_balance", self.gender_balance),
        ]
    }
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            load: default_load_weight(),
            availability: default_availability_weight(),
            coverage: default_coverage_weight(),
            student_core: default_student_core_weight(),
            student_pe: default_student_pe_weight(),
            gender_balance: default_gender_balance_weight(),
        }
    }
}

fn default_load_weight() -> u32 {
    20
}
fn default_availability_weight() -> u32 {
    50
}
fn default_coverage_weight() -> u32 {
    100
}
fn default_student_core_weight() -> u32 {
    50
}
fn default_student_pe_weight() -> u32 {
    50
}
fn default_gender_balance_weight() -> u32 {
    10
}

/// Evaluation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Evaluate candidates across the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

/// Size of a generated mock school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    #[serde(default = "default_teacher_count")]
    pub teachers: usize,
    #[serde(default = "default_student_count")]
    pub students: usize,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            teachers: default_teacher_count(),
            students: default_student_count(),
        }
    }
}

fn default_teacher_count() -> usize {
    20
}
fn default_student_count() -> usize {
    250
}

// ============================================================================
// Validation
// ============================================================================

/// Configuration and input validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Population size {population} is smaller than tournament size {tournament}")]
    PopulationBelowTournament { population: usize, tournament: usize },
    #[error("Tournament size must be non-zero")]
    InvalidTournamentSize,
    #[error("Elite count {elite} must be in 1..{population}")]
    InvalidElite { elite: usize, population: usize },
    #[error("Maximum generations must be non-zero")]
    InvalidGenerations,
    #[error("Stagnation limit must be non-zero")]
    InvalidStagnationLimit,
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("{name} weight {value} exceeds {}", FitnessWeights::MAX)]
    WeightTooLarge { name: &'static str, value: u32 },
    #[error("No teachers provided")]
    NoTeachers,
    #[error("Duplicate teacher ID: {0}")]
    DuplicateTeacher(String),
    #[error("Teacher {teacher} lists period {period} outside 1..={}", PERIOD_COUNT)]
    InvalidPeriod { teacher: String, period: u8 },
    #[error("Teacher {teacher} lists subject {subject} more than once")]
    DuplicateSubject { teacher: String, subject: Subject },
}

impl SearchConfig {
    /// Validate search parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let population = &self.population;
        let operators = &self.operators;

        if population.size < 2 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if operators.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if population.size < operators.tournament_size {
            return Err(ConfigError::PopulationBelowTournament {
                population: population.size,
                tournament: operators.tournament_size,
            });
        }
        if population.elite == 0 || population.elite >= population.size {
            return Err(ConfigError::InvalidElite {
                elite: population.elite,
                population: population.size,
            });
        }
        if population.max_generations == 0 {
            return Err(ConfigError::InvalidGenerations);
        }
        if population.stagnation_limit == 0 {
            return Err(ConfigError::InvalidStagnationLimit);
        }

        check_rate("immigrant_rate", population.immigrant_rate)?;
        check_rate("mutation_rate", operators.mutation_rate)?;

        if let Some((name, value)) = self
            .fitness
            .named()
            .into_iter()
            .find(|&(_, value)| value > FitnessWeights::MAX)
        {
            return Err(ConfigError::WeightTooLarge { name, value });
        }

        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

/// Validate the teacher list consumed by the search.
pub fn validate_teachers(teachers: &[Teacher]) -> Result<(), ConfigError> {
    if teachers.is_empty() {
        return Err(ConfigError::NoTeachers);
    }

    let mut ids = HashSet::new();
    for teacher in teachers {
        if !ids.insert(teacher.id.as_str()) {
            return Err(ConfigError::DuplicateTeacher(teacher.id.clone()));
        }
        let mut subjects = HashSet::new();
        if let Some(&subject) = teacher.subjects.iter().find(|&&s| !subjects.insert(s)) {
            return Err(ConfigError::DuplicateSubject {
                teacher: teacher.id.clone(),
                subject,
            });
        }
        for periods in teacher.availability.values() {
            if let Some(&period) = periods.iter().find(|&&p| period_index(p).is_none()) {
                return Err(ConfigError::InvalidPeriod {
                    teacher: teacher.id.clone(),
                    period,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Semester, Subject};

    #[test]
    fn test_default_config_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_elite_must_be_below_population() {
        let mut config = SearchConfig::default();
        config.population.size = 5;
        config.population.elite = 5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidElite {
                elite: 5,
                population: 5
            })
        );

        config.population.elite = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_population_must_cover_tournament() {
        let mut config = SearchConfig::default();
        config.population.size = 2;
        config.population.elite = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PopulationBelowTournament { .. })
        ));
    }

    #[test]
    fn test_rates_are_bounded() {
        let mut config = SearchConfig::default();
        config.operators.mutation_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate {
                name: "mutation_rate",
                ..
            })
        ));

        let mut config = SearchConfig::default();
        config.population.immigrant_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_teachers() {
        assert_eq!(validate_teachers(&[]), Err(ConfigError::NoTeachers));

        let t1 = Teacher::new("T1", [Subject::Math]).with_yearly_availability([1, 2]);
        assert!(validate_teachers(std::slice::from_ref(&t1)).is_ok());
        assert_eq!(
            validate_teachers(&[t1.clone(), t1.clone()]),
            Err(ConfigError::DuplicateTeacher("T1".into()))
        );

        let bad = Teacher::new("T2", [Subject::Math]).with_availability(Semester::Spring, [0, 8]);
        assert!(matches!(
            validate_teachers(&[t1, bad]),
            Err(ConfigError::InvalidPeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_weights_are_bounded() {
        let mut config = SearchConfig::default();
        config.fitness.coverage = FitnessWeights::MAX;
        assert!(config.validate().is_ok());

        config.fitness.gender_balance = u32::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigError::WeightTooLarge {
                name: "gender_balance",
                value: u32::MAX
            })
        );
    }

    #[test]
    fn test_duplicate_subjects_rejected() {
        let json = r#"{"id": "T1", "subjects": ["math", "PE", "math"], "availability": {}}"#;
        let teacher: Teacher = serde_json::from_str(json).unwrap();
        assert_eq!(teacher.subjects.len(), 3);

        assert_eq!(
            validate_teachers(&[teacher]),
            Err(ConfigError::DuplicateSubject {
                teacher: "T1".into(),
                subject: Subject::Math
            })
        );

        let deduped = Teacher::new("T1", [Subject::Math, Subject::Math]);
        assert!(validate_teachers(&[deduped]).is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"population": {"size": 20}, "random_seed": 7}"#;
        let config: SearchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.population.size, 20);
        assert_eq!(config.population.elite, 5);
        assert_eq!(config.population.stagnation_limit, 10);
        assert_eq!(config.operators.tournament_size, 3);
        assert_eq!(config.fitness, FitnessWeights::default());
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.population.size, config.population.size);
    }
}
