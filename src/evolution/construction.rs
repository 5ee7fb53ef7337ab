//! Randomized constructive initializer for timetable chromosomes.
//!
//! Builds a plausible timetable in four ordered passes:
//!
//! 1. Core coverage: enough sections of every core and advanced core subject
//!    to seat all demanding students, given to the qualified teacher with the
//!    most free periods.
//! 2. Full-year electives: one section per semester on a random qualified
//!    teacher.
//! 3. Load normalization: every teacher is topped up or trimmed to
//!    [`TEACHER_LOAD`] classes per semester.
//! 4. Period usage counters are updated after every change and drive period
//!    choice, spreading classes across the day.
//!
//! Infeasible sections are skipped and reported, never fatal.

use log::debug;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use crate::schema::{
    AL_CORE, CORE, FULL_YEAR, MAX_CAPACITY, PE, PERIOD_COUNT, PERIODS, Period, Semester, Student,
    Subject, TEACHER_LOAD, Teacher, core_subjects,
};

/// Why a section could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No teacher is qualified for the subject.
    NoQualifiedTeacher,
    /// The chosen teacher has no free available period left.
    NoFreePeriod,
}

/// A section the initializer could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSection {
    pub semester: Semester,
    pub subject: Subject,
    pub reason: SkipReason,
}

/// Outcome of building one chromosome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionReport {
    /// Core and full-year sections placed.
    pub sections_placed: usize,
    /// Sections skipped, with the reason.
    pub skipped: Vec<SkippedSection>,
    /// Periods left empty because a teacher ran out of available periods
    /// while being topped up to the load target.
    pub load_shortfall: usize,
}

impl ConstructionReport {
    /// Whether every section was placed and every teacher reached the load target.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.load_shortfall == 0
    }

    fn skip(&mut self, semester: Semester, subject: Subject, reason: SkipReason) {
        debug!("Skipping {} section in {}: {:?}", subject, semester, reason);
        self.skipped.push(SkippedSection {
            semester,
            subject,
            reason,
        });
    }
}

/// Per-semester count of classes in each period.
struct PeriodUsage([[usize; PERIOD_COUNT]; 2]);

impl PeriodUsage {
    fn new() -> Self {
        Self([[0; PERIOD_COUNT]; 2])
    }

    fn get(&self, semester: Semester, period: Period) -> usize {
        self.0[semester.index()][period as usize - 1]
    }

    fn increment(&mut self, semester: Semester, period: Period) {
        self.0[semester.index()][period as usize - 1] += 1;
    }

    fn decrement(&mut self, semester: Semester, period: Period) {
        let count = &mut self.0[semester.index()][period as usize - 1];
        *count = count.saturating_sub(1);
    }

    /// Least-used period among `periods`; earliest period wins ties.
    fn least_used(&self, semester: Semester, periods: &[Period]) -> Option<Period> {
        periods
            .iter()
            .copied()
            .min_by_key(|&p| self.get(semester, p))
    }
}

/// Free periods of a teacher within its availability, ascending.
fn free_periods(
    chromosome: &Chromosome,
    idx: usize,
    teacher: &Teacher,
    semester: Semester,
) -> Vec<Period> {
    teacher
        .available_periods(semester)
        .filter(|&p| !chromosome.is_filled(semester, p, idx))
        .collect()
}

impl Chromosome {
    /// Build a heuristically populated timetable.
    ///
    /// Never fails: sections that cannot be placed are listed in the
    /// returned [`ConstructionReport`] and left to the fitness function.
    pub fn random_feasible<R: Rng + ?Sized>(
        teachers: &[Teacher],
        students: &[Student],
        rng: &mut R,
    ) -> (Chromosome, ConstructionReport) {
        let mut chromosome = Chromosome::new(teachers);
        let mut usage = PeriodUsage::new();
        let mut report = ConstructionReport::default();

        assign_core_sections(&mut chromosome, &mut usage, &mut report, teachers, students);
        assign_full_year(&mut chromosome, &mut usage, &mut report, teachers, rng);
        normalize_load(&mut chromosome, &mut usage, &mut report, teachers, rng);

        (chromosome, report)
    }
}

/// Pass 1: enough sections of each core subject for every demanding student.
fn assign_core_sections(
    chromosome: &mut Chromosome,
    usage: &mut PeriodUsage,
    report: &mut ConstructionReport,
    teachers: &[Teacher],
    students: &[Student],
) {
    for semester in Semester::ALL {
        for subject in CORE.into_iter().chain(AL_CORE) {
            let demand = students
                .iter()
                .filter(|s| core_subjects(s.track).contains(&subject))
                .count();
            let sections = demand.div_ceil(MAX_CAPACITY);

            for _ in 0..sections {
                let mut qualified = teachers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.teaches(subject))
                    .peekable();
                if qualified.peek().is_none() {
                    report.skip(semester, subject, SkipReason::NoQualifiedTeacher);
                    continue;
                }

                // Most free periods; first teacher wins ties.
                let mut best: Option<(usize, Vec<Period>)> = None;
                for (idx, teacher) in qualified {
                    let free = free_periods(chromosome, idx, teacher, semester);
                    if best.as_ref().is_none_or(|(_, b)| free.len() > b.len()) {
                        best = Some((idx, free));
                    }
                }

                match best {
                    Some((idx, free)) if !free.is_empty() => {
                        if let Some(period) = usage.least_used(semester, &free) {
                            chromosome.set(semester, period, idx, Some(subject));
                            usage.increment(semester, period);
                            report.sections_placed += 1;
                        }
                    }
                    _ => report.skip(semester, subject, SkipReason::NoFreePeriod),
                }
            }
        }
    }
}

/// Pass 2: one section of each full-year elective per semester.
fn assign_full_year<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    usage: &mut PeriodUsage,
    report: &mut ConstructionReport,
    teachers: &[Teacher],
    rng: &mut R,
) {
    for semester in Semester::ALL {
        for subject in FULL_YEAR {
            let qualified: Vec<usize> = teachers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.teaches(subject))
                .map(|(idx, _)| idx)
                .collect();

            let Some(&idx) = qualified.choose(rng) else {
                report.skip(semester, subject, SkipReason::NoQualifiedTeacher);
                continue;
            };

            let free = free_periods(chromosome, idx, &teachers[idx], semester);
            match usage.least_used(semester, &free) {
                Some(period) => {
                    chromosome.set(semester, period, idx, Some(subject));
                    usage.increment(semester, period);
                    report.sections_placed += 1;
                }
                None => report.skip(semester, subject, SkipReason::NoFreePeriod),
            }
        }
    }
}

/// Pass 3: top up or trim every teacher to exactly the load target.
fn normalize_load<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    usage: &mut PeriodUsage,
    report: &mut ConstructionReport,
    teachers: &[Teacher],
    rng: &mut R,
) {
    for (idx, teacher) in teachers.iter().enumerate() {
        for semester in Semester::ALL {
            let assigned: Vec<Period> = PERIODS
                .into_iter()
                .filter(|&p| chromosome.is_filled(semester, p, idx))
                .collect();

            if assigned.len() < TEACHER_LOAD {
                let needed = TEACHER_LOAD - assigned.len();
                let mut free = free_periods(chromosome, idx, teacher, semester);
                free.sort_by_key(|&p| usage.get(semester, p));

                let mut filled = 0;
                for &period in free.iter().take(needed) {
                    let subject = if teacher.teaches(PE) {
                        Some(PE)
                    } else {
                        teacher.subjects.choose(rng).copied()
                    };
                    let Some(subject) = subject else {
                        break;
                    };
                    chromosome.set(semester, period, idx, Some(subject));
                    usage.increment(semester, period);
                    filled += 1;
                }
                report.load_shortfall += needed - filled;
            } else if assigned.len() > TEACHER_LOAD {
                let excess = assigned.len() - TEACHER_LOAD;
                for &period in assigned.choose_multiple(rng, excess) {
                    chromosome.set(semester, period, idx, None);
                    usage.decrement(semester, period);
                }
            }
        }
    }
}
