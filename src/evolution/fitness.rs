//! Fitness evaluation for timetable chromosomes.
//!
//! A chromosome is scored by summing six weighted penalty categories. Four
//! come straight from the timetable (teacher load, availability, subject
//! coverage) and three require simulating where every student would sit
//! (core placement, PE placement, roster gender balance).
//!
//! Student placement visits candidate sections in a shuffled order drawn
//! from the caller's rng, so two evaluations of the same chromosome agree
//! only when they are given identically seeded generators.

use log::debug;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use crate::schema::{
    FitnessWeights, Gender, MAX_CAPACITY, PE, PERIOD_COUNT, PERIODS, Period, SUBJECT_COUNT,
    Semester, Student, StudentSchedule, Subject, TEACHER_LOAD, Teacher, core_subjects,
    mandatory_subjects,
};

/// Penalty totals per category. Lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    pub load: u32,
    pub availability: u32,
    pub coverage: u32,
    pub student_core: u32,
    pub student_pe: u32,
    pub gender_balance: u32,
}

impl PenaltyBreakdown {
    /// Sum of all categories, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        [
            self.availability,
            self.coverage,
            self.student_core,
            self.student_pe,
            self.gender_balance,
        ]
        .into_iter()
        .fold(self.load, u32::saturating_add)
    }
}

/// Score of a chromosome together with the student placements behind it.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub breakdown: PenaltyBreakdown,
    /// One schedule per student, in input order.
    pub schedules: Vec<StudentSchedule>,
}

impl Evaluation {
    /// Total penalty.
    pub fn fitness(&self) -> u32 {
        self.breakdown.total()
    }
}

/// Gender counts of one (semester, period, subject) roster.
#[derive(Debug, Clone, Copy, Default)]
struct Roster {
    male: u32,
    female: u32,
}

impl Roster {
    fn len(&self) -> usize {
        (self.male + self.female) as usize
    }

    fn has_room(&self) -> bool {
        self.len() < MAX_CAPACITY
    }

    fn add(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
        }
    }

    fn imbalance(&self) -> u32 {
        self.male.abs_diff(self.female)
    }
}

/// Rosters and section lookups for one evaluation.
struct Placement {
    rosters: Vec<Roster>,
    /// Periods of each (semester, subject) section, one entry per teacher.
    sections: Vec<Vec<Period>>,
    /// Whether each (semester, period, subject) is taught by anyone.
    offered: Vec<bool>,
    /// Reusable buffer for shuffled candidates.
    scratch: Vec<Period>,
}

impl Placement {
    fn new(chromosome: &Chromosome) -> Self {
        let slots = Semester::ALL.len() * PERIOD_COUNT * SUBJECT_COUNT;
        let mut sections = vec![Vec::new(); Semester::ALL.len() * SUBJECT_COUNT];
        let mut offered = vec![false; slots];

        for ((semester, period, _), value) in chromosome.iter() {
            if let Some(subject) = value {
                sections[section_index(semester, subject)].push(period);
                offered[roster_index(semester, period, subject)] = true;
            }
        }

        Self {
            rosters: vec![Roster::default(); slots],
            sections,
            offered,
            scratch: Vec::new(),
        }
    }

    fn roster(&mut self, semester: Semester, period: Period, subject: Subject) -> &mut Roster {
        &mut self.rosters[roster_index(semester, period, subject)]
    }

    /// Seat a student in a randomly ordered section of `subject` with a free
    /// period and roster room.
    fn place_in_any_section<R: Rng + ?Sized>(
        &mut self,
        semester: Semester,
        subject: Subject,
        gender: Gender,
        day: &mut [Option<Subject>; PERIOD_COUNT],
        rng: &mut R,
    ) -> bool {
        let mut candidates = std::mem::take(&mut self.scratch);
        candidates.clear();
        candidates.extend_from_slice(&self.sections[section_index(semester, subject)]);
        candidates.shuffle(rng);

        let mut placed = false;
        for &period in &candidates {
            let idx = period as usize - 1;
            if day[idx].is_none() && self.roster(semester, period, subject).has_room() {
                self.roster(semester, period, subject).add(gender);
                day[idx] = Some(subject);
                placed = true;
                break;
            }
        }

        self.scratch = candidates;
        placed
    }

    /// Seat a student in `subject` at exactly `period`, if offered with room.
    fn place_at(
        &mut self,
        semester: Semester,
        period: Period,
        subject: Subject,
        gender: Gender,
    ) -> bool {
        let idx = roster_index(semester, period, subject);
        if self.offered[idx] && self.rosters[idx].has_room() {
            self.rosters[idx].add(gender);
            true
        } else {
            false
        }
    }
}

#[inline]
fn section_index(semester: Semester, subject: Subject) -> usize {
    semester.index() * SUBJECT_COUNT + subject.index()
}

#[inline]
fn roster_index(semester: Semester, period: Period, subject: Subject) -> usize {
    (semester.index() * PERIOD_COUNT + period as usize - 1) * SUBJECT_COUNT + subject.index()
}

/// Scores chromosomes against the school's constraints.
#[derive(Debug, Clone, Default)]
pub struct FitnessEvaluator {
    weights: FitnessWeights,
}

impl FitnessEvaluator {
    /// Create an evaluator with the given penalty weights.
    pub fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    /// Score a chromosome without keeping student placements.
    pub fn score<R: Rng + ?Sized>(
        &self,
        chromosome: &Chromosome,
        teachers: &[Teacher],
        students: &[Student],
        rng: &mut R,
    ) -> PenaltyBreakdown {
        self.run(chromosome, teachers, students, rng, None)
    }

    /// Score a chromosome and materialize every student's schedule.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        chromosome: &Chromosome,
        teachers: &[Teacher],
        students: &[Student],
        rng: &mut R,
    ) -> Evaluation {
        let mut schedules = Vec::with_capacity(students.len());
        let breakdown = self.run(chromosome, teachers, students, rng, Some(&mut schedules));
        Evaluation {
            breakdown,
            schedules,
        }
    }

    fn run<R: Rng + ?Sized>(
        &self,
        chromosome: &Chromosome,
        teachers: &[Teacher],
        students: &[Student],
        rng: &mut R,
        mut schedules: Option<&mut Vec<StudentSchedule>>,
    ) -> PenaltyBreakdown {
        debug_assert_eq!(chromosome.teacher_count(), teachers.len());

        let (load, availability) = self.teacher_penalties(chromosome, teachers);
        let mut breakdown = PenaltyBreakdown {
            load,
            availability,
            coverage: self.coverage_penalty(chromosome),
            ..Default::default()
        };

        let mut placement = Placement::new(chromosome);
        for student in students {
            let schedule = self.place_student(student, &mut placement, &mut breakdown, rng);
            if let Some(out) = schedules.as_mut() {
                out.push(schedule);
            }
        }

        breakdown.gender_balance = placement
            .rosters
            .iter()
            .filter(|r| r.imbalance() > 1)
            .map(|r| (r.imbalance() - 1).saturating_mul(self.weights.gender_balance))
            .fold(0, u32::saturating_add);

        debug!(
            "Fitness breakdown: {:?} -> total {}",
            breakdown,
            breakdown.total()
        );
        breakdown
    }

    /// Load deviation and out-of-availability classes.
    fn teacher_penalties(&self, chromosome: &Chromosome, teachers: &[Teacher]) -> (u32, u32) {
        let mut load = 0u32;
        let mut availability = 0u32;

        for (idx, teacher) in teachers.iter().enumerate() {
            for semester in Semester::ALL {
                let mut filled = 0usize;
                for period in PERIODS {
                    if chromosome.is_filled(semester, period, idx) {
                        filled += 1;
                        if !teacher.is_available(semester, period) {
                            availability = availability.saturating_add(self.weights.availability);
                        }
                    }
                }
                let deviation = filled.abs_diff(TEACHER_LOAD) as u32;
                load = load.saturating_add(deviation.saturating_mul(self.weights.load));
            }
        }

        (load, availability)
    }

    /// Mandatory subjects missing from a semester.
    fn coverage_penalty(&self, chromosome: &Chromosome) -> u32 {
        (mandatory_subjects()
            .flat_map(|subject| Semester::ALL.map(|semester| (semester, subject)))
            .filter(|&(semester, subject)| !chromosome.offers(semester, subject))
            .count() as u32)
            .saturating_mul(self.weights.coverage)
    }

    /// Simulate one student's placement: cores, then PE, then electives.
    fn place_student<R: Rng + ?Sized>(
        &self,
        student: &Student,
        placement: &mut Placement,
        breakdown: &mut PenaltyBreakdown,
        rng: &mut R,
    ) -> StudentSchedule {
        let mut schedule = StudentSchedule::new(student.id.clone());

        for semester in Semester::ALL {
            let day = &mut schedule.periods[semester.index()];

            for &core in core_subjects(student.track) {
                if !placement.place_in_any_section(semester, core, student.gender, day, rng) {
                    breakdown.student_core =
                        breakdown.student_core.saturating_add(self.weights.student_core);
                }
            }

            if semester == student.pe_semester
                && !day.contains(&Some(PE))
                && !placement.place_in_any_section(semester, PE, student.gender, day, rng)
            {
                breakdown.student_pe = breakdown.student_pe.saturating_add(self.weights.student_pe);
            }

            for period in PERIODS {
                let idx = period as usize - 1;
                if day[idx].is_some() {
                    continue;
                }
                day[idx] = student
                    .preferences()
                    .find(|&choice| placement.place_at(semester, period, choice, student.gender));
            }
        }

        schedule
    }
}
