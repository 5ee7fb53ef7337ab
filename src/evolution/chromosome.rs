//! Timetable chromosome: one subject (or nothing) per semester, period and teacher.
//!
//! Slots live in a flat vector laid out as `[semester][period][teacher]`, so
//! the key set is fixed at construction and operators can only rewrite
//! values.

use serde::{Deserialize, Serialize};

use crate::schema::{PERIOD_COUNT, PERIODS, Period, Semester, Subject, Teacher};

/// A complete candidate timetable.
///
/// Teachers are referenced by their index in the teacher slice the
/// chromosome was built for. `Clone` is a deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    teacher_count: usize,
    slots: Vec<Option<Subject>>,
}

impl Chromosome {
    /// Create an empty timetable for `teachers`.
    pub fn new(teachers: &[Teacher]) -> Self {
        Self::empty(teachers.len())
    }

    /// Create an empty timetable for `teacher_count` teachers.
    pub fn empty(teacher_count: usize) -> Self {
        Self {
            teacher_count,
            slots: vec![None; Semester::ALL.len() * PERIOD_COUNT * teacher_count],
        }
    }

    /// Number of teachers covered.
    #[inline]
    pub fn teacher_count(&self) -> usize {
        self.teacher_count
    }

    /// Total number of (semester, period, teacher) slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `period` is outside the school day or `teacher` is out of range.
    #[inline]
    fn index(&self, semester: Semester, period: Period, teacher: usize) -> usize {
        assert!(teacher < self.teacher_count, "teacher index out of range");
        let period_idx = (period as usize).wrapping_sub(1);
        assert!(period_idx < PERIOD_COUNT, "period out of range");
        (semester.index() * PERIOD_COUNT + period_idx) * self.teacher_count + teacher
    }

    /// Subject taught by `teacher` in a slot.
    #[inline]
    pub fn get(&self, semester: Semester, period: Period, teacher: usize) -> Option<Subject> {
        self.slots[self.index(semester, period, teacher)]
    }

    /// Overwrite a slot, returning the previous value.
    #[inline]
    pub fn set(
        &mut self,
        semester: Semester,
        period: Period,
        teacher: usize,
        subject: Option<Subject>,
    ) -> Option<Subject> {
        let idx = self.index(semester, period, teacher);
        std::mem::replace(&mut self.slots[idx], subject)
    }

    /// Whether a slot holds a class.
    #[inline]
    pub fn is_filled(&self, semester: Semester, period: Period, teacher: usize) -> bool {
        self.get(semester, period, teacher).is_some()
    }

    /// Swap every teacher's value at one (semester, period) locus with `other`.
    pub fn swap_locus(&mut self, other: &mut Chromosome, semester: Semester, period: Period) {
        debug_assert_eq!(self.teacher_count, other.teacher_count);
        if self.teacher_count == 0 {
            return;
        }
        let start = self.index(semester, period, 0);
        let end = start + self.teacher_count;
        self.slots[start..end].swap_with_slice(&mut other.slots[start..end]);
    }

    /// Subjects taught in one (semester, period), indexed by teacher.
    pub fn locus(&self, semester: Semester, period: Period) -> &[Option<Subject>] {
        if self.teacher_count == 0 {
            return &[];
        }
        let start = self.index(semester, period, 0);
        &self.slots[start..start + self.teacher_count]
    }

    /// Number of filled periods for a teacher in a semester.
    pub fn filled_count(&self, semester: Semester, teacher: usize) -> usize {
        PERIODS
            .iter()
            .filter(|&&p| self.is_filled(semester, p, teacher))
            .count()
    }

    /// Whether any teacher offers `subject` during `semester`.
    pub fn offers(&self, semester: Semester, subject: Subject) -> bool {
        PERIODS
            .iter()
            .any(|&p| self.locus(semester, p).contains(&Some(subject)))
    }

    /// Periods of `semester` in which `subject` is taught, one entry per teacher.
    pub fn sections(&self, semester: Semester, subject: Subject) -> Vec<Period> {
        PERIODS
            .iter()
            .flat_map(|&p| {
                self.locus(semester, p)
                    .iter()
                    .filter(move |slot| **slot == Some(subject))
                    .map(move |_| p)
            })
            .collect()
    }

    /// All keys in layout order.
    pub fn keys(&self) -> impl Iterator<Item = (Semester, Period, usize)> + '_ {
        let teachers = self.teacher_count;
        Semester::ALL.into_iter().flat_map(move |semester| {
            PERIODS
                .into_iter()
                .flat_map(move |period| (0..teachers).map(move |t| (semester, period, t)))
        })
    }

    /// All keys with their values, in layout order.
    pub fn iter(&self) -> impl Iterator<Item = ((Semester, Period, usize), Option<Subject>)> + '_ {
        self.keys().zip(self.slots.iter().copied())
    }
}
