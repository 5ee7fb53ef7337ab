//! School population: teachers, students and student schedules.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::catalog::{PERIOD_COUNT, Period, Semester, Subject, Track, period_index};

/// A teacher with qualifications and per-semester availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Subjects this teacher is qualified to teach.
    pub subjects: Vec<Subject>,
    /// Periods the teacher can teach, per semester.
    #[serde(default)]
    pub availability: BTreeMap<Semester, BTreeSet<Period>>,
}

impl Teacher {
    /// Create a teacher with no availability.
    pub fn new(id: impl Into<String>, subjects: impl IntoIterator<Item = Subject>) -> Self {
        let mut seen = HashSet::new();
        Self {
            id: id.into(),
            subjects: subjects.into_iter().filter(|s| seen.insert(*s)).collect(),
            availability: BTreeMap::new(),
        }
    }

    /// Set the available periods for one semester.
    pub fn with_availability(
        mut self,
        semester: Semester,
        periods: impl IntoIterator<Item = Period>,
    ) -> Self {
        self.availability
            .insert(semester, periods.into_iter().collect());
        self
    }

    /// Set the same available periods for every semester.
    pub fn with_yearly_availability(self, periods: impl IntoIterator<Item = Period>) -> Self {
        let periods: BTreeSet<Period> = periods.into_iter().collect();
        Semester::ALL.into_iter().fold(self, |teacher, semester| {
            teacher.with_availability(semester, periods.iter().copied())
        })
    }

    /// Whether the teacher is qualified for `subject`.
    #[inline]
    pub fn teaches(&self, subject: Subject) -> bool {
        self.subjects.contains(&subject)
    }

    /// Whether the teacher can teach in `period` of `semester`.
    #[inline]
    pub fn is_available(&self, semester: Semester, period: Period) -> bool {
        self.availability
            .get(&semester)
            .is_some_and(|periods| periods.contains(&period))
    }

    /// Available periods in ascending order.
    pub fn available_periods(&self, semester: Semester) -> impl Iterator<Item = Period> + '_ {
        self.availability
            .get(&semester)
            .into_iter()
            .flat_map(|periods| periods.iter().copied())
    }
}

/// Binary gender used for roster balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// A student with course requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    pub gender: Gender,
    pub track: Track,
    /// Ranked elective requests.
    #[serde(default)]
    pub requests: Vec<Subject>,
    /// Fallback electives, tried after all requests.
    #[serde(default)]
    pub alternates: Vec<Subject>,
    /// Semester in which the student takes PE.
    pub pe_semester: Semester,
}

impl Student {
    /// Create a student without elective requests.
    pub fn new(id: impl Into<String>, gender: Gender, track: Track, pe_semester: Semester) -> Self {
        Self {
            id: id.into(),
            gender,
            track,
            requests: Vec::new(),
            alternates: Vec::new(),
            pe_semester,
        }
    }

    /// Set ranked elective requests.
    pub fn with_requests(mut self, requests: impl IntoIterator<Item = Subject>) -> Self {
        self.requests = requests.into_iter().collect();
        self
    }

    /// Set alternates.
    pub fn with_alternates(mut self, alternates: impl IntoIterator<Item = Subject>) -> Self {
        self.alternates = alternates.into_iter().collect();
        self
    }

    /// Requests followed by alternates, in preference order.
    pub fn preferences(&self) -> impl Iterator<Item = Subject> + '_ {
        self.requests.iter().chain(&self.alternates).copied()
    }
}

/// Placement of one student produced by a fitness evaluation.
///
/// `None` in a period means the student has a filler period (no class).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSchedule {
    pub student_id: String,
    pub periods: [[Option<Subject>; PERIOD_COUNT]; 2],
}

impl StudentSchedule {
    /// Empty schedule for a student.
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            periods: [[None; PERIOD_COUNT]; 2],
        }
    }

    /// Subject taken in a period, if any.
    pub fn get(&self, semester: Semester, period: Period) -> Option<Subject> {
        period_index(period).and_then(|idx| self.periods[semester.index()][idx])
    }

    /// Number of periods in `semester` spent on `subject`.
    pub fn count(&self, semester: Semester, subject: Subject) -> usize {
        self.periods[semester.index()]
            .iter()
            .filter(|slot| **slot == Some(subject))
            .count()
    }

    /// Whether the student takes `subject` at any point in `semester`.
    pub fn takes(&self, semester: Semester, subject: Subject) -> bool {
        self.count(semester, subject) > 0
    }
}

/// Teachers and students of one school.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct School {
    pub teachers: Vec<Teacher>,
    pub students: Vec<Student>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::catalog::PE;

    #[test]
    fn test_teacher_builder() {
        let teacher = Teacher::new("T1", [Subject::Math, Subject::Math, PE])
            .with_availability(Semester::Fall, [1, 2, 3])
            .with_availability(Semester::Spring, [4]);

        assert_eq!(teacher.subjects, vec![Subject::Math, PE]);
        assert!(teacher.teaches(PE));
        assert!(!teacher.teaches(Subject::A));
        assert!(teacher.is_available(Semester::Fall, 2));
        assert!(!teacher.is_available(Semester::Fall, 4));
        assert_eq!(
            teacher.available_periods(Semester::Spring).collect::<Vec<_>>(),
            vec![4]
        );
    }

    #[test]
    fn test_teacher_without_semester_is_unavailable() {
        let teacher = Teacher::new("T1", [Subject::Math]).with_availability(Semester::Fall, [1]);
        assert!(!teacher.is_available(Semester::Spring, 1));
        assert_eq!(teacher.available_periods(Semester::Spring).count(), 0);
    }

    #[test]
    fn test_student_preferences_order() {
        let student = Student::new("S1", Gender::Female, Track::AL, Semester::Spring)
            .with_requests([Subject::X, Subject::A])
            .with_alternates([Subject::B]);
        let prefs: Vec<Subject> = student.preferences().collect();
        assert_eq!(prefs, vec![Subject::X, Subject::A, Subject::B]);
    }

    #[test]
    fn test_school_deserialization() {
        let json = r#"{
            "teachers": [
                {"id": "T1", "subjects": ["math", "PE"], "availability": {"Fall": [1, 2], "Spring": [3]}}
            ],
            "students": [
                {"id": "S1", "gender": "M", "track": "GenEd", "requests": ["X"], "pe_semester": "Fall"}
            ]
        }"#;
        let school: School = serde_json::from_str(json).unwrap();
        assert_eq!(school.teachers[0].subjects, vec![Subject::Math, PE]);
        assert!(school.teachers[0].is_available(Semester::Spring, 3));
        assert_eq!(school.students[0].gender, Gender::Male);
        assert!(school.students[0].alternates.is_empty());
    }

    #[test]
    fn test_student_schedule_queries() {
        let mut schedule = StudentSchedule::new("S1");
        schedule.periods[0][0] = Some(Subject::Math);
        schedule.periods[0][3] = Some(Subject::Math);

        assert_eq!(schedule.get(Semester::Fall, 1), Some(Subject::Math));
        assert_eq!(schedule.get(Semester::Fall, 2), None);
        assert_eq!(schedule.get(Semester::Fall, 9), None);
        assert_eq!(schedule.count(Semester::Fall, Subject::Math), 2);
        assert!(!schedule.takes(Semester::Spring, Subject::Math));
    }
}
