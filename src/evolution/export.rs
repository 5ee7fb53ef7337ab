//! Tabular export of a finished search.
//!
//! One row per teacher or student and semester, with one cell per period.
//! Empty teacher periods are written as `BREAK`, student filler periods as
//! `EL`.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::fitness::PenaltyBreakdown;
use super::search::SearchResult;
use crate::schema::{PERIODS, Semester, Student, StudentSchedule, Teacher};

/// Marker for a period in which a teacher has no class.
pub const TEACHER_BREAK: &str = "BREAK";

/// Marker for a student period without a placed class.
pub const STUDENT_FILLER: &str = "EL";

/// One teacher's periods in one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRow {
    pub teacher: String,
    pub semester: Semester,
    pub periods: Vec<String>,
}

/// One student's periods in one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    pub student: String,
    pub gender: String,
    pub semester: Semester,
    pub periods: Vec<String>,
}

/// Exported timetable format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableExport {
    /// Total penalty of the exported timetable.
    pub fitness: u32,
    pub breakdown: PenaltyBreakdown,
    pub teachers: Vec<TeacherRow>,
    pub students: Vec<StudentRow>,
}

impl TimetableExport {
    /// Build the export for a timetable and the schedules it produced.
    ///
    /// Schedules are matched to students by position.
    pub fn new(
        chromosome: &Chromosome,
        breakdown: PenaltyBreakdown,
        teachers: &[Teacher],
        students: &[Student],
        schedules: &[StudentSchedule],
    ) -> Self {
        let teacher_rows = teachers
            .iter()
            .enumerate()
            .flat_map(|(idx, teacher)| {
                Semester::ALL.map(|semester| TeacherRow {
                    teacher: teacher.id.clone(),
                    semester,
                    periods: PERIODS
                        .iter()
                        .map(|&p| {
                            chromosome
                                .get(semester, p, idx)
                                .map_or(TEACHER_BREAK, |s| s.code())
                                .to_string()
                        })
                        .collect(),
                })
            })
            .collect();

        let student_rows = students
            .iter()
            .zip(schedules)
            .flat_map(|(student, schedule)| {
                Semester::ALL.map(|semester| StudentRow {
                    student: student.id.clone(),
                    gender: student.gender.code().to_string(),
                    semester,
                    periods: PERIODS
                        .iter()
                        .map(|&p| {
                            schedule
                                .get(semester, p)
                                .map_or(STUDENT_FILLER, |s| s.code())
                                .to_string()
                        })
                        .collect(),
                })
            })
            .collect();

        Self {
            fitness: breakdown.total(),
            breakdown,
            teachers: teacher_rows,
            students: student_rows,
        }
    }

    /// Build the export for the best timetable of a search.
    pub fn from_result(result: &SearchResult, teachers: &[Teacher], students: &[Student]) -> Self {
        Self::new(
            &result.best,
            result.breakdown,
            teachers,
            students,
            &result.schedules,
        )
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the export to a file as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
    }

    /// Load an export from file.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
