//! Timetable GA - School timetabling by genetic search.
//!
//! This crate searches for a school-wide assignment of subjects to teachers,
//! periods and semesters that balances teacher load and availability, subject
//! coverage, student placement and roster gender balance.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Subject catalog, school data, configuration and synthetic schools
//! - `evolution`: Chromosome, fitness, genetic operators and the search loop
//!
//! # Example
//!
//! ```rust,no_run
//! use timetable_ga::{
//!     schema::{Gender, Semester, Student, Subject, Teacher, Track, PE},
//!     evolution::run_search,
//! };
//!
//! let teachers = vec![
//!     Teacher::new("T1", [Subject::Math]).with_yearly_availability([1, 2, 3]),
//!     Teacher::new("T2", [PE]).with_yearly_availability([1, 2, 3]),
//! ];
//! let students = vec![Student::new("S1", Gender::Male, Track::GenEd, Semester::Fall)];
//!
//! let (best, schedules) = run_search(teachers, students, 20, 30, 3, 0.2, 0.1).unwrap();
//!
//! println!("Fall period 1 for T1: {:?}", best.get(Semester::Fall, 1, 0));
//! println!("S1 schedule: {:?}", schedules[0].periods);
//! ```

pub mod evolution;
pub mod schema;

// Re-export commonly used types
pub use evolution::{Chromosome, SearchEngine, SearchResult, TimetableExport};
pub use schema::{School, SearchConfig, Student, Teacher};
