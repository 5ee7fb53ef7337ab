//! Evolutionary search for school timetables.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Chromosome** (`chromosome`): Fixed-shape teacher/period/semester timetable
//! - **Construction** (`construction`): Randomized feasible initial timetables
//! - **Fitness** (`fitness`): Weighted penalties and student placement
//! - **Operators** (`operators`): Tournament selection, crossover, and mutation
//! - **Search** (`search`): Generational loop with elitism and random immigrants
//! - **Export** (`export`): Per-teacher and per-student timetable rows
//!
//! # Example
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use timetable_ga::schema::{SearchConfig, generate_school};
//! use timetable_ga::evolution::{SearchEngine, TimetableExport};
//!
//! let school = generate_school(20, 250, &mut StdRng::seed_from_u64(7));
//! let mut engine =
//!     SearchEngine::new(SearchConfig::default(), school.teachers, school.students).unwrap();
//! let result = engine
//!     .run_with_callback(|progress| {
//!         println!("Generation {}: best = {:?}", progress.generation, progress.best_fitness);
//!     })
//!     .unwrap();
//!
//! println!("Best fitness: {}", result.fitness());
//! let export = TimetableExport::from_result(&result, engine.teachers(), engine.students());
//! export.save("timetable.json").unwrap();
//! ```
//!
//! # Penalties
//!
//! - `load`: Teacher does not teach exactly five periods in a semester
//! - `availability`: Class scheduled outside teacher availability
//! - `coverage`: Mandatory subject missing from a semester
//! - `student_core`: Student could not be seated in a core subject
//! - `student_pe`: Student could not be seated in PE
//! - `gender_balance`: Roster with more than one student of imbalance

mod chromosome;
mod construction;
mod export;
mod fitness;
mod operators;
mod search;

pub use chromosome::Chromosome;
pub use construction::{ConstructionReport, SkipReason, SkippedSection};
pub use export::{STUDENT_FILLER, StudentRow, TEACHER_BREAK, TeacherRow, TimetableExport};
pub use fitness::{Evaluation, FitnessEvaluator, PenaltyBreakdown};
pub use operators::{crossover, mutate, tournament_select};
pub use search::{
    ProgressCallback, SearchEngine, SearchError, SearchHistory, SearchPhase, SearchProgress,
    SearchResult, SearchStats, StopReason, run_search,
};
