//! Schema module - School data, catalog constants and search configuration.

mod catalog;
mod config;
mod school;
mod synthetic;

pub use catalog::*;
pub use config::*;
pub use school::*;
pub use synthetic::*;
