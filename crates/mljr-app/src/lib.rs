//! Application service layer for mLJR.
//!
//! Sits between the command-line front end and the library crates: it resolves
//! a parsed input file into group counts and molecular weights, runs the
//! correlations, chooses which derived properties to evaluate and formats the
//! report.

pub mod calc_service;
pub mod catalog;
pub mod error;
pub mod report;

// Re-export key types for convenience
pub use calc_service::{
    CalcOutcome, ConditionsOverride, DerivedProperties, SurfaceTension, calc_file,
    resolve_groups, resolve_molar_mass, run,
};
pub use catalog::{group_catalog_text, usage_examples_text};
pub use error::{AppError, AppResult};
pub use report::{SiValues, append_report, render_json, render_text};
