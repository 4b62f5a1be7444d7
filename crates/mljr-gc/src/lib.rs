//! mljr-gc: critical-property estimation with the Modified Lydersen-Joback-Reid
//! (mLJR) group-contribution method.
//!
//! Provides:
//! - Group parameter tables (ring and non-ring namespaces, with aliases)
//! - Chemical formula parsing and molecular weight
//! - Single-component correlations (Tb, Tc, Pc, Vc, acentric factor)
//! - Binary mixing rules
//! - Derived properties (density, surface tension)
//!
//! # Example
//!
//! ```
//! use mljr_gc::{GroupCount, correlate, lookup};
//!
//! let groups = vec![
//!     GroupCount::new(lookup("-CH3", false).unwrap(), 3).unwrap(),
//!     GroupCount::new(lookup("-CH2-", false).unwrap(), 2).unwrap(),
//!     GroupCount::new(lookup("alcohol", false).unwrap(), 1).unwrap(),
//!     GroupCount::new(lookup(">N-", false).unwrap(), 1).unwrap(),
//!     GroupCount::new(lookup("Chloro", false).unwrap(), 1).unwrap(),
//! ];
//! let choline_chloride = correlate(&groups, 139.62).unwrap();
//! println!("Tc = {:.2} K", choline_chloride.tc);
//! ```
//!
//! All tables are built once per process and are read-only afterwards, so every
//! function here is a pure function of its arguments.

pub mod correlate;
pub mod derived;
pub mod element;
pub mod error;
pub mod formula;
pub mod groups;
pub mod mixture;

// Re-exports for ergonomics
pub use correlate::{Coefficient, ComponentResult, GroupCount, GroupSums, correlate};
pub use derived::{density, surface_tension};
pub use element::Element;
pub use error::{FormulaError, GcError, GcResult};
pub use formula::{ElementCounts, Formula, parse_formula};
pub use groups::{Contributions, GroupKind, GroupRecord, GroupTable, lookup};
pub use mixture::{MixtureResult, MoleFractions, mix};
