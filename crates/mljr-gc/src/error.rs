//! Group-contribution errors.

use crate::correlate::Coefficient;
use crate::groups::GroupKind;
use mljr_core::CoreError;
use thiserror::Error;

/// Result type for group-contribution operations.
pub type GcResult<T> = Result<T, GcError>;

/// Reasons a chemical formula string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("empty formula")]
    Empty,

    #[error("invalid character '{ch}' in '{token}'")]
    InvalidCharacter { token: String, ch: char },

    /// A count can never open a formula.
    #[error("formula must start with an element, found '{count}'")]
    LeadingCount { count: String },

    #[error("adjacent counts are not allowed, found '{count}'")]
    AdjacentCounts { count: String },

    #[error("element '{symbol}' is not defined in the periodic table")]
    UnknownElement { symbol: String },

    #[error("count '{count}' is too large")]
    CountOverflow { count: String },
}

/// Errors that can occur during a group-contribution calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcError {
    /// Malformed chemical formula.
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),

    /// Symbol not found in the requested namespace.
    #[error("Unknown {kind} group: {symbol}")]
    UnknownGroup { symbol: String, kind: GroupKind },

    /// A group occurrence count below one.
    #[error("Invalid count {count} for group {symbol}")]
    InvalidGroupCount { symbol: &'static str, count: u32 },

    /// A correlation needs a coefficient the group does not define.
    #[error("Group {group} has no {field} contribution")]
    MissingCoefficient {
        group: &'static str,
        field: Coefficient,
    },

    /// Arithmetic precondition violated inside a correlation.
    #[error("Correlation failed: {what}")]
    Correlation { what: String },

    /// Mole fractions that do not describe a binary mixture.
    #[error("Invalid mole fractions y1 = {y1}, y2 = {y2}")]
    MixtureRatio { y1: f64, y2: f64 },

    /// Derived-property inputs outside the correlation's domain.
    #[error("Out of domain: {what}")]
    OutOfDomain { what: &'static str },
}

impl From<CoreError> for GcError {
    fn from(err: CoreError) -> Self {
        GcError::Correlation {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GcError::UnknownGroup {
            symbol: "-XYZ".into(),
            kind: GroupKind::Ring,
        };
        assert_eq!(err.to_string(), "Unknown ring group: -XYZ");

        let err = GcError::MissingCoefficient {
            group: "@CH",
            field: Coefficient::BoilingTemperature,
        };
        assert!(err.to_string().contains("@CH"));
    }

    #[test]
    fn core_error_becomes_correlation_error() {
        let err: GcError = CoreError::DivisionByZero { what: "Tc" }.into();
        assert!(matches!(err, GcError::Correlation { .. }));
    }
}
