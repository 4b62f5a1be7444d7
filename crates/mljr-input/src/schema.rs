//! Typed configuration records produced from an input file.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcKind {
    Purity,
    Mixture,
}

impl CalcKind {
    /// Accepts `purity`/`pure`/`p` and `mixture`/`mix`/`m`, any case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "purity" | "pure" | "p" => Some(Self::Purity),
            "mixture" | "mix" | "m" => Some(Self::Mixture),
            _ => None,
        }
    }
}

impl fmt::Display for CalcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Purity => write!(f, "purity"),
            Self::Mixture => write!(f, "mixture"),
        }
    }
}

/// One group line: `symbol : count` inside a ring or non-ring block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub symbol: String,
    pub ring: bool,
    pub count: u32,
}

/// Where a component's molecular weight comes from. A given value wins over
/// a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MolarMassSource {
    Given(f64),
    Formula(String),
}

/// Temperatures and reference surface tension for the derived properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_ref: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_ref: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub molar_mass: MolarMassSource,
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub molar_mass: MolarMassSource,
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub conditions: Conditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub components: [ComponentSpec; 2],
    /// Mole fractions `(y1, y2)`.
    pub fractions: (f64, f64),
    #[serde(default)]
    pub conditions: Conditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalcConfig {
    Purity(PurityConfig),
    Mixture(MixtureConfig),
}

impl CalcConfig {
    pub fn kind(&self) -> CalcKind {
        match self {
            Self::Purity(_) => CalcKind::Purity,
            Self::Mixture(_) => CalcKind::Mixture,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Purity(p) => p.name.as_deref(),
            Self::Mixture(m) => m.name.as_deref(),
        }
    }

    pub fn conditions(&self) -> &Conditions {
        match self {
            Self::Purity(p) => &p.conditions,
            Self::Mixture(m) => &m.conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_aliases() {
        for v in ["purity", "PURE", "p", "P"] {
            assert_eq!(CalcKind::parse(v), Some(CalcKind::Purity));
        }
        for v in ["Mixture", "mix", "m"] {
            assert_eq!(CalcKind::parse(v), Some(CalcKind::Mixture));
        }
        assert_eq!(CalcKind::parse("binary"), None);
    }
}
