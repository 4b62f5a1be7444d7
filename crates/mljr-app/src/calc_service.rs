//! Turning a typed configuration into critical and derived properties.

use mljr_core::units::{Density, g_per_ml};
use mljr_gc::{
    ComponentResult, GcResult, GroupCount, MixtureResult, correlate, density, lookup, mix,
    parse_formula, surface_tension,
};
use mljr_input::{CalcConfig, Conditions, GroupSpec, MolarMassSource};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Derived-property inputs given on the command line, replacing the file's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionsOverride {
    /// `T` only: density.
    Temperature(f64),
    /// `T-ref, Q-ref, T`: density and surface tension.
    Full { t_ref: f64, q_ref: f64, t: f64 },
}

impl ConditionsOverride {
    pub fn from_values(values: &[f64]) -> AppResult<Self> {
        if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            return Err(AppError::InvalidOverride {
                reason: format!("{bad} is not a positive number"),
            });
        }
        match *values {
            [t] => Ok(Self::Temperature(t)),
            [t_ref, q_ref, t] => Ok(Self::Full { t_ref, q_ref, t }),
            _ => Err(AppError::InvalidOverride {
                reason: format!(
                    "expected 1 value (T) or 3 values (T-ref Q-ref T), got {}",
                    values.len()
                ),
            }),
        }
    }
}

/// What to evaluate after the critical properties.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DerivedRequest {
    t: f64,
    /// `(t_ref, q_ref)` when surface tension is wanted.
    tension_ref: Option<(f64, f64)>,
}

impl DerivedRequest {
    fn select(conditions: &Conditions, overrides: Option<&ConditionsOverride>) -> Option<Self> {
        match overrides {
            Some(ConditionsOverride::Temperature(t)) => Some(Self {
                t: *t,
                tension_ref: None,
            }),
            Some(ConditionsOverride::Full { t_ref, q_ref, t }) => Some(Self {
                t: *t,
                tension_ref: Some((*t_ref, *q_ref)),
            }),
            None => conditions.t.map(|t| Self {
                t,
                tension_ref: conditions.t_ref.zip(conditions.q_ref),
            }),
        }
    }

    fn evaluate(&self, m: f64, tc: f64, pc: f64, vc: f64, tb: f64) -> GcResult<DerivedProperties> {
        debug!(t = self.t, tension = self.tension_ref.is_some(), "derived properties");
        let surface_tension = match self.tension_ref {
            Some((t_ref, q_ref)) => Some(SurfaceTension {
                t_ref,
                q_ref,
                value: surface_tension(self.t, q_ref, t_ref, tc)?,
            }),
            None => None,
        };
        Ok(DerivedProperties {
            t: self.t,
            density: density(m, self.t, tc, pc, vc, tb)?,
            surface_tension,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceTension {
    pub t_ref: f64,
    pub q_ref: f64,
    /// mN/m at the evaluation temperature.
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedProperties {
    /// Evaluation temperature (K).
    pub t: f64,
    /// g/mL
    pub density: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_tension: Option<SurfaceTension>,
}

impl DerivedProperties {
    pub fn mass_density(&self) -> Density {
        g_per_ml(self.density)
    }
}

/// Result of one run, as reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalcOutcome {
    Purity {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        result: ComponentResult,
        #[serde(skip_serializing_if = "Option::is_none")]
        derived: Option<DerivedProperties>,
    },
    Mixture {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        result: MixtureResult,
        #[serde(skip_serializing_if = "Option::is_none")]
        derived: Option<DerivedProperties>,
    },
}

impl CalcOutcome {
    pub fn derived(&self) -> Option<&DerivedProperties> {
        match self {
            Self::Purity { derived, .. } | Self::Mixture { derived, .. } => derived.as_ref(),
        }
    }
}

/// Look every group up in its ring or non-ring namespace.
pub fn resolve_groups(specs: &[GroupSpec]) -> GcResult<Vec<GroupCount>> {
    let groups = specs
        .iter()
        .map(|spec| GroupCount::new(lookup(&spec.symbol, spec.ring)?, spec.count))
        .collect::<GcResult<Vec<_>>>()?;
    debug!(
        groups = ?groups.iter().map(|g| (g.group.symbol, g.count)).collect::<Vec<_>>(),
        "resolved groups"
    );
    Ok(groups)
}

pub fn resolve_molar_mass(source: &MolarMassSource) -> GcResult<f64> {
    let m = match source {
        MolarMassSource::Given(m) => *m,
        MolarMassSource::Formula(formula) => parse_formula(formula)?.1,
    };
    debug!(?source, m, "resolved molar mass");
    Ok(m)
}

fn component(source: &MolarMassSource, specs: &[GroupSpec]) -> GcResult<ComponentResult> {
    let m = resolve_molar_mass(source)?;
    correlate(&resolve_groups(specs)?, m)
}

/// Run the calculation described by `config`.
pub fn run(config: &CalcConfig, overrides: Option<&ConditionsOverride>) -> AppResult<CalcOutcome> {
    let request = DerivedRequest::select(config.conditions(), overrides);

    let outcome = match config {
        CalcConfig::Purity(cfg) => {
            let result = component(&cfg.molar_mass, &cfg.groups)?;
            let derived = request
                .map(|r| r.evaluate(result.molar_mass, result.tc, result.pc, result.vc, result.tb))
                .transpose()?;
            CalcOutcome::Purity {
                name: cfg.name.clone(),
                result,
                derived,
            }
        }
        CalcConfig::Mixture(cfg) => {
            let [first, second] = &cfg.components;
            let r1 = component(&first.molar_mass, &first.groups)?;
            let r2 = component(&second.molar_mass, &second.groups)?;
            let (y1, y2) = cfg.fractions;
            let result = mix(&r1, &r2, y1, y2)?;
            let derived = request
                .map(|r| r.evaluate(result.molar_mass, result.tc, result.pc, result.vc, result.tb))
                .transpose()?;
            CalcOutcome::Mixture {
                name: cfg.name.clone(),
                result,
                derived,
            }
        }
    };
    Ok(outcome)
}

/// Load an input file and run it.
pub fn calc_file(path: &Path, overrides: Option<&ConditionsOverride>) -> AppResult<CalcOutcome> {
    let config = mljr_input::load_file(path)?;
    run(&config, overrides)
}
