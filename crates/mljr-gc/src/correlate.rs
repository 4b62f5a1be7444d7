//! Single-component mLJR correlations.
//!
//! With `S(x) = Σ nᵢ·Δxᵢ` over the groups of one molecule:
//!
//! - `Tb = 198.2 + S(ΔTb)`
//! - `Tc = Tb / (A + B·S(ΔT) − S(ΔT)²)`
//! - `Pc = M / (C + S(ΔP))²`
//! - `Vc = E + S(ΔV)`
//!
//! and the acentric factor follows from Tb, Tc and Pc.

use crate::error::{GcError, GcResult};
use crate::groups::GroupRecord;
use mljr_core::constants::P_BOIL_BAR;
use mljr_core::{Real, checked_div, ensure_finite};
use serde::Serialize;
use std::fmt;
use tracing::trace;

pub const A_M: Real = 0.5703;
pub const B_M: Real = 1.0121;
pub const C_M: Real = 0.2573;
pub const E_M: Real = 6.75;
pub const TB_OFFSET: Real = 198.2;

/// One of the four group coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Coefficient {
    BoilingTemperature,
    Temperature,
    Pressure,
    Volume,
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoilingTemperature => write!(f, "ΔTb"),
            Self::Temperature => write!(f, "ΔT"),
            Self::Pressure => write!(f, "ΔP"),
            Self::Volume => write!(f, "ΔV"),
        }
    }
}

/// A group and how many times it occurs in the molecule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupCount {
    pub group: &'static GroupRecord,
    pub count: u32,
}

impl GroupCount {
    pub fn new(group: &'static GroupRecord, count: u32) -> GcResult<Self> {
        if count == 0 {
            return Err(GcError::InvalidGroupCount {
                symbol: group.symbol,
                count,
            });
        }
        Ok(Self { group, count })
    }

    fn coefficient(&self, field: Coefficient) -> GcResult<Real> {
        let c = &self.group.contributions;
        match field {
            Coefficient::BoilingTemperature => c.d_tb.ok_or(GcError::MissingCoefficient {
                group: self.group.symbol,
                field,
            }),
            Coefficient::Temperature => Ok(c.d_t),
            Coefficient::Pressure => Ok(c.d_p),
            Coefficient::Volume => Ok(c.d_v),
        }
    }
}

/// Count-weighted coefficient sums of one molecule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSums {
    pub d_tb: Real,
    pub d_t: Real,
    pub d_p: Real,
    pub d_v: Real,
}

impl GroupSums {
    pub fn from_groups(groups: &[GroupCount]) -> GcResult<Self> {
        let sums = Self {
            d_tb: field_sum(groups, Coefficient::BoilingTemperature)?,
            d_t: field_sum(groups, Coefficient::Temperature)?,
            d_p: field_sum(groups, Coefficient::Pressure)?,
            d_v: field_sum(groups, Coefficient::Volume)?,
        };
        trace!(?sums, groups = groups.len(), "group sums");
        Ok(sums)
    }
}

/// Σ count × coefficient for one field; fails on the first group lacking it.
pub fn field_sum(groups: &[GroupCount], field: Coefficient) -> GcResult<Real> {
    groups.iter().try_fold(0.0, |acc, g| {
        Ok(acc + f64::from(g.count) * g.coefficient(field)?)
    })
}

pub fn boiling_temperature(s_tb: Real) -> Real {
    TB_OFFSET + s_tb
}

/// Fails when the denominator is not positive, which would give Tc <= 0.
pub fn critical_temperature(tb: Real, s_t: Real) -> GcResult<Real> {
    let den = A_M + B_M * s_t - s_t * s_t;
    if !(den > 0.0) {
        return Err(GcError::Correlation {
            what: format!("critical temperature undefined for S(ΔT) = {s_t} (denominator {den})"),
        });
    }
    Ok(checked_div(tb, den, "critical temperature")?)
}

pub fn critical_pressure(molar_mass: Real, s_p: Real) -> GcResult<Real> {
    let d = C_M + s_p;
    Ok(checked_div(molar_mass, d * d, "critical pressure")?)
}

pub fn critical_volume(s_v: Real) -> Real {
    E_M + s_v
}

/// Acentric factor from Tb, Tc [K] and Pc [bar], with Pb = 1 bar.
pub fn acentric_factor(tb: Real, tc: Real, pc: Real) -> GcResult<Real> {
    if !(tc > tb) {
        return Err(GcError::Correlation {
            what: format!("acentric factor needs Tc > Tb, got Tc = {tc}, Tb = {tb}"),
        });
    }
    if pc <= 0.0 {
        return Err(GcError::Correlation {
            what: format!("acentric factor needs Pc > 0, got {pc}"),
        });
    }
    let t = checked_div(
        (tb - 43.0) * (tc - 43.0),
        (tc - tb) * (0.7 * tc - 43.0),
        "acentric factor",
    )?;
    let l = (pc / P_BOIL_BAR).log10();
    let s = (tc - 43.0) / (tc - tb);
    Ok(ensure_finite(t * l - s * l + l - 1.0, "acentric factor")?)
}

/// Critical properties of one pure component.
///
/// | Field        | Unit     |
/// |--------------|----------|
/// | tc, tb       | K        |
/// | pc           | bar      |
/// | vc           | cm³/mol  |
/// | molar_mass   | g/mol    |
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentResult {
    pub tc: Real,
    pub pc: Real,
    pub vc: Real,
    pub tb: Real,
    pub omega: Real,
    pub molar_mass: Real,
    pub sums: GroupSums,
}

impl ComponentResult {
    /// Pc re-evaluated with a different molecular weight.
    pub fn critical_pressure_at(&self, molar_mass: Real) -> GcResult<Real> {
        critical_pressure(molar_mass, self.sums.d_p)
    }

    /// Acentric factor using Pc re-evaluated at `molar_mass`.
    pub fn acentric_factor_at(&self, molar_mass: Real) -> GcResult<Real> {
        acentric_factor(self.tb, self.tc, self.critical_pressure_at(molar_mass)?)
    }
}

/// Apply the mLJR correlations to one molecule.
pub fn correlate(groups: &[GroupCount], molar_mass: Real) -> GcResult<ComponentResult> {
    if groups.is_empty() {
        return Err(GcError::Correlation {
            what: "no groups given".into(),
        });
    }
    if !(molar_mass.is_finite() && molar_mass > 0.0) {
        return Err(GcError::Correlation {
            what: format!("molecular weight must be positive, got {molar_mass}"),
        });
    }

    let sums = GroupSums::from_groups(groups)?;
    let tb = boiling_temperature(sums.d_tb);
    let tc = critical_temperature(tb, sums.d_t)?;
    let pc = critical_pressure(molar_mass, sums.d_p)?;
    let vc = critical_volume(sums.d_v);
    let omega = acentric_factor(tb, tc, pc)?;

    Ok(ComponentResult {
        tc,
        pc,
        vc,
        tb,
        omega,
        molar_mass,
        sums,
    })
}
