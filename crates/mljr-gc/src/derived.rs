//! Properties derived from critical constants: liquid density and
//! temperature-scaled surface tension.
//!
//! Both correlations are only meaningful below the critical temperature; the
//! functions reject inputs outside that domain instead of returning NaN.

use crate::error::{GcError, GcResult};
use mljr_core::constants::R_GAS;
use mljr_core::{Real, ensure_finite};
use tracing::trace;

/// Exponent of the reduced-temperature terms in the density correlation.
const DENSITY_EXPONENT: Real = 2.0 / 7.0;

/// Exponent of the surface-tension scaling law.
const TENSION_EXPONENT: Real = 11.0 / 9.0;

/// Liquid density (g/mL) at temperature `t` (K).
///
/// `m` in g/mol, `tc`/`tb` in K, `pc` in bar, `vc` in cm³/mol.
pub fn density(m: Real, t: Real, tc: Real, pc: Real, vc: Real, tb: Real) -> GcResult<Real> {
    if !(m > 0.0) {
        return Err(GcError::OutOfDomain {
            what: "molar mass must be positive",
        });
    }
    if !(pc > 0.0 && vc > 0.0) {
        return Err(GcError::OutOfDomain {
            what: "critical pressure and volume must be positive",
        });
    }
    if !(t > 0.0 && t < tc) {
        return Err(GcError::OutOfDomain {
            what: "density requires 0 < T < Tc",
        });
    }
    if !(tb > 0.0 && tb < tc) {
        return Err(GcError::OutOfDomain {
            what: "density requires 0 < Tb < Tc",
        });
    }

    let tr = t / tc;
    let tbr = tb / tc;
    let beta = (-1.0 - (1.0 - tr).powf(DENSITY_EXPONENT))
        / (1.0 + (1.0 - tbr).powf(DENSITY_EXPONENT));
    let base = 0.3445 * pc * vc.powf(1.0135) / tc / R_GAS / 10.0;
    let d = m * pc / R_GAS / tc * base.powf(beta) / 10.0;
    trace!(t, tr, tbr, beta, d, "density");
    ensure_finite(d, "density").map_err(GcError::from)
}

/// Surface tension (mN/m) at `t`, scaled from `q_ref` measured at `t_ref`.
pub fn surface_tension(t: Real, q_ref: Real, t_ref: Real, tc: Real) -> GcResult<Real> {
    if !(t < tc) {
        return Err(GcError::OutOfDomain {
            what: "surface tension requires T < Tc",
        });
    }
    if !(t_ref < tc) {
        return Err(GcError::OutOfDomain {
            what: "surface tension requires Tref < Tc",
        });
    }
    let ratio = (tc - t) / (tc - t_ref);
    let st = ratio.powf(TENSION_EXPONENT) * q_ref;
    trace!(t, t_ref, ratio, st, "surface tension");
    ensure_finite(st, "surface tension").map_err(GcError::from)
}
