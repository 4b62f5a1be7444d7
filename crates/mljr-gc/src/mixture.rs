//! Binary mixing rules.
//!
//! Cross terms use the geometric mean for temperature with kij = 1, since no
//! literature interaction parameters are available for these systems.

use crate::correlate::ComponentResult;
use crate::error::{GcError, GcResult};
use mljr_core::constants::R_GAS;
use mljr_core::{Real, Tolerances, checked_div, ensure_finite, nearly_equal};
use nalgebra::{Matrix2, Vector2};
use serde::Serialize;
use tracing::debug;

const SUM_TOL: Tolerances = Tolerances {
    abs: 1e-9,
    rel: 0.0,
};

/// Mole fractions of a binary mixture (each > 0, summing to one).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoleFractions {
    pub y1: Real,
    pub y2: Real,
}

impl MoleFractions {
    pub fn new(y1: Real, y2: Real) -> GcResult<Self> {
        let valid = y1.is_finite()
            && y2.is_finite()
            && y1 > 0.0
            && y2 > 0.0
            && nearly_equal(y1 + y2, 1.0, SUM_TOL);
        if !valid {
            return Err(GcError::MixtureRatio { y1, y2 });
        }
        Ok(Self { y1, y2 })
    }

    fn vector(&self) -> Vector2<Real> {
        Vector2::new(self.y1, self.y2)
    }
}

/// Mixture critical properties plus the pure-component results they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixtureResult {
    pub tc: Real,
    pub pc: Real,
    pub vc: Real,
    pub tb: Real,
    pub omega: Real,
    pub fractions: MoleFractions,
    /// y1·M1 + y2·M2
    pub molar_mass: Real,
    pub components: [ComponentResult; 2],
    /// Component acentric factors with Pc evaluated at the mixture molar mass.
    pub adjusted_omegas: [Real; 2],
}

/// `Vcij = (Vci^(1/3) + Vcj^(1/3))³ / 8`
pub fn cross_volumes(vc1: Real, vc2: Real) -> Matrix2<Real> {
    let v = [vc1, vc2];
    Matrix2::from_fn(|i, j| (v[i].cbrt() + v[j].cbrt()).powi(3) / 8.0)
}

/// `Tcij = sqrt(Tci·Tcj)`
pub fn cross_temperatures(tc1: Real, tc2: Real) -> Matrix2<Real> {
    let t = [tc1, tc2];
    Matrix2::from_fn(|i, j| (t[i] * t[j]).sqrt())
}

/// Combine two pure-component results at mole fractions `(y1, y2)`.
pub fn mix(
    r1: &ComponentResult,
    r2: &ComponentResult,
    y1: Real,
    y2: Real,
) -> GcResult<MixtureResult> {
    let fractions = MoleFractions::new(y1, y2)?;
    let y = fractions.vector();

    let vcij = cross_volumes(r1.vc, r2.vc);
    let tcij = cross_temperatures(r1.tc, r2.tc);

    let vc = y.dot(&(vcij * y));
    let weighted = vcij.map(|v| v.powf(0.25)).component_mul(&tcij);
    let tc = checked_div(y.dot(&(weighted * y)), vc.powf(0.25), "mixture Tc")?;

    // Each component's Pc is re-evaluated with the mixture molar mass before
    // its acentric factor enters the mixing.
    let molar_mass = y1 * r1.molar_mass + y2 * r2.molar_mass;
    let adjusted_omegas = [
        r1.acentric_factor_at(molar_mass)?,
        r2.acentric_factor_at(molar_mass)?,
    ];
    let omega = adjusted_omegas[0] * y1 + adjusted_omegas[1] * y2;

    let pc = ensure_finite(
        (0.2905 - 0.085 * omega) * R_GAS * tc / vc * 10.0,
        "mixture Pc",
    )?;
    let tb = r1.tb * y1 + r2.tb * y2;

    debug!(tc, pc, vc, tb, omega, molar_mass, "mixed binary");

    Ok(MixtureResult {
        tc,
        pc,
        vc,
        tb,
        omega,
        fractions,
        molar_mass,
        components: [*r1, *r2],
        adjusted_omegas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlate::{GroupCount, correlate};
    use crate::groups::lookup;

    fn non_ring(symbol: &str, count: u32) -> GroupCount {
        GroupCount::new(lookup(symbol, false).unwrap(), count).unwrap()
    }

    fn choline_chloride() -> ComponentResult {
        let groups = [
            non_ring("-CH3", 3),
            non_ring("-CH2-", 2),
            non_ring("-OH", 1),
            non_ring(">N-", 1),
            non_ring("-Cl", 1),
        ];
        correlate(&groups, 139.62).unwrap()
    }

    fn glycerol() -> ComponentResult {
        let groups = [non_ring("-CH2-", 2), non_ring("-OH", 3), non_ring(">CH-", 1)];
        correlate(&groups, 92.09).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs(),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn cross_matrices_are_symmetric_with_pure_diagonal() {
        let v = cross_volumes(440.58, 257.87);
        assert_close(v[(0, 0)], 440.58);
        assert_close(v[(1, 1)], 257.87);
        assert_eq!(v[(0, 1)], v[(1, 0)]);

        let t = cross_temperatures(600.0, 700.0);
        assert_close(t[(0, 0)], 600.0);
        assert_close(t[(0, 1)], (600.0_f64 * 700.0).sqrt());
    }

    #[test]
    fn choline_chloride_glycerol_one_to_two() {
        let (r1, r2) = (choline_chloride(), glycerol());
        let m = mix(&r1, &r2, 0.333, 1.0 - 0.333).unwrap();
        assert_close(m.tc, 680.704_535_731_530_9);
        assert_close(m.pc, 33.065_865_840_703_964);
        assert_close(m.vc, 315.108_688_930_466_9);
        assert_close(m.tb, 515.405_63);
        assert_close(m.omega, 1.251_675_808_686_457_7);
        assert_close(m.molar_mass, 107.917_49);
    }

    #[test]
    fn boiling_temperature_mixes_linearly() {
        let (r1, r2) = (choline_chloride(), glycerol());
        let m = mix(&r1, &r2, 0.25, 0.75).unwrap();
        assert_eq!(m.tb, r1.tb * 0.25 + r2.tb * 0.75);
        assert!(nearly_equal(
            m.fractions.y1 + m.fractions.y2,
            1.0,
            Tolerances::default()
        ));
    }

    #[test]
    fn omega_uses_pc_at_mixture_molar_mass() {
        let (r1, r2) = (choline_chloride(), glycerol());
        let m = mix(&r1, &r2, 0.5, 0.5).unwrap();
        let naive = r1.omega * 0.5 + r2.omega * 0.5;
        assert!((m.omega - naive).abs() > 1e-3);
        assert_close(m.omega, 1.136_624_056_970_117_1);
        assert_close(
            m.adjusted_omegas[0],
            r1.acentric_factor_at(m.molar_mass).unwrap(),
        );
    }

    #[test]
    fn invalid_fractions_are_rejected() {
        let (r1, r2) = (choline_chloride(), glycerol());
        for (y1, y2) in [(0.6, 0.6), (0.0, 1.0), (1.0, 0.0), (-0.5, 1.5), (f64::NAN, 0.5)] {
            let err = mix(&r1, &r2, y1, y2).unwrap_err();
            assert!(matches!(err, GcError::MixtureRatio { .. }), "{y1}, {y2}");
        }
    }

    #[test]
    fn identical_components_reproduce_pure_values() {
        let r = choline_chloride();
        let m = mix(&r, &r, 0.4, 0.6).unwrap();
        assert_close(m.tc, r.tc);
        assert_close(m.vc, r.vc);
        assert_close(m.tb, r.tb);
        assert_close(m.omega, r.omega);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::correlate::{GroupCount, correlate};
    use crate::groups::lookup;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mixture_values_lie_between_components(y1 in 0.01_f64..0.99) {
            let cc = correlate(
                &[
                    GroupCount::new(lookup("-CH3", false).unwrap(), 3).unwrap(),
                    GroupCount::new(lookup("-CH2-", false).unwrap(), 2).unwrap(),
                    GroupCount::new(lookup("-OH", false).unwrap(), 1).unwrap(),
                    GroupCount::new(lookup(">N-", false).unwrap(), 1).unwrap(),
                    GroupCount::new(lookup("-Cl", false).unwrap(), 1).unwrap(),
                ],
                139.62,
            ).unwrap();
            let gly = correlate(
                &[
                    GroupCount::new(lookup("-CH2-", false).unwrap(), 2).unwrap(),
                    GroupCount::new(lookup("-OH", false).unwrap(), 3).unwrap(),
                    GroupCount::new(lookup(">CH-", false).unwrap(), 1).unwrap(),
                ],
                92.09,
            ).unwrap();
            let m = mix(&cc, &gly, y1, 1.0 - y1).unwrap();
            let (lo, hi) = (cc.tb.min(gly.tb), cc.tb.max(gly.tb));
            prop_assert!(m.tb >= lo - 1e-9 && m.tb <= hi + 1e-9);
            let (lo, hi) = (cc.vc.min(gly.vc), cc.vc.max(gly.vc));
            prop_assert!(m.vc >= lo - 1e-9 && m.vc <= hi + 1e-9);
        }
    }
}
