// mljr-core/src/units.rs
//
// The method works in fixed units: K, bar, cm^3/mol, g/mol, g/mL, mN/m.
// Raw values stay plain `Real`; these constructors give typed views used to
// convert reported values to SI.

use uom::si::f64::{
    MassDensity as UomMassDensity, MolarMass as UomMolarMass, Pressure as UomPressure,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn g_per_mol(v: f64) -> MolarMass {
    use uom::si::molar_mass::gram_per_mole;
    MolarMass::new::<gram_per_mole>(v)
}

#[inline]
pub fn g_per_ml(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

pub mod constants {
    /// Gas constant as used by the mLJR correlations [J/(mol K)].
    pub const R_GAS: f64 = 8.314;

    /// Reference pressure for the acentric factor [bar].
    pub const P_BOIL_BAR: f64 = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        use uom::si::pressure::pascal;
        let p = bar(1.0);
        assert!((p.get::<pascal>() - 100_000.0).abs() < 1e-9);
        use uom::si::mass_density::kilogram_per_cubic_meter;
        use uom::si::molar_mass::kilogram_per_mole;
        assert!((g_per_mol(139.62).get::<kilogram_per_mole>() - 0.139_62).abs() < 1e-12);
        assert!((g_per_ml(1.03).get::<kilogram_per_cubic_meter>() - 1030.0).abs() < 1e-9);
    }
}
