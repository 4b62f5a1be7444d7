//! End-to-end regression for the two reference systems.
//!
//! Choline chloride (pure) and choline chloride + glycerol (1:2). Values are
//! pinned so that any change to coefficients or correlations shows up here.

use mljr_core::units::constants::R_GAS;
use mljr_gc::{
    GcError, GroupCount, GroupKind, correlate, density, lookup, mix, parse_formula,
    surface_tension,
};

fn groups(spec: &[(&str, u32)]) -> Vec<GroupCount> {
    spec.iter()
        .map(|&(symbol, n)| GroupCount::new(lookup(symbol, false).unwrap(), n).unwrap())
        .collect()
}

fn choline_chloride() -> Vec<GroupCount> {
    groups(&[("-CH3", 3), ("-CH2-", 2), ("-OH", 1), (">N-", 1), ("-Cl", 1)])
}

fn glycerol() -> Vec<GroupCount> {
    groups(&[("-CH2-", 2), ("-OH", 3), (">CH-", 1)])
}

fn assert_rel(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn choline_chloride_pure() {
    let r = correlate(&choline_chloride(), 139.62).unwrap();

    assert_rel(r.tb, 457.45, "Tb");
    assert_rel(r.tc, 622.970_273_784_166_1, "Tc");
    assert_rel(r.pc, 30.541_587_460_498_302, "Pc");
    assert_rel(r.vc, 440.58, "Vc");
    assert_rel(r.omega, 0.767_763_753_315_736_2, "omega");

    let d = density(r.molar_mass, 300.0, r.tc, r.pc, r.vc, r.tb).unwrap();
    assert_rel(d, 1.034_288_623_690_324_6, "density");

    let st = surface_tension(350.0, 56.0, 298.15, r.tc).unwrap();
    assert_rel(st, 45.276_860_453_446_49, "surface tension");
}

#[test]
fn molar_mass_from_formula_matches_tabulated() {
    let (_, m) = parse_formula("C5H14NO Cl").unwrap();
    assert!((m - 139.622).abs() < 1e-9);
    let (_, m) = parse_formula("C3H8O3").unwrap();
    assert!((m - 92.094).abs() < 1e-9);
}

#[test]
fn choline_chloride_glycerol_mixture() {
    let cc = correlate(&choline_chloride(), 139.62).unwrap();
    let gly = correlate(&glycerol(), 92.09).unwrap();

    assert_rel(gly.tc, 715.991_445_458_272_3, "Tc2");
    assert_rel(gly.pc, 63.190_824_129_664_24, "Pc2");
    assert_rel(gly.vc, 257.87, "Vc2");
    assert_rel(gly.tb, 544.34, "Tb2");
    assert_rel(gly.omega, 1.465_442_315_413_274_5, "omega2");

    let y1 = 0.333;
    let m = mix(&cc, &gly, y1, 1.0 - y1).unwrap();
    assert_rel(m.tc, 680.704_535_731_530_9, "Tcm");
    assert_rel(m.pc, 33.065_865_840_703_964, "Pcm");
    assert_rel(m.vc, 315.108_688_930_466_9, "Vcm");
    assert_rel(m.tb, 515.405_63, "Tbm");
    assert_rel(m.omega, 1.251_675_808_686_457_7, "omegam");

    // Pcm relation holds exactly for the returned values.
    assert_rel(
        m.pc,
        (0.2905 - 0.085 * m.omega) * R_GAS * m.tc / m.vc * 10.0,
        "Pcm relation",
    );

    let d = density(m.molar_mass, 425.0, m.tc, m.pc, m.vc, m.tb).unwrap();
    assert_rel(d, 1.060_624_020_168_784, "mixture density");
    let st = surface_tension(425.0, 56.0, 298.15, m.tc).unwrap();
    assert_rel(st, 34.225_849_098_501_89, "mixture surface tension");
}

#[test]
fn ring_namespace_is_not_consulted_for_chain_groups() {
    let err = lookup("phenol", false).unwrap_err();
    assert!(matches!(
        err,
        GcError::UnknownGroup {
            kind: GroupKind::NonRing,
            ..
        }
    ));
}
