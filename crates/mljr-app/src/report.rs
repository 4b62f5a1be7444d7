//! Text and JSON rendering of a [`CalcOutcome`].

use crate::calc_service::{CalcOutcome, DerivedProperties};
use crate::error::{AppError, AppResult};
use mljr_core::{bar, g_per_mol, round_to};
use mljr_gc::{ComponentResult, MixtureResult};
use serde::Serialize;
use std::fmt::{self, Write};
use std::io::Write as _;
use std::path::Path;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::molar_mass::kilogram_per_mole;
use uom::si::pressure::pascal;

/// Rounded to `digits` decimals and printed in shortest form (`300.0`,
/// `622.9703`).
fn num(v: f64, digits: i32) -> String {
    format!("{:?}", round_to(v, digits))
}

fn r4(v: f64) -> String {
    num(v, 4)
}

/// Text form of an outcome; every line is a `#` comment.
struct TextReport<'a>(&'a CalcOutcome);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\n\n")?;
        match self.0 {
            CalcOutcome::Purity {
                name,
                result,
                derived,
            } => write_purity(f, name.as_deref(), result, derived.as_ref()),
            CalcOutcome::Mixture {
                name,
                result,
                derived,
            } => write_mixture(f, name.as_deref(), result, derived.as_ref()),
        }
    }
}

/// Human-readable report, one `# label = < value >` line per quantity.
pub fn render_text(outcome: &CalcOutcome) -> String {
    TextReport(outcome).to_string()
}

fn write_purity(
    out: &mut impl Write,
    name: Option<&str>,
    r: &ComponentResult,
    derived: Option<&DerivedProperties>,
) -> fmt::Result {
    writeln!(out, "# For calculation type < purity >")?;
    if let Some(name) = name {
        writeln!(out, "# Name: < {name} >")?;
    }
    writeln!(out, "# Molecular weight                   m = < {} >\n", r4(r.molar_mass))?;
    writeln!(out, "# Critical temperature (K):          Tc = < {} >", r4(r.tc))?;
    writeln!(out, "# Critical pressure (bar):           Pc = < {} >", r4(r.pc))?;
    writeln!(out, "# Critical molar volume (cm^3/mol):  Vc = < {} >", r4(r.vc))?;
    writeln!(out, "# Boiling temperature (K):           Tb = < {} >", r4(r.tb))?;
    writeln!(out, "# Acentric factor:                   w  = < {} >\n", r4(r.omega))?;

    if let Some(d) = derived {
        let t = num(d.t, 2);
        writeln!(out, "# Density at ({t}):           d  = < {} >\n", r4(d.density))?;
        if let Some(st) = &d.surface_tension {
            writeln!(out, "# Surf. Ten. at ({t}):       st  = < {} >\n", r4(st.value))?;
        }
    }
    Ok(())
}

fn write_component(out: &mut impl Write, idx: usize, y: f64, r: &ComponentResult) -> fmt::Result {
    writeln!(out, "# Molecular weight                 m{idx}  = < {} >", r4(r.molar_mass))?;
    writeln!(out, "# Molar ratio:                     y{idx}  = < {} >", r4(y))?;
    writeln!(out, "# Critical temperature (K):        Tc{idx} = < {} >", r4(r.tc))?;
    writeln!(out, "# Critical pressure (bar):         Pc{idx} = < {} >", r4(r.pc))?;
    writeln!(out, "# Critical molar volume (mL/mol):  Vc{idx} = < {} >", r4(r.vc))?;
    writeln!(out, "# Boiling temperature (K):         Tb{idx} = < {} >", r4(r.tb))?;
    writeln!(out, "# Acentric factor:                 w{idx}  = < {} >", r4(r.omega))
}

fn write_mixture(
    out: &mut impl Write,
    name: Option<&str>,
    m: &MixtureResult,
    derived: Option<&DerivedProperties>,
) -> fmt::Result {
    let (y1, y2) = (m.fractions.y1, m.fractions.y2);
    writeln!(out, "# For calculation type < mixture >")?;
    if let Some(name) = name {
        writeln!(out, "# Name: < {name} >")?;
    }
    writeln!(out, "# Molar ratio: ( m1 : m2 ) = < {} : {} >", r4(y1), r4(y2))?;
    writeln!(out, "# Total Molecular weight:   m = < {} >\n\n", r4(m.molar_mass))?;

    write_component(out, 1, y1, &m.components[0])?;
    writeln!(out)?;
    write_component(out, 2, y2, &m.components[1])?;
    writeln!(out, "\n")?;

    writeln!(out, "# Mixing Critical temperature (K):        Tcm = < {} >", r4(m.tc))?;
    writeln!(out, "# Mixing Critical pressure (bar):         Pcm = < {} >", r4(m.pc))?;
    writeln!(out, "# Mixing Critical molar volume (mL/mol):  Vcm = < {} >", r4(m.vc))?;
    writeln!(out, "# Mixing Boiling temperature (K):         Tbm = < {} >", r4(m.tb))?;
    writeln!(out, "# Mixing Acentric factor:                 wm  = < {} >\n", r4(m.omega))?;

    if let Some(d) = derived {
        let t = num(d.t, 2);
        writeln!(out, "# Density   at  {t} K (g/mL):    d = < {} >", r4(d.density))?;
        if let Some(st) = &d.surface_tension {
            writeln!(out, "# Surf. Ten. at {t} K (mN/m):   st = < {} >", r4(st.value))?;
            writeln!(
                out,
                "# Reference: Temp. < {} >, Surface Tension: < {} >\n",
                r4(st.t_ref),
                r4(st.q_ref)
            )?;
        }
    }
    Ok(())
}

/// Headline values in SI base units, for JSON consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiValues {
    pub pc_pa: f64,
    pub molar_mass_kg_per_mol: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_kg_per_m3: Option<f64>,
}

impl SiValues {
    pub fn of(outcome: &CalcOutcome) -> Self {
        let (pc, m) = match outcome {
            CalcOutcome::Purity { result, .. } => (result.pc, result.molar_mass),
            CalcOutcome::Mixture { result, .. } => (result.pc, result.molar_mass),
        };
        Self {
            pc_pa: bar(pc).get::<pascal>(),
            molar_mass_kg_per_mol: g_per_mol(m).get::<kilogram_per_mole>(),
            density_kg_per_m3: outcome
                .derived()
                .map(|d| d.mass_density().get::<kilogram_per_cubic_meter>()),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    outcome: &'a CalcOutcome,
    si: SiValues,
}

/// The outcome as pretty-printed JSON, full precision, with an `si` block.
pub fn render_json(outcome: &CalcOutcome) -> AppResult<String> {
    let report = JsonReport {
        outcome,
        si: SiValues::of(outcome),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Append `text` to the end of an existing file.
pub fn append_report(path: &Path, text: &str) -> AppResult<()> {
    let write_err = |source| AppError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(text.as_bytes()).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_report_is_only_comment_lines() {
        let groups = crate::resolve_groups(&[mljr_input::GroupSpec {
            symbol: "-ch3".into(),
            ring: false,
            count: 2,
        }])
        .unwrap();
        let outcome = CalcOutcome::Purity {
            name: Some("Ethane".into()),
            result: mljr_gc::correlate(&groups, 30.07).unwrap(),
            derived: None,
        };
        let text = render_text(&outcome);
        assert!(text.starts_with("\n\n# For calculation type < purity >\n# Name: < Ethane >\n"));
        assert!(text.lines().all(|l| l.is_empty() || l.starts_with('#')));
    }

    #[test]
    fn numbers_print_in_shortest_rounded_form() {
        assert_eq!(r4(622.970_273_784_166_1), "622.9703");
        assert_eq!(r4(440.58), "440.58");
        assert_eq!(num(300.0, 2), "300.0");
        assert_eq!(num(425.004, 2), "425.0");
        assert_eq!(r4(0.333), "0.333");
    }
}
