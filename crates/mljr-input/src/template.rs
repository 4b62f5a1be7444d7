//! Built-in example input files.

use crate::{InputError, InputResult};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scalar keys in the order they are written.
const KEY_ORDER: &[&str] = &[
    "type", "name", "ratio", "m", "m1", "s1", "s", "m2", "s2", "t-ref", "q-ref", "t",
];

/// Group blocks in the order they are written.
const BLOCK_ORDER: &[&str] = &["ring", "no-ring", "ring-1", "no-ring-1", "ring-2", "no-ring-2"];

const HEADER: &str = "\
# mLJR input: critical properties of a pure compound or a binary mixture
#
# Free format, one `key : value` per line. `#` starts a comment.
# Keys are case-insensitive; spaces and quotes are ignored.
#
# Purity keys:   type, name, m, s, and the blocks `mark : ring` / `mark : no-ring`
# Mixture keys:  type, name, ratio, m1, s1, m2, s2, and the blocks
#                `mark : ring-1`, `mark : no-ring-1`, `mark : ring-2`, `mark : no-ring-2`
# Both:          t-ref, q-ref, t
#
# type   : purity / pure / p  or  mixture / mix / m (inferred from the blocks if omitted)
# name   : free text, only shown in the report
# ratio  : molar ratio `a : b` of molecule 1 to molecule 2 (default 1 : 1)
# m, s   : molecular weight (g/mol) or chemical formula; m wins when both are given
#          formulas are element/count pairs separated by nothing, `-` or spaces:
#              C2H3O4N5    C2 - H3 - O4 - N5    C2 H3 O4 N5
# t      : temperature (K) for the density and surface tension
# t-ref  : reference temperature (K) for the surface tension
# q-ref  : surface tension (mN/m) measured at t-ref
#
# Every `mark` block lists `group : count` lines; a missing count means 1.
# Run `mljr groups` for all group names. The symbol @ means three bonds.

";

/// A named, ready-to-run example input.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Short command-line name.
    pub id: &'static str,
    pub title: &'static str,
    scalars: &'static [(&'static str, &'static str)],
    blocks: &'static [(&'static str, &'static [(&'static str, u32)])],
}

const CHOLINE_CHLORIDE_GROUPS: &[(&str, u32)] =
    &[("-CH3", 3), ("-CH2-", 2), ("-OH", 1), (">N-", 1), ("-Cl", 1)];

/// Choline chloride, a pure compound.
pub static CHOLINE_CHLORIDE: Template = Template {
    id: "ccl",
    title: "Choline Chloride",
    scalars: &[
        ("type", "purity"),
        ("name", "Choline Chloride"),
        ("m", "139.62"),
        ("s", "C5H14NO Cl"),
    ],
    blocks: &[("no-ring", CHOLINE_CHLORIDE_GROUPS)],
};

/// Choline chloride + glycerol at 1:2.
pub static CHOLINE_CHLORIDE_GLYCEROL: Template = Template {
    id: "ccg",
    title: "Choline Chloride Glycerol",
    scalars: &[
        ("type", "mixture"),
        ("name", "Choline Chloride Glycerol"),
        ("ratio", "1:2"),
        ("m1", "139.62"),
        ("s1", "C5H14NO Cl"),
        ("m2", "92.09"),
        ("s2", "C3H8O3"),
        ("t-ref", "298.15"),
        ("q-ref", "56.0"),
        ("t", "425"),
    ],
    blocks: &[
        ("no-ring-1", CHOLINE_CHLORIDE_GROUPS),
        ("no-ring-2", &[("-CH2-", 2), ("-OH", 3), (">CH-", 1)]),
    ],
};

impl Template {
    pub fn all() -> [&'static Template; 2] {
        [&CHOLINE_CHLORIDE, &CHOLINE_CHLORIDE_GLYCEROL]
    }

    /// Full input file text, header included.
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for key in KEY_ORDER {
            if let Some((_, value)) = self.scalars.iter().find(|(k, _)| k == key) {
                out.push_str(&format!("{key} : {value}\n\n"));
            }
        }
        for name in BLOCK_ORDER {
            if let Some((_, groups)) = self.blocks.iter().find(|(b, _)| b == name) {
                out.push_str(&format!("mark : {name}\n\n"));
                for (symbol, count) in groups.iter() {
                    out.push_str(&format!("    {symbol:7} :  {count:>3}\n"));
                }
                out.push_str("\n\n");
            }
        }
        out
    }
}

const FILE_STEM: &str = "template_mLJR";

/// Numbered names tried after the unnumbered one.
const MAX_NUMBERED: u32 = 9_999;

/// Write `template` into `dir` under the first free name of
/// `template_mLJR.txt`, `template_mLJR_1.txt`, `template_mLJR_2.txt`, ...
///
/// Existing files are never touched. Fails once `template_mLJR_9999.txt` is
/// taken too.
pub fn write_unique(template: &Template, dir: &Path) -> InputResult<PathBuf> {
    write_first_free(template, dir, MAX_NUMBERED)
}

fn write_first_free(template: &Template, dir: &Path, max_numbered: u32) -> InputResult<PathBuf> {
    let text = template.render();
    for n in 0..=max_numbered {
        let path = if n == 0 {
            dir.join(format!("{FILE_STEM}.txt"))
        } else {
            dir.join(format!("{FILE_STEM}_{n}.txt"))
        };
        let write_err = |source| InputError::Write {
            path: path.clone(),
            source,
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(text.as_bytes()).map_err(write_err)?;
                debug!(path = %path.display(), template = template.id, "wrote template");
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(write_err(e)),
        }
    }
    Err(InputError::Write {
        path: dir.join(format!("{FILE_STEM}_{max_numbered}.txt")),
        source: std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{FILE_STEM}.txt through {FILE_STEM}_{max_numbered}.txt all exist"),
        ),
    })
}
