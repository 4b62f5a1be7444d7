//! Turns lexed entries into a typed [`CalcConfig`].
//!
//! Entries are cut into blocks at every `mark`. Scalar keys may appear in any
//! block; every other key is a group line and must sit inside a `mark` block.

use crate::lexer::Entry;
use crate::schema::{
    CalcConfig, CalcKind, ComponentSpec, Conditions, GroupSpec, MixtureConfig, MolarMassSource,
    PurityConfig,
};
use mljr_core::round_to;
use std::collections::HashSet;
use tracing::debug;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("double defined < {key} > entry (line {line})")]
    DuplicateKey { key: String, line: usize },

    #[error("double defined group < {symbol} > under < mark : {block} > (line {line})")]
    DuplicateGroup {
        symbol: String,
        block: String,
        line: usize,
    },

    #[error("double defined < mark : {block} > (line {line})")]
    DuplicateMark { block: String, line: usize },

    #[error("empty < mark > entry (line {line})")]
    EmptyMark { line: usize },

    #[error("< mark > cannot be the last entry (line {line})")]
    TrailingMark { line: usize },

    #[error("no groups defined under < mark : {block} >")]
    EmptyBlock { block: String },

    #[error("group < {symbol} > is not inside a < mark > block (line {line})")]
    GroupOutsideMark { symbol: String, line: usize },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("cannot determine calculation < type >")]
    UndeterminedKind,

    #[error("for < {kind} >, entry < {key} > is not defined")]
    OutOfNamespace { kind: CalcKind, key: String },

    #[error("molecular weight of {component} is not defined (need m or s)")]
    MissingMolarMass { component: &'static str },

    #[error("no groups defined for {component}")]
    MissingGroups { component: &'static str },
}

const SHARED_KEYS: &[&str] = &["name", "type", "t-ref", "q-ref", "t"];
const PURITY_KEYS: &[&str] = &["ring", "no-ring", "m", "s"];
const MIXTURE_KEYS: &[&str] = &[
    "ring-1",
    "ring-2",
    "no-ring-1",
    "no-ring-2",
    "ratio",
    "m1",
    "s1",
    "m2",
    "s2",
];

/// Mole fractions when a mixture gives no `ratio`.
const EQUIMOLAR: (f64, f64) = (0.5, 0.5);

fn is_scalar_key(key: &str) -> bool {
    matches!(
        key,
        "type" | "name" | "ratio" | "m" | "m1" | "m2" | "s" | "s1" | "s2" | "t-ref" | "q-ref" | "t"
    )
}

fn in_namespace(kind: CalcKind, key: &str) -> bool {
    let specific = match kind {
        CalcKind::Purity => PURITY_KEYS,
        CalcKind::Mixture => MIXTURE_KEYS,
    };
    SHARED_KEYS.contains(&key) || specific.contains(&key)
}

/// Scalar values collected across all blocks.
#[derive(Debug, Default)]
struct Scalars {
    kind: Option<CalcKind>,
    name: Option<String>,
    fractions: Option<(f64, f64)>,
    m: Option<f64>,
    m1: Option<f64>,
    m2: Option<f64>,
    s: Option<String>,
    s1: Option<String>,
    s2: Option<String>,
    t_ref: Option<f64>,
    q_ref: Option<f64>,
    t: Option<f64>,
    defined: Vec<&'static str>,
}

impl Scalars {
    fn apply(&mut self, entry: &Entry) -> Result<(), ValidationError> {
        let value = entry.value.as_str();
        let key: &'static str = match entry.key.as_str() {
            "type" => {
                if value.is_empty() {
                    return Ok(());
                }
                self.kind = Some(CalcKind::parse(value).ok_or_else(|| invalid(
                    entry,
                    "expected purity/pure/p or mixture/mix/m",
                ))?);
                "type"
            }
            "name" => {
                let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
                if collapsed.is_empty() {
                    return Ok(());
                }
                self.name = Some(collapsed);
                "name"
            }
            "ratio" => {
                self.fractions = Some(parse_ratio(entry)?);
                "ratio"
            }
            "m" | "m1" | "m2" | "t-ref" | "q-ref" | "t" => {
                if value.is_empty() {
                    return Ok(());
                }
                let v = parse_positive(entry)?;
                match entry.key.as_str() {
                    "m" => {
                        self.m = Some(v);
                        "m"
                    }
                    "m1" => {
                        self.m1 = Some(v);
                        "m1"
                    }
                    "m2" => {
                        self.m2 = Some(v);
                        "m2"
                    }
                    "t-ref" => {
                        self.t_ref = Some(v);
                        "t-ref"
                    }
                    "q-ref" => {
                        self.q_ref = Some(v);
                        "q-ref"
                    }
                    _ => {
                        self.t = Some(v);
                        "t"
                    }
                }
            }
            "s" | "s1" | "s2" => {
                if value.is_empty() {
                    return Ok(());
                }
                let slot = match entry.key.as_str() {
                    "s" => &mut self.s,
                    "s1" => &mut self.s1,
                    _ => &mut self.s2,
                };
                *slot = Some(value.to_string());
                match entry.key.as_str() {
                    "s" => "s",
                    "s1" => "s1",
                    _ => "s2",
                }
            }
            _ => return Ok(()),
        };

        if self.defined.contains(&key) {
            return Err(ValidationError::DuplicateKey {
                key: key.to_string(),
                line: entry.line,
            });
        }
        self.defined.push(key);
        Ok(())
    }

    fn conditions(&self) -> Conditions {
        Conditions {
            t_ref: self.t_ref,
            q_ref: self.q_ref,
            t: self.t,
        }
    }
}

fn invalid(entry: &Entry, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: entry.key.clone(),
        value: entry.value.clone(),
        reason: reason.to_string(),
    }
}

fn parse_positive(entry: &Entry) -> Result<f64, ValidationError> {
    match entry.value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(entry, "must be a positive number")),
    }
}

/// `a : b` normalised to `y1 = round(a / (a + b), 3)`, `y2 = 1 - y1`.
/// An empty value means `1 : 1`.
fn parse_ratio(entry: &Entry) -> Result<(f64, f64), ValidationError> {
    let value: String = entry.value.chars().filter(|c| !c.is_whitespace()).collect();
    let (a, b) = if value.is_empty() {
        (1.0, 1.0)
    } else {
        let (a, b) = value
            .split_once(':')
            .ok_or_else(|| invalid(entry, "expected 'a : b'"))?;
        let parse = |s: &str| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0 && round_to(*v, 5) != 0.0)
                .ok_or_else(|| invalid(entry, "both parts must be positive numbers"))
        };
        (parse(a)?, parse(b)?)
    };
    let y1 = round_to(a / (a + b), 3);
    if !(y1 > 0.0 && y1 < 1.0) {
        return Err(invalid(entry, "ratio leaves a component with no share"));
    }
    Ok((y1, 1.0 - y1))
}

fn parse_count(entry: &Entry) -> Result<u32, ValidationError> {
    if entry.value.is_empty() {
        return Ok(1);
    }
    let n: i64 = entry
        .value
        .parse()
        .map_err(|_| invalid(entry, "group count is not a number"))?;
    u32::try_from(n)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| invalid(entry, "group count must be at least 1"))
}

/// Group lines collected under one `mark`.
#[derive(Debug)]
struct Block {
    name: String,
    groups: Vec<(String, u32)>,
}

impl Block {
    fn is_ring(&self) -> bool {
        self.name.starts_with("ring")
    }
}

fn collect(entries: &[Entry]) -> Result<(Scalars, Vec<Block>), ValidationError> {
    if let Some(last) = entries.last()
        && last.is_mark()
    {
        return Err(ValidationError::TrailingMark { line: last.line });
    }

    let mut scalars = Scalars::default();
    let mut blocks: Vec<Block> = Vec::new();
    let mut marks = HashSet::new();

    for entry in entries {
        if entry.is_mark() {
            if entry.value.is_empty() {
                return Err(ValidationError::EmptyMark { line: entry.line });
            }
            if let Some(prev) = blocks.last()
                && prev.groups.is_empty()
            {
                return Err(ValidationError::EmptyBlock {
                    block: prev.name.clone(),
                });
            }
            let name = entry.value.to_lowercase();
            if !marks.insert(name.clone()) {
                return Err(ValidationError::DuplicateMark {
                    block: name,
                    line: entry.line,
                });
            }
            blocks.push(Block {
                name,
                groups: Vec::new(),
            });
        } else if is_scalar_key(&entry.key) {
            scalars.apply(entry)?;
        } else {
            let Some(block) = blocks.last_mut() else {
                return Err(ValidationError::GroupOutsideMark {
                    symbol: entry.key.clone(),
                    line: entry.line,
                });
            };
            if block.groups.iter().any(|(s, _)| *s == entry.key) {
                return Err(ValidationError::DuplicateGroup {
                    symbol: entry.key.clone(),
                    block: block.name.clone(),
                    line: entry.line,
                });
            }
            block.groups.push((entry.key.clone(), parse_count(entry)?));
        }
    }

    if let Some(last) = blocks.last()
        && last.groups.is_empty()
    {
        return Err(ValidationError::EmptyBlock {
            block: last.name.clone(),
        });
    }

    Ok((scalars, blocks))
}

fn infer_kind(blocks: &[Block]) -> Option<CalcKind> {
    let has = |name: &str| blocks.iter().any(|b| b.name == name);
    if has("ring") || has("no-ring") {
        Some(CalcKind::Purity)
    } else if ["ring-1", "ring-2", "no-ring-1", "no-ring-2"]
        .iter()
        .any(|n| has(n))
    {
        Some(CalcKind::Mixture)
    } else {
        None
    }
}

/// Groups of the given ring/non-ring blocks, ring block first.
fn groups_of(blocks: &[Block], ring: &str, non_ring: &str) -> Vec<GroupSpec> {
    let mut selected: Vec<&Block> = blocks
        .iter()
        .filter(|b| b.name == ring || b.name == non_ring)
        .collect();
    selected.sort_by_key(|b| !b.is_ring());
    selected
        .into_iter()
        .flat_map(|b| {
            let ring = b.is_ring();
            b.groups.iter().map(move |(symbol, count)| GroupSpec {
                symbol: symbol.clone(),
                ring,
                count: *count,
            })
        })
        .collect()
}

fn molar_mass(
    given: Option<f64>,
    formula: &Option<String>,
    component: &'static str,
) -> Result<MolarMassSource, ValidationError> {
    match (given, formula) {
        (Some(m), _) => Ok(MolarMassSource::Given(m)),
        (None, Some(s)) => Ok(MolarMassSource::Formula(s.clone())),
        (None, None) => Err(ValidationError::MissingMolarMass { component }),
    }
}

fn component(
    blocks: &[Block],
    ring: &str,
    non_ring: &str,
    component: &'static str,
) -> Result<Vec<GroupSpec>, ValidationError> {
    let groups = groups_of(blocks, ring, non_ring);
    if groups.is_empty() {
        return Err(ValidationError::MissingGroups { component });
    }
    Ok(groups)
}

/// Validate lexed entries and build the typed configuration.
pub fn build_config(entries: &[Entry]) -> Result<CalcConfig, ValidationError> {
    let (scalars, blocks) = collect(entries)?;

    let kind = scalars
        .kind
        .or_else(|| infer_kind(&blocks))
        .ok_or(ValidationError::UndeterminedKind)?;

    let keys = scalars
        .defined
        .iter()
        .copied()
        .chain(blocks.iter().map(|b| b.name.as_str()));
    for key in keys {
        if !in_namespace(kind, key) {
            return Err(ValidationError::OutOfNamespace {
                kind,
                key: key.to_string(),
            });
        }
    }

    let conditions = scalars.conditions();
    let config = match kind {
        CalcKind::Purity => CalcConfig::Purity(PurityConfig {
            name: scalars.name.clone(),
            molar_mass: molar_mass(scalars.m, &scalars.s, "the molecule")?,
            groups: component(&blocks, "ring", "no-ring", "the molecule")?,
            conditions,
        }),
        CalcKind::Mixture => {
            let first = ComponentSpec {
                molar_mass: molar_mass(scalars.m1, &scalars.s1, "molecule 1")?,
                groups: component(&blocks, "ring-1", "no-ring-1", "molecule 1")?,
            };
            let second = ComponentSpec {
                molar_mass: molar_mass(scalars.m2, &scalars.s2, "molecule 2")?,
                groups: component(&blocks, "ring-2", "no-ring-2", "molecule 2")?,
            };
            CalcConfig::Mixture(MixtureConfig {
                name: scalars.name.clone(),
                components: [first, second],
                fractions: scalars.fractions.unwrap_or(EQUIMOLAR),
                conditions,
            })
        }
    };

    debug!(%kind, blocks = blocks.len(), "validated input");
    Ok(config)
}
