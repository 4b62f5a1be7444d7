//! mLJR group parameter tables.
//!
//! Coefficients from Valderrama et al., Ind. Eng. Chem. Res. 2008, 47, 8416-8422
//! and Mirza et al., J. Chem. Eng. Data 2015, 60, 1844-1854.
//!
//! Ring and non-ring groups live in separate namespaces: `-CH2-` in a ring and
//! `-CH2-` in a chain are different groups with different coefficients.
//! The symbol `@` marks a carbon with three bonds.

use crate::error::{GcError, GcResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Which group namespace a symbol is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    Ring,
    NonRing,
}

impl GroupKind {
    pub fn from_ring(ring: bool) -> Self {
        if ring { Self::Ring } else { Self::NonRing }
    }

    pub fn is_ring(self) -> bool {
        matches!(self, Self::Ring)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ring => write!(f, "ring"),
            Self::NonRing => write!(f, "no-ring"),
        }
    }
}

/// Per-group contributions `(ΔTb, ΔT, ΔP, ΔV)`.
///
/// `d_tb` is `None` for groups without a boiling-point contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contributions {
    pub d_tb: Option<f64>,
    pub d_t: f64,
    pub d_p: f64,
    pub d_v: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupRecord {
    pub symbol: &'static str,
    pub aliases: &'static [&'static str],
    pub contributions: Contributions,
}

impl GroupRecord {
    /// Canonical symbol followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.symbol).chain(self.aliases.iter().copied())
    }
}

const fn g(
    symbol: &'static str,
    aliases: &'static [&'static str],
    d_tb: Option<f64>,
    d_t: f64,
    d_p: f64,
    d_v: f64,
) -> GroupRecord {
    GroupRecord {
        symbol,
        aliases,
        contributions: Contributions {
            d_tb,
            d_t,
            d_p,
            d_v,
        },
    }
}

#[rustfmt::skip]
static NON_RING_GROUPS: [GroupRecord; 31] = [
    g("-CH3",  &["methyl"],                     Some(23.58),  0.0275,  0.3031,  66.81),
    g("-CH2-", &[],                             Some(22.88),  0.0159,  0.2165,  57.11),
    g(">CH-",  &[],                             Some(21.74),  0.0002,  0.1140,  45.70),
    g(">C<",   &["[>C-]-"],                     Some(18.18), -0.0206,  0.0539,  21.78),
    g("=CH2",  &[],                             Some(24.96),  0.0170,  0.2493,  60.37),
    g("=CH-",  &[],                             Some(18.25),  0.0182,  0.1866,  49.92),
    g("=C<",   &[],                             Some(24.14), -0.0003,  0.0832,  34.90),
    g("=C=",   &[],                             Some(26.15), -0.0029,  0.0934,  33.85),
    g("@CH",   &[],                             None,         0.0078,  0.1429,  43.97),
    g("@C-",   &[],                             None,         0.0078,  0.1429,  43.97),
    g("-OH",   &["alcohol"],                    Some(92.88),  0.0723,  0.1343,  30.40),
    g("-O-",   &["[-O]-", "ether"],             Some(22.42),  0.0051,  0.1300,  15.61),
    g(">C=O",  &["ketone"],                     Some(94.97),  0.0247,  0.2341,  69.76),
    g("-CHO",  &["aldehyde"],                   Some(72.24),  0.0294,  0.3128,  77.46),
    g("-COOH", &["acid"],                       Some(169.06), 0.0853,  0.4537,  88.60),
    g("-COO-", &["ester"],                      Some(81.10),  0.0377,  0.4139,  84.76),
    g("HCOO-", &["formate"],                    None,         0.0360,  0.4752,  97.77),
    g("=O",    &["oxide"],                      Some(-10.50), 0.0273,  0.2042,  44.03),
    g("-NH2",  &["amine"],                      Some(73.23),  0.0364,  0.1692,  49.10),
    g(">NH",   &[],                             Some(50.17),  0.0119,  0.0322,  78.96),
    g(">N-",   &["[>N<]+", "Ammonium"],         Some(11.74), -0.0028,  0.0304,  26.70),
    g("-N=",   &[],                             Some(74.60),  0.0172,  0.1541,  45.54),
    g("-CN",   &["nitrile"],                    Some(125.66), 0.0506,  0.3697,  89.32),
    g("-NO2",  &["nitrate"],                    Some(152.54), 0.0448,  0.4529, 123.62),
    g("-F",    &["[F-]", "F-", "Fluoro"],       Some(-0.03),  0.0228,  0.2912,  31.47),
    g("-Cl",   &["[Cl-]", "Cl-", "Chloro"],     Some(38.13),  0.0188,  0.3738,  62.08),
    g("-Br",   &["[Br-]", "Br-", "Bromo"],      Some(66.86),  0.0124,  0.5799,  76.60),
    g("-I",    &["[I-]", "I-", "Iodo"],         Some(93.84),  0.0148,  0.9174, 100.79),
    g("-B",    &["Boron"],                      Some(-24.56), 0.0352,  0.0348,  22.45),
    g("-P",    &["Phosphoro"],                  Some(34.86), -0.0084,  0.1776,  67.01),
    g("-SO2",  &["sulfoxide"],                  Some(147.24),-0.0563, -0.0606, 112.19),
];

#[rustfmt::skip]
static RING_GROUPS: [GroupRecord; 11] = [
    g("-CH2-", &[],          Some(27.15),  0.0116,  0.1982,  51.64),
    g(">CH-",  &[],          Some(21.78),  0.0081,  0.1773,  30.56),
    g("=CH-",  &[],          Some(26.73),  0.0114,  0.1693,  42.55),
    g(">C<",   &[],          Some(21.32), -0.0180,  0.0139,  17.62),
    g("=C<",   &[],          Some(31.01),  0.0051,  0.0955,  31.28),
    g("-O-",   &[],          Some(31.22),  0.0138,  0.1371,  17.41),
    g("-OH",   &["phenol"],  Some(76.34),  0.0291,  0.0493, -17.44),
    g(">C=O",  &[],          Some(94.97),  0.0343,  0.2751,  59.32),
    g(">NH",   &[],          Some(52.82),  0.0244,  0.0724,  27.61),
    // Paper 2 lists a different value for this group.
    g(">N-",   &[],          Some(68.16),  0.0063,  0.0538,  25.17),
    g("-N=",   &[],          Some(57.55), -0.0011,  0.0559,  42.15),
];

static RING: LazyLock<GroupTable> =
    LazyLock::new(|| GroupTable::build(GroupKind::Ring, &RING_GROUPS));
static NON_RING: LazyLock<GroupTable> =
    LazyLock::new(|| GroupTable::build(GroupKind::NonRing, &NON_RING_GROUPS));

/// Read-only registry of one group namespace.
///
/// Every symbol and alias is indexed lower-cased, so lookups are
/// case-insensitive and do not scan alias lists.
#[derive(Debug)]
pub struct GroupTable {
    kind: GroupKind,
    records: &'static [GroupRecord],
    index: HashMap<String, usize>,
}

impl GroupTable {
    fn build(kind: GroupKind, records: &'static [GroupRecord]) -> Self {
        let mut index = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            for name in record.names() {
                index.entry(normalize(name)).or_insert(i);
            }
        }
        Self {
            kind,
            records,
            index,
        }
    }

    pub fn ring() -> &'static GroupTable {
        &RING
    }

    pub fn non_ring() -> &'static GroupTable {
        &NON_RING
    }

    pub fn of_kind(kind: GroupKind) -> &'static GroupTable {
        match kind {
            GroupKind::Ring => Self::ring(),
            GroupKind::NonRing => Self::non_ring(),
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Resolve a symbol or alias (case-insensitive).
    pub fn lookup(&self, name: &str) -> GcResult<&'static GroupRecord> {
        let records = self.records;
        self.index
            .get(&normalize(name))
            .map(|&i| &records[i])
            .ok_or_else(|| GcError::UnknownGroup {
                symbol: name.trim().to_string(),
                kind: self.kind,
            })
    }

    /// All groups of this namespace, in table order.
    pub fn records(&self) -> impl Iterator<Item = &'static GroupRecord> {
        let records: &'static [GroupRecord] = self.records;
        records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolve `symbol` in the ring (`ring = true`) or non-ring namespace.
pub fn lookup(symbol: &str, ring: bool) -> GcResult<&'static GroupRecord> {
    GroupTable::of_kind(GroupKind::from_ring(ring)).lookup(symbol)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_within_each_namespace() {
        for table in [GroupTable::ring(), GroupTable::non_ring()] {
            let mut seen = HashSet::new();
            for record in table.records() {
                for name in record.names() {
                    assert!(
                        seen.insert(normalize(name)),
                        "duplicate {} name {name}",
                        table.kind()
                    );
                }
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_accepts_aliases() {
        let methyl = lookup("-CH3", false).unwrap();
        assert_eq!(lookup("METHYL", false).unwrap(), methyl);
        assert_eq!(lookup("  -ch3 ", false).unwrap(), methyl);

        let ammonium = lookup("ammonium", false).unwrap();
        assert_eq!(ammonium.symbol, ">N-");
        assert_eq!(lookup("[>n<]+", false).unwrap().symbol, ">N-");
    }

    #[test]
    fn ring_and_non_ring_are_separate_namespaces() {
        let chain = lookup("-CH2-", false).unwrap();
        let ring = lookup("-CH2-", true).unwrap();
        assert_ne!(chain.contributions, ring.contributions);
        assert_eq!(ring.contributions.d_tb, Some(27.15));

        assert_eq!(lookup("phenol", true).unwrap().symbol, "-OH");
        let err = lookup("phenol", false).unwrap_err();
        assert_eq!(
            err,
            GcError::UnknownGroup {
                symbol: "phenol".into(),
                kind: GroupKind::NonRing
            }
        );
    }

    #[test]
    fn unknown_symbol_reports_namespace() {
        let err = lookup("-CH3", true).unwrap_err();
        assert!(matches!(
            err,
            GcError::UnknownGroup {
                kind: GroupKind::Ring,
                ..
            }
        ));
    }

    #[test]
    fn tri_valent_carbons_have_no_boiling_contribution() {
        assert_eq!(lookup("@CH", false).unwrap().contributions.d_tb, None);
        assert_eq!(lookup("@C-", false).unwrap().contributions.d_tb, None);
        assert_eq!(lookup("formate", false).unwrap().contributions.d_tb, None);
    }

    #[test]
    fn table_sizes() {
        assert_eq!(GroupTable::non_ring().len(), 31);
        assert_eq!(GroupTable::ring().len(), 11);
    }
}
