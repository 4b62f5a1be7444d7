//! Chemical formula parsing.
//!
//! A formula is a sequence of element symbols, each optionally followed by a
//! count: `C5H14NOCl`, `C5 H14 N O - Cl`, `Br Br BrBr`. Parsing is
//! case-insensitive; `-` and whitespace only separate tokens. `Br` and `Cl` are
//! matched before their single-letter prefixes, so `Cl2` is two chlorines.

use crate::element::Element;
use crate::error::{FormulaError, GcResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Element -> atom count.
pub type ElementCounts = BTreeMap<Element, u32>;

const TWO_LETTER: [&str; 2] = ["br", "cl"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Symbol(String),
    Count(String),
}

/// A parsed formula together with its molecular weight [g/mol].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formula {
    counts: ElementCounts,
    molar_mass: f64,
}

impl Formula {
    pub fn parse(input: &str) -> Result<Self, FormulaError> {
        let tokens = tokenize(input)?;
        let counts = pair_counts(&tokens)?;
        let molar_mass = counts
            .iter()
            .map(|(e, &n)| e.atomic_weight() * f64::from(n))
            .sum();
        Ok(Self { counts, molar_mass })
    }

    pub fn counts(&self) -> &ElementCounts {
        &self.counts
    }

    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    pub fn count(&self, element: Element) -> u32 {
        self.counts.get(&element).copied().unwrap_or(0)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse `formula` into element counts and molecular weight [g/mol].
pub fn parse_formula(formula: &str) -> GcResult<(ElementCounts, f64)> {
    let parsed = Formula::parse(formula)?;
    Ok((parsed.counts, parsed.molar_mass))
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let lower = input.to_lowercase();
    let mut tokens = Vec::new();

    for chunk in lower
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|c| !c.is_empty())
    {
        if let Some(ch) = chunk.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(FormulaError::InvalidCharacter {
                token: chunk.to_string(),
                ch,
            });
        }

        // Split at every letter/digit boundary.
        let bytes = chunk.as_bytes();
        let mut start = 0;
        while start < bytes.len() {
            let digits = bytes[start].is_ascii_digit();
            let end = bytes[start..]
                .iter()
                .position(|b| b.is_ascii_digit() != digits)
                .map_or(bytes.len(), |n| start + n);
            let run = &chunk[start..end];
            if digits {
                tokens.push(Token::Count(run.to_string()));
            } else {
                split_symbols(run, &mut tokens);
            }
            start = end;
        }
    }

    if tokens.is_empty() {
        return Err(FormulaError::Empty);
    }
    Ok(tokens)
}

/// Greedy left-to-right split of a lower-case letter run into symbols.
fn split_symbols(run: &str, tokens: &mut Vec<Token>) {
    let mut rest = run;
    while !rest.is_empty() {
        let width = if TWO_LETTER.iter().any(|s| rest.starts_with(s)) {
            2
        } else {
            1
        };
        tokens.push(Token::Symbol(rest[..width].to_string()));
        rest = &rest[width..];
    }
}

fn pair_counts(tokens: &[Token]) -> Result<ElementCounts, FormulaError> {
    if let Some(Token::Count(count)) = tokens.first() {
        return Err(FormulaError::LeadingCount {
            count: count.clone(),
        });
    }
    for pair in tokens.windows(2) {
        if let [Token::Count(_), Token::Count(count)] = pair {
            return Err(FormulaError::AdjacentCounts {
                count: count.clone(),
            });
        }
    }

    let mut counts = ElementCounts::new();
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        let Token::Symbol(symbol) = token else {
            continue;
        };
        let n = match iter.next_if(|t| matches!(t, Token::Count(_))) {
            Some(Token::Count(text)) => text
                .parse::<u32>()
                .map_err(|_| FormulaError::CountOverflow {
                    count: text.clone(),
                })?,
            _ => 1,
        };
        let element =
            Element::from_symbol(symbol).ok_or_else(|| FormulaError::UnknownElement {
                symbol: capitalize(symbol),
            })?;
        let slot = counts.entry(element).or_insert(0);
        *slot = slot
            .checked_add(n)
            .ok_or_else(|| FormulaError::CountOverflow {
                count: n.to_string(),
            })?;
    }
    Ok(counts)
}

fn capitalize(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn element() -> impl Strategy<Value = Element> {
        prop::sample::select(Element::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn weight_is_sum_of_atomic_weights(
            atoms in prop::collection::vec((element(), 1_u32..20), 1..8),
            sep in prop::sample::select(vec!["", " ", "-", " - "]),
        ) {
            let text: Vec<String> = atoms
                .iter()
                .map(|(e, n)| format!("{}{}", e.symbol(), n))
                .collect();
            let text = text.join(sep);
            let expected: f64 = atoms
                .iter()
                .map(|(e, n)| e.atomic_weight() * f64::from(*n))
                .sum();
            let parsed = Formula::parse(&text).unwrap();
            prop_assert!((parsed.molar_mass() - expected).abs() < 1e-9 * expected.max(1.0));
        }

        #[test]
        fn parse_never_panics(text in "\\PC{0,24}") {
            let _ = Formula::parse(&text);
        }
    }
}
