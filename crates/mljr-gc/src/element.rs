//! Elements supported by the formula parser.

use serde::Serialize;
use std::fmt;

/// Periodic table subset for organic solvents and ionic liquids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    P,
    S,
    Cl,
    Br,
    I,
}

impl Element {
    pub const ALL: [Element; 11] = [
        Element::H,
        Element::B,
        Element::C,
        Element::N,
        Element::O,
        Element::F,
        Element::P,
        Element::S,
        Element::Cl,
        Element::Br,
        Element::I,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
        }
    }

    /// Atomic weight [g/mol] as tabulated by the method.
    pub fn atomic_weight(&self) -> f64 {
        match self {
            Element::H => 1.008,
            Element::B => 10.81,
            Element::C => 12.01,
            Element::N => 14.01,
            Element::O => 16.00,
            Element::F => 19.00,
            Element::P => 30.91,
            Element::S => 32.06,
            Element::Cl => 35.45,
            Element::Br => 79.90,
            Element::I => 126.90,
        }
    }

    /// Case-insensitive symbol lookup.
    pub fn from_symbol(symbol: &str) -> Option<Element> {
        Self::ALL
            .into_iter()
            .find(|e| e.symbol().eq_ignore_ascii_case(symbol))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for e in Element::ALL {
            assert_eq!(Element::from_symbol(e.symbol()), Some(e));
            assert_eq!(Element::from_symbol(&e.symbol().to_uppercase()), Some(e));
        }
        assert_eq!(Element::from_symbol("Xe"), None);
        assert_eq!(Element::from_symbol("l"), None);
    }
}
