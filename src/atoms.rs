//! Atom extraction over flat molecule segments.
//!
//! An atom is an uppercase letter followed by any run of lowercase letters,
//! optionally followed by a count (`H2`, `O`, `Ci1`). Anything else in the
//! segment is skipped rather than rejected.

use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

use crate::error::FormulaError;

static ATOM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]*)([0-9]*)").unwrap());

/// One atom matched in a segment, borrowed from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom<'a> {
    /// Full matched text, symbol and count together.
    pub token: &'a str,
    pub symbol: &'a str,
    /// Literal digits after the symbol, empty when the count is implicit.
    pub count: &'a str,
}

impl Atom<'_> {
    /// Numeric count of the atom; an empty suffix counts as one.
    pub fn count(&self) -> Result<u64, FormulaError> {
        parse_count(self.count, 1)
    }
}

/// Lazy left-to-right scan of the atoms in a segment.
///
/// Call [`extract_atoms`] again to restart from the beginning.
pub struct Atoms<'a> {
    captures: CaptureMatches<'static, 'a>,
}

impl<'a> Iterator for Atoms<'a> {
    type Item = Atom<'a>;

    fn next(&mut self) -> Option<Atom<'a>> {
        let caps = self.captures.next()?;
        let token = caps.get(0)?.as_str();
        let symbol = caps.get(1)?.as_str();
        let count = caps.get(2).map_or("", |m| m.as_str());
        Some(Atom {
            token,
            symbol,
            count,
        })
    }
}

pub fn extract_atoms(segment: &str) -> Atoms<'_> {
    Atoms {
        captures: ATOM_REGEX.captures_iter(segment),
    }
}

/// Rewrite `segment` with every atom count multiplied by `multiplier`.
///
/// Counts are always written out, so `apply_multiplier("OH", 1)` gives
/// `"O1H1"`. A segment without any atom yields an empty string.
///
/// ```
/// use molecule_parser::atoms::apply_multiplier;
///
/// assert_eq!(apply_multiplier("SO3", 2).unwrap(), "S2O6");
/// ```
pub fn apply_multiplier(segment: &str, multiplier: u64) -> Result<String, FormulaError> {
    let mut updated = String::with_capacity(segment.len() * 2);
    for atom in extract_atoms(segment) {
        let count = atom
            .count()?
            .checked_mul(multiplier)
            .ok_or_else(|| FormulaError::CountOverflow {
                text: atom.token.to_string(),
            })?;
        updated.push_str(atom.symbol);
        updated.push_str(&count.to_string());
    }
    Ok(updated)
}

/// Parse a run of ASCII digits, `default` when the run is empty.
pub(crate) fn parse_count(digits: &str, default: u64) -> Result<u64, FormulaError> {
    if digits.is_empty() {
        return Ok(default);
    }
    digits
        .parse::<u64>()
        .map_err(|_| FormulaError::CountOverflow {
            text: digits.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(segment: &str) -> Vec<(&str, &str, &str)> {
        extract_atoms(segment)
            .map(|a| (a.token, a.symbol, a.count))
            .collect()
    }

    #[test]
    fn test_extract_atoms() {
        assert_eq!(
            triples("H2OCi1"),
            vec![("H2", "H", "2"), ("O", "O", ""), ("Ci1", "Ci", "1")]
        );
    }

    #[test]
    fn test_extract_atoms_no_match() {
        assert!(triples("nop").is_empty());
        assert!(triples("").is_empty());
        assert!(triples("123 +-").is_empty());
    }

    #[test]
    fn test_extract_atoms_skips_brackets() {
        assert_eq!(
            triples("Mg(OH)2"),
            vec![("Mg", "Mg", ""), ("O", "O", ""), ("H", "H", "")]
        );
    }

    #[test]
    fn test_extract_atoms_is_restartable() {
        let segment = "NaCl";
        let first: Vec<_> = extract_atoms(segment).collect();
        let second: Vec<_> = extract_atoms(segment).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_atom_count() {
        let atoms: Vec<_> = extract_atoms("C12H").collect();
        assert_eq!(atoms[0].count().unwrap(), 12);
        assert_eq!(atoms[1].count().unwrap(), 1);
    }

    #[test]
    fn test_atom_count_overflow() {
        let atom = extract_atoms("H99999999999999999999999").next().unwrap();
        assert!(matches!(
            atom.count(),
            Err(FormulaError::CountOverflow { .. })
        ));
    }

    #[test]
    fn test_apply_multiplier() {
        assert_eq!(apply_multiplier("OH", 2).unwrap(), "O2H2");
        assert_eq!(apply_multiplier("SO3", 2).unwrap(), "S2O6");
        assert_eq!(apply_multiplier("CiOh2", 3).unwrap(), "Ci3Oh6");
    }

    #[test]
    fn test_apply_multiplier_normalizes_counts() {
        assert_eq!(apply_multiplier("H2O", 1).unwrap(), "H2O1");
        assert_eq!(apply_multiplier("O02", 1).unwrap(), "O2");
    }

    #[test]
    fn test_apply_multiplier_zero() {
        assert_eq!(apply_multiplier("OH", 0).unwrap(), "O0H0");
    }

    #[test]
    fn test_apply_multiplier_no_atoms() {
        assert_eq!(apply_multiplier("oops", 2).unwrap(), "");
        assert_eq!(apply_multiplier("", 5).unwrap(), "");
    }

    #[test]
    fn test_apply_multiplier_overflow() {
        let err = apply_multiplier("H9999999999", 9_999_999_999).unwrap_err();
        assert_eq!(
            err,
            FormulaError::CountOverflow {
                text: "H9999999999".to_string()
            }
        );
    }
}
