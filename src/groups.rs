//! Sub molecule detection and flattening.
//!
//! A sub molecule is an opening bracket, a run of word characters, a
//! closing bracket and an optional multiplier: `(OH)2`, `[SO3]`, `{Ci2}10`.
//! Because the interior cannot hold another bracket, only innermost groups
//! match; outer levels become visible once the inner ones are rewritten.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::atoms::{apply_multiplier, parse_count};
use crate::enclosure::Enclosure;
use crate::error::{EnclosureMismatch, FormulaError};

/// An innermost sub molecule and its flat rewrite.
///
/// For `Mg(OH)2` the pattern is `(OH)2`, the molecule `OH`, the multiplier
/// `2` and the expansion `O2H2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedMolecule {
    pub pattern: String,
    pub molecule: String,
    pub multiplier: u64,
    pub expansion: String,
}

/// Distinct sub molecules keyed by their literal pattern, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubMolecules {
    entries: Vec<MatchedMolecule>,
    index: HashMap<String, usize>,
}

impl SubMolecules {
    pub fn get(&self, pattern: &str) -> Option<&MatchedMolecule> {
        self.index.get(pattern).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchedMolecule> {
        self.entries.iter()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.pattern.as_str())
    }

    fn contains(&self, pattern: &str) -> bool {
        self.index.contains_key(pattern)
    }

    fn insert(&mut self, matched: MatchedMolecule) {
        self.index.insert(matched.pattern.clone(), self.entries.len());
        self.entries.push(matched);
    }
}

impl<'a> IntoIterator for &'a SubMolecules {
    type Item = &'a MatchedMolecule;
    type IntoIter = std::slice::Iter<'a, MatchedMolecule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A bracketed span found by [`GroupScanner`], not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawGroup<'a> {
    /// Byte offset of the opening bracket.
    start: usize,
    pattern: &'a str,
    enclosure: Enclosure,
    open: char,
    molecule: &'a str,
    close: char,
    multiplier: &'a str,
}

/// Left-to-right, non-overlapping scan for bracket-free groups.
///
/// A candidate opening bracket is dropped when its word run is followed by
/// anything other than a closing bracket, e.g. another opening bracket.
struct GroupScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> GroupScanner<'a> {
    fn new(text: &'a str) -> Self {
        GroupScanner { text, pos: 0 }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte length of the prefix of `s` whose chars satisfy `pred`.
fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c: char| !pred(c)).unwrap_or(s.len())
}

impl<'a> Iterator for GroupScanner<'a> {
    type Item = RawGroup<'a>;

    fn next(&mut self) -> Option<RawGroup<'a>> {
        let text = self.text;
        while self.pos < text.len() {
            let offset = text[self.pos..].find(|c: char| Enclosure::from_open(c).is_some())?;
            let start = self.pos + offset;
            let open = text[start..].chars().next()?;
            let enclosure = Enclosure::from_open(open)?;

            let interior_start = start + open.len_utf8();
            let interior_end = interior_start + run_len(&text[interior_start..], is_word_char);

            match text[interior_end..].chars().next() {
                Some(close) if Enclosure::from_close(close).is_some() => {
                    let digits_start = interior_end + close.len_utf8();
                    let end =
                        digits_start + run_len(&text[digits_start..], |c| c.is_ascii_digit());
                    self.pos = end;
                    return Some(RawGroup {
                        start,
                        pattern: &text[start..end],
                        enclosure,
                        open,
                        molecule: &text[interior_start..interior_end],
                        close,
                        multiplier: &text[digits_start..end],
                    });
                }
                _ => self.pos = interior_end,
            }
        }
        None
    }
}

/// Find the innermost sub molecules of `formula` and compute their rewrites.
///
/// Identical patterns collapse into a single entry. The first group whose
/// brackets do not pair up aborts the scan.
pub fn find_innermost_groups(formula: &str) -> Result<SubMolecules, FormulaError> {
    let mut sub_molecules = SubMolecules::default();

    for group in GroupScanner::new(formula) {
        if Enclosure::from_close(group.close) != Some(group.enclosure) {
            return Err(EnclosureMismatch {
                pattern: group.pattern.to_string(),
                open: group.open,
                molecule: group.molecule.to_string(),
                close: group.close,
                multiplier: group.multiplier.to_string(),
                enclosure: group.enclosure,
            }
            .into());
        }
        if sub_molecules.contains(group.pattern) {
            continue;
        }

        let multiplier = parse_count(group.multiplier, 1)?;
        sub_molecules.insert(MatchedMolecule {
            pattern: group.pattern.to_string(),
            molecule: group.molecule.to_string(),
            multiplier,
            expansion: apply_multiplier(group.molecule, multiplier)?,
        });
    }

    Ok(sub_molecules)
}

/// Rewrite every sub molecule of `formula` until no bracket group is left.
///
/// ```
/// use molecule_parser::groups::resolve;
///
/// assert_eq!(resolve("K4[ON(SO3)2]2").unwrap(), "K4O2N2S4O12");
/// ```
pub fn resolve(formula: &str) -> Result<String, FormulaError> {
    let openings = formula
        .chars()
        .filter(|&c| Enclosure::from_open(c).is_some())
        .count();
    resolve_within(formula, openings)
}

/// Same as [`resolve`], failing once more than `max_passes` rewrites are needed.
pub fn resolve_within(formula: &str, max_passes: usize) -> Result<String, FormulaError> {
    let mut molecule = formula.to_string();
    let mut passes = 0;

    loop {
        let sub_molecules = find_innermost_groups(&molecule)?;
        if sub_molecules.is_empty() {
            return Ok(molecule);
        }
        if passes == max_passes {
            return Err(FormulaError::PassLimitExceeded { limit: max_passes });
        }
        passes += 1;
        debug!(pass = passes, groups = sub_molecules.len(), "rewriting sub molecules");
        molecule = substitute_first_groups(&molecule, &sub_molecules);
    }
}

/// Replace the first whole group of each distinct pattern with its expansion.
///
/// Offsets come from the scanner, so `(H)` never matches the front of `(H)2`.
fn substitute_first_groups(molecule: &str, sub_molecules: &SubMolecules) -> String {
    let mut rewritten = String::with_capacity(molecule.len());
    let mut seen = HashSet::new();
    let mut copied = 0;

    for group in GroupScanner::new(molecule) {
        if !seen.insert(group.pattern) {
            continue;
        }
        let Some(sub) = sub_molecules.get(group.pattern) else {
            continue;
        };
        trace!(pattern = %sub.pattern, expansion = %sub.expansion, "substituting");
        rewritten.push_str(&molecule[copied..group.start]);
        rewritten.push_str(&sub.expansion);
        copied = group.start + group.pattern.len();
    }

    rewritten.push_str(&molecule[copied..]);
    rewritten
}
