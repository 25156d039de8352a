use counter::Counter;
use tracing::debug;

use crate::atoms::extract_atoms;
use crate::config::ParserConfig;
use crate::error::FormulaError;
use crate::groups::{resolve, resolve_within};

/// Atom symbol to total count over the whole formula.
pub type Composition = Counter<String, u64>;

/// Formula parser carrying its flattening limits.
#[derive(Debug, Clone, Default)]
pub struct MoleculeParser {
    config: ParserConfig,
}

impl MoleculeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        MoleculeParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Flatten every sub molecule of `formula`.
    pub fn resolve(&self, formula: &str) -> Result<String, FormulaError> {
        match self.config.max_passes {
            Some(max_passes) => resolve_within(formula, max_passes),
            None => resolve(formula),
        }
    }

    /// Count the atoms of `formula`.
    ///
    /// Sub molecules are rewritten first, then the flat result is scanned
    /// once. Text that is not an atom is ignored, so an empty or atom-free
    /// formula gives an empty composition.
    pub fn parse(&self, formula: &str) -> Result<Composition, FormulaError> {
        let molecule = self.resolve(formula)?;

        let mut composition = Composition::new();
        for atom in extract_atoms(&molecule) {
            let count = atom.count()?;
            let total = composition.entry(atom.symbol.to_string()).or_insert(0);
            *total = total
                .checked_add(count)
                .ok_or_else(|| FormulaError::CountOverflow {
                    text: atom.token.to_string(),
                })?;
        }

        debug!(formula, flattened = %molecule, symbols = composition.len(), "parsed molecule");
        Ok(composition)
    }
}

/// Get the atom composition of a formula with the default limits.
///
/// # Examples
/// ```
/// let composition = molecule_parser::parse("K4[ON(SO3)2]2").unwrap();
/// assert_eq!(*composition.get("K").unwrap(), 4);
/// assert_eq!(*composition.get("O").unwrap(), 14);
/// assert_eq!(*composition.get("N").unwrap(), 2);
/// assert_eq!(*composition.get("S").unwrap(), 4);
/// ```
pub fn parse(formula: &str) -> Result<Composition, FormulaError> {
    MoleculeParser::new().parse(formula)
}
