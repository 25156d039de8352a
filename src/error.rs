use thiserror::Error;

use crate::enclosure::Enclosure;

/// A sub molecule whose opening bracket is closed by a bracket of another kind.
///
/// Holds the raw pieces of the offending match so callers can report it,
/// e.g. for `K4[(SO32]2` the match is `(SO32]2` with `(`, `SO32`, `]`, `2`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "'{open}' in '{pattern}' is closed by '{close}', expected '{}' to close the {enclosure}",
    .enclosure.close()
)]
pub struct EnclosureMismatch {
    pub pattern: String,
    pub open: char,
    pub molecule: String,
    pub close: char,
    pub multiplier: String,
    /// The pair `open` belongs to.
    pub enclosure: Enclosure,
}

impl EnclosureMismatch {
    /// The closing character `open` actually requires.
    pub fn expected_close(&self) -> char {
        self.enclosure.close()
    }
}

/// Errors raised while parsing a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Open and close brackets of a sub molecule do not belong to the same pair.
    #[error("parsing issue with open and close sub molecule: {0}")]
    EnclosureMismatch(Box<EnclosureMismatch>),

    /// A count, a multiplier or a product of the two does not fit in a `u64`.
    #[error("atom count overflow near '{text}'")]
    CountOverflow { text: String },

    /// Flattening did not finish within the configured number of passes.
    #[error("sub molecules still unresolved after {limit} passes")]
    PassLimitExceeded { limit: usize },
}

impl From<EnclosureMismatch> for FormulaError {
    fn from(e: EnclosureMismatch) -> Self {
        Self::EnclosureMismatch(Box::new(e))
    }
}
