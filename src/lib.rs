//! Atom counting for chemical formulas.
//!
//! Formulas may nest sub molecules in `()`, `[]` or `{}`, each followed by
//! an optional multiplier, e.g. `K4[ON(SO3)2]2`. Sub molecules are rewritten
//! innermost first into flat text (`K4O2N2S4O12`), which is then scanned
//! for atoms.

pub mod atoms;
pub mod config;
pub mod enclosure;
pub mod error;
pub mod groups;
pub mod parser;

pub use config::ParserConfig;
pub use error::{EnclosureMismatch, FormulaError};
pub use parser::{parse, Composition, MoleculeParser};
