/// Limits applied while flattening a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Maximum number of rewriting passes over the formula.
    ///
    /// `None` bounds flattening by the formula itself: every pass removes
    /// at least one bracket pair, so it never needs more passes than the
    /// formula has opening brackets. Byte-identical groups are substituted
    /// one per pass, so `Mg(OH)2Mg(OH)2` takes two passes.
    pub max_passes: Option<usize>,
}

impl ParserConfig {
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }
}
