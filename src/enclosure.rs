use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// The bracket pairs a sub molecule can be enclosed by.
#[derive(EnumIter, Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enclosure {
    #[strum(serialize = "parentheses")]
    Paren,
    #[strum(serialize = "square brackets")]
    Bracket,
    #[strum(serialize = "braces")]
    Brace,
}

impl Enclosure {
    pub const fn open(self) -> char {
        match self {
            Enclosure::Paren => '(',
            Enclosure::Bracket => '[',
            Enclosure::Brace => '{',
        }
    }

    pub const fn close(self) -> char {
        match self {
            Enclosure::Paren => ')',
            Enclosure::Bracket => ']',
            Enclosure::Brace => '}',
        }
    }

    pub fn from_open(c: char) -> Option<Enclosure> {
        Enclosure::iter().find(|e| e.open() == c)
    }

    pub fn from_close(c: char) -> Option<Enclosure> {
        Enclosure::iter().find(|e| e.close() == c)
    }

    /// True for any opening or closing character of the three pairs.
    pub fn is_bracket(c: char) -> bool {
        Enclosure::iter().any(|e| e.open() == c || e.close() == c)
    }
}
