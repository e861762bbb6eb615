//! Character classes used to express required, counted and
//! entropy bucket membership.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal digits.
#[doc(hidden)]
pub const DIGITS: &str = "0123456789";

/// Named predicate over a single character.
///
/// The built-in classes are process wide constants; a
/// [CharacterClass::Custom] set owns its characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// Uppercase letters.
    Uppercase,
    /// Lowercase letters.
    Lowercase,
    /// Decimal digits `0-9`.
    Digit,
    /// ASCII punctuation and symbols as defined by
    /// [char::is_ascii_punctuation] (32 characters, `!` to `~`
    /// excluding letters and digits).
    ///
    /// Symbols such as `$`, `+`, `<`, `=`, `>`, `^`, `|` and `~` are
    /// included; with the Unicode punctuation category they would
    /// belong to no class and be invisible to required sets and the
    /// entropy estimate.
    Punctuation,
    /// Explicit set of characters.
    Custom(String),
}

impl CharacterClass {
    /// Create a custom class from a string of characters.
    pub fn custom(characters: impl Into<String>) -> Self {
        Self::Custom(characters.into())
    }

    /// Determine if a character belongs to this class.
    pub fn contains(&self, c: char) -> bool {
        match self {
            Self::Uppercase => c.is_uppercase(),
            Self::Lowercase => c.is_lowercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Punctuation => c.is_ascii_punctuation(),
            Self::Custom(chars) => chars.contains(c),
        }
    }

    /// Determine if any of the characters belong to this class.
    pub fn intersects(&self, chars: &[char]) -> bool {
        chars.iter().any(|c| self.contains(*c))
    }

    /// Count the characters that belong to this class.
    pub fn count(&self, chars: &[char]) -> usize {
        chars.iter().filter(|c| self.contains(**c)).count()
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uppercase => write!(f, "uppercase"),
            Self::Lowercase => write!(f, "lowercase"),
            Self::Digit => write!(f, "digit"),
            Self::Punctuation => write!(f, "punctuation"),
            Self::Custom(chars) => write!(f, "custom({})", chars),
        }
    }
}
