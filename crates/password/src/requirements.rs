//! Caller supplied password requirements.
use crate::{CharacterClass, Error, PasswordClass, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

/// Largest number of distinct characters the sampler can index.
pub(crate) const MAX_ALPHABET_SIZE: usize = 255;

/// Bound on how often characters from a set may appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OccurrenceBound {
    /// Characters that are counted.
    pub characters: String,
    /// Threshold for the count.
    pub count: usize,
}

impl OccurrenceBound {
    /// Create an occurrence bound.
    pub fn new(characters: impl Into<String>, count: usize) -> Self {
        Self {
            characters: characters.into(),
            count,
        }
    }
}

/// Structural requirements for a generated credential.
///
/// Every field is optional; absent fields fall back to the
/// defaults of the [PasswordClass] being generated.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RawRequirements {
    /// Minimum number of random characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum number of random characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Alphabet to draw characters from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_characters: Option<String>,
    /// Sets that must each contribute at least one character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_character_sets: Option<Vec<CharacterClass>>,
    /// Characters that must never appear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallowed_characters: Option<String>,
    /// Prefix the credential must not start with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cannot_start_with: Option<String>,
    /// Suffix the credential must not end with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cannot_end_with: Option<String>,
    /// Characters in each display group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_size: Option<usize>,
    /// Number of display groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_groups: Option<usize>,
    /// Separator placed between groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Upper bound on occurrences of specific characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occurrences_of_specific_chars: Option<OccurrenceBound>,
    /// Lower bound on occurrences of specific characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_occurrences_of_specific_chars: Option<OccurrenceBound>,
    /// Longest permitted run of one repeated character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_consecutive_identical_chars: Option<usize>,
    /// Ignore every other field and use the class defaults.
    pub use_class_defaults: bool,
}

impl RawRequirements {
    /// Create empty requirements.
    pub fn new() -> Self {
        Default::default()
    }

    /// Requirements that select the class defaults.
    pub fn class_defaults() -> Self {
        Self {
            use_class_defaults: true,
            ..Default::default()
        }
    }

    /// Parse requirements from JSON.
    ///
    /// Any shape error, including values of the wrong type, is
    /// reported as [Error::MalformedRequirements].
    pub fn from_json(value: &str) -> Result<Self> {
        serde_json::from_str(value).map_err(|e| Error::malformed(e.to_string()))
    }

    /// Load requirements from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().is_file() {
            return Err(Error::NotFile(path.as_ref().to_path_buf()));
        }
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Set the minimum length.
    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    /// Set the maximum length.
    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    /// Set an exact length.
    pub fn length(self, value: usize) -> Self {
        self.min_length(value).max_length(value)
    }

    /// Set the alphabet.
    pub fn allowed_characters(mut self, value: impl Into<String>) -> Self {
        self.allowed_characters = Some(value.into());
        self
    }

    /// Set the required character sets.
    pub fn required_character_sets(
        mut self,
        value: impl IntoIterator<Item = CharacterClass>,
    ) -> Self {
        self.required_character_sets = Some(value.into_iter().collect());
        self
    }

    /// Set the disallowed characters.
    pub fn disallowed_characters(mut self, value: impl Into<String>) -> Self {
        self.disallowed_characters = Some(value.into());
        self
    }

    /// Set the forbidden prefix.
    pub fn cannot_start_with(mut self, value: impl Into<String>) -> Self {
        self.cannot_start_with = Some(value.into());
        self
    }

    /// Set the forbidden suffix.
    pub fn cannot_end_with(mut self, value: impl Into<String>) -> Self {
        self.cannot_end_with = Some(value.into());
        self
    }

    /// Set the grouping.
    pub fn grouping(mut self, group_size: usize, number_of_groups: usize) -> Self {
        self.group_size = Some(group_size);
        self.number_of_groups = Some(number_of_groups);
        self
    }

    /// Set the group separator.
    pub fn separator(mut self, value: impl Into<String>) -> Self {
        self.separator = Some(value.into());
        self
    }

    /// Set the upper bound on occurrences of specific characters.
    pub fn max_occurrences(mut self, value: OccurrenceBound) -> Self {
        self.max_occurrences_of_specific_chars = Some(value);
        self
    }

    /// Set the lower bound on occurrences of specific characters.
    pub fn min_occurrences(mut self, value: OccurrenceBound) -> Self {
        self.min_occurrences_of_specific_chars = Some(value);
        self
    }

    /// Set the longest permitted run of identical characters.
    pub fn max_consecutive_identical(mut self, value: usize) -> Self {
        self.max_consecutive_identical_chars = Some(value);
        self
    }

    /// Check the requirements are well formed for a class.
    pub fn validate(&self, class: PasswordClass) -> Result<()> {
        if self.use_class_defaults {
            return Ok(());
        }

        if self.min_length == Some(0) {
            return Err(Error::malformed("min length must be at least 1"));
        }
        if self.max_length == Some(0) {
            return Err(Error::malformed("max length must be at least 1"));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(Error::malformed(format!(
                    "min length {} is greater than max length {}",
                    min, max
                )));
            }
        }

        if class == PasswordClass::Pin {
            let longest = self.min_length.max(self.max_length);
            if let Some(longest) = longest {
                if longest < 4 {
                    return Err(Error::malformed(
                        "a PIN must be at least 4 digits long",
                    ));
                }
            }
        }

        if let Some(allowed) = &self.allowed_characters {
            if allowed.is_empty() {
                return Err(Error::malformed(
                    "allowed characters must not be empty",
                ));
            }
            let distinct = allowed.chars().collect::<HashSet<_>>().len();
            if distinct > MAX_ALPHABET_SIZE {
                return Err(Error::malformed(format!(
                    "allowed characters has {} distinct characters, at most {} are supported",
                    distinct, MAX_ALPHABET_SIZE
                )));
            }
        }

        if let Some(sets) = &self.required_character_sets {
            if sets.is_empty() {
                return Err(Error::malformed(
                    "required character sets must not be empty",
                ));
            }
            if sets.iter().any(
                |set| matches!(set, CharacterClass::Custom(chars) if chars.is_empty()),
            ) {
                return Err(Error::malformed(
                    "custom required character set must not be empty",
                ));
            }
        }

        if self.group_size == Some(0) {
            return Err(Error::malformed("group size must be at least 1"));
        }
        if self.number_of_groups == Some(0) {
            return Err(Error::malformed(
                "number of groups must be at least 1",
            ));
        }
        if let Some(separator) = &self.separator {
            if separator.is_empty() {
                return Err(Error::malformed("separator must not be empty"));
            }
        }

        for (name, bound) in [
            ("max occurrences", &self.max_occurrences_of_specific_chars),
            ("min occurrences", &self.min_occurrences_of_specific_chars),
        ] {
            if let Some(bound) = bound {
                if bound.characters.is_empty() {
                    return Err(Error::malformed(format!(
                        "{} must name at least one character",
                        name
                    )));
                }
            }
        }

        if self.max_consecutive_identical_chars == Some(0) {
            return Err(Error::malformed(
                "max consecutive identical characters must be at least 1",
            ));
        }

        Ok(())
    }
}
