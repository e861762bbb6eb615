//! Canonical generation parameters derived from a class and
//! optional caller requirements.
use crate::{
    class::DEFAULT_SEPARATOR, requirements::MAX_ALPHABET_SIZE, CharacterClass,
    Error, Grouping, OccurrenceBound, PasswordClass, RawRequirements, Result,
};
use serde::Serialize;

/// Grouping together with the separator placed between groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupFormat {
    /// Size and count of the groups.
    #[serde(flatten)]
    pub grouping: Grouping,
    /// Separator between groups.
    pub separator: String,
}

impl GroupFormat {
    /// Create a group format.
    pub fn new(grouping: Grouping, separator: impl Into<String>) -> Self {
        Self {
            grouping,
            separator: separator.into(),
        }
    }

    /// Slice the characters into chunks joined by the separator.
    ///
    /// The last chunk is shorter when the number of characters is
    /// not a multiple of the group size.
    pub fn apply(&self, chars: &[char]) -> String {
        chars
            .chunks(self.grouping.group_size.max(1))
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Immutable parameters consumed by the generator.
///
/// Constructed once per request by [normalize] or through
/// [GenerationParametersBuilder].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    alphabet: String,
    length: usize,
    required_character_sets: Vec<CharacterClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disallowed_characters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cannot_start_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cannot_end_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<GroupFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_occurrences: Option<OccurrenceBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_occurrences: Option<OccurrenceBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_consecutive_identical: Option<usize>,
    use_default_format: bool,
}

impl GenerationParameters {
    /// Start building parameters from an alphabet and length.
    pub fn builder(
        alphabet: impl AsRef<str>,
        length: usize,
    ) -> GenerationParametersBuilder {
        GenerationParametersBuilder::new(alphabet, length)
    }

    /// De-duplicated alphabet.
    pub fn alphabet(&self) -> &str {
        &self.alphabet
    }

    /// Number of random characters.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Sets that must each contribute a character.
    pub fn required_character_sets(&self) -> &[CharacterClass] {
        &self.required_character_sets
    }

    /// Characters that must never be drawn.
    pub fn disallowed_characters(&self) -> Option<&str> {
        self.disallowed_characters.as_deref()
    }

    /// Forbidden prefix.
    pub fn cannot_start_with(&self) -> Option<&str> {
        self.cannot_start_with.as_deref()
    }

    /// Forbidden suffix.
    pub fn cannot_end_with(&self) -> Option<&str> {
        self.cannot_end_with.as_deref()
    }

    /// Grouping applied to the accepted credential.
    pub fn format(&self) -> Option<&GroupFormat> {
        self.format.as_ref()
    }

    /// Upper bound on specific characters.
    pub fn max_occurrences(&self) -> Option<&OccurrenceBound> {
        self.max_occurrences.as_ref()
    }

    /// Lower bound on specific characters.
    pub fn min_occurrences(&self) -> Option<&OccurrenceBound> {
        self.min_occurrences.as_ref()
    }

    /// Longest permitted run of one character.
    pub fn max_consecutive_identical(&self) -> Option<usize> {
        self.max_consecutive_identical
    }

    /// Whether the class default format is in use.
    pub fn use_default_format(&self) -> bool {
        self.use_default_format
    }
}

/// Builder for [GenerationParameters].
#[derive(Debug, Clone)]
pub struct GenerationParametersBuilder {
    alphabet: String,
    length: usize,
    required_character_sets: Vec<CharacterClass>,
    disallowed_characters: Option<String>,
    cannot_start_with: Option<String>,
    cannot_end_with: Option<String>,
    format: Option<GroupFormat>,
    max_occurrences: Option<OccurrenceBound>,
    min_occurrences: Option<OccurrenceBound>,
    max_consecutive_identical: Option<usize>,
    use_default_format: bool,
}

impl GenerationParametersBuilder {
    /// Create a builder.
    pub fn new(alphabet: impl AsRef<str>, length: usize) -> Self {
        Self {
            alphabet: alphabet.as_ref().to_owned(),
            length,
            required_character_sets: Vec::new(),
            disallowed_characters: None,
            cannot_start_with: None,
            cannot_end_with: None,
            format: None,
            max_occurrences: None,
            min_occurrences: None,
            max_consecutive_identical: None,
            use_default_format: false,
        }
    }

    /// Set the required character sets.
    pub fn required_character_sets(
        mut self,
        sets: impl IntoIterator<Item = CharacterClass>,
    ) -> Self {
        self.required_character_sets = sets.into_iter().collect();
        self
    }

    /// Set the disallowed characters.
    pub fn disallowed_characters(mut self, value: Option<String>) -> Self {
        self.disallowed_characters = value.filter(|s| !s.is_empty());
        self
    }

    /// Set the forbidden prefix.
    pub fn cannot_start_with(mut self, value: Option<String>) -> Self {
        self.cannot_start_with = value.filter(|s| !s.is_empty());
        self
    }

    /// Set the forbidden suffix.
    pub fn cannot_end_with(mut self, value: Option<String>) -> Self {
        self.cannot_end_with = value.filter(|s| !s.is_empty());
        self
    }

    /// Set the group format.
    pub fn format(mut self, value: Option<GroupFormat>) -> Self {
        self.format = value;
        self
    }

    /// Set the upper bound on specific characters.
    pub fn max_occurrences(mut self, value: Option<OccurrenceBound>) -> Self {
        self.max_occurrences = value;
        self
    }

    /// Set the lower bound on specific characters.
    pub fn min_occurrences(mut self, value: Option<OccurrenceBound>) -> Self {
        self.min_occurrences = value;
        self
    }

    /// Set the longest permitted run of one character.
    pub fn max_consecutive_identical(mut self, value: Option<usize>) -> Self {
        self.max_consecutive_identical = value;
        self
    }

    /// Mark the parameters as using the class default format.
    pub fn use_default_format(mut self, value: bool) -> Self {
        self.use_default_format = value;
        self
    }

    /// Finish building.
    ///
    /// De-duplicates the alphabet, strips separator characters when a
    /// group format is set and reconciles the required sets with the
    /// characters that can be drawn and the length.
    pub fn build(self) -> Result<GenerationParameters> {
        let mut alphabet = dedup(&self.alphabet);
        if let Some(format) = &self.format {
            alphabet.retain(|c| !format.separator.contains(*c));
        }

        if alphabet.is_empty() {
            return Err(Error::malformed(
                "alphabet is empty once separators are removed",
            ));
        }
        if alphabet.len() > MAX_ALPHABET_SIZE {
            return Err(Error::malformed(format!(
                "alphabet has {} characters, at most {} are supported",
                alphabet.len(),
                MAX_ALPHABET_SIZE
            )));
        }
        if self.length == 0 {
            return Err(Error::malformed("length must be at least 1"));
        }

        let drawable: Vec<char> = match &self.disallowed_characters {
            Some(disallowed) => alphabet
                .iter()
                .copied()
                .filter(|c| !disallowed.contains(*c))
                .collect(),
            None => alphabet.clone(),
        };
        if drawable.is_empty() {
            return Err(Error::malformed(
                "every allowed character is also disallowed",
            ));
        }

        let mut required: Vec<CharacterClass> = self
            .required_character_sets
            .into_iter()
            .filter(|set| set.intersects(&drawable))
            .collect();
        if required.len() > self.length {
            tracing::debug!(
                required = required.len(),
                length = self.length,
                "params::drop_required_sets",
            );
            required.clear();
        }

        Ok(GenerationParameters {
            alphabet: alphabet.into_iter().collect(),
            length: self.length,
            required_character_sets: required,
            disallowed_characters: self.disallowed_characters,
            cannot_start_with: self.cannot_start_with,
            cannot_end_with: self.cannot_end_with,
            format: self.format,
            max_occurrences: self.max_occurrences,
            min_occurrences: self.min_occurrences,
            max_consecutive_identical: self.max_consecutive_identical,
            use_default_format: self.use_default_format,
        })
    }
}

/// Produce generation parameters for a class and optional
/// caller requirements.
///
/// Requirements are validated first; see [RawRequirements::validate].
pub fn normalize(
    class: PasswordClass,
    raw: Option<&RawRequirements>,
) -> Result<GenerationParameters> {
    let params = match raw {
        Some(raw) => {
            raw.validate(class)?;
            if raw.use_class_defaults {
                class_defaults(class)?
            } else {
                merge(class, raw)?
            }
        }
        None => class_defaults(class)?,
    };

    tracing::debug!(
        class = %class,
        length = params.length,
        alphabet = params.alphabet.chars().count(),
        required = params.required_character_sets.len(),
        default_format = params.use_default_format,
        "normalize::parameters",
    );

    Ok(params)
}

fn class_defaults(class: PasswordClass) -> Result<GenerationParameters> {
    let format = class
        .default_grouping()
        .map(|grouping| GroupFormat::new(grouping, DEFAULT_SEPARATOR));
    GenerationParameters::builder(
        class.default_alphabet(),
        class.default_length(),
    )
    .required_character_sets(class.default_required_sets())
    .format(format)
    .use_default_format(true)
    .build()
}

fn merge(
    class: PasswordClass,
    raw: &RawRequirements,
) -> Result<GenerationParameters> {
    let is_pin = class == PasswordClass::Pin;
    let explicit_grouping = match (raw.group_size, raw.number_of_groups) {
        (Some(size), Some(count)) => Some(Grouping::new(size, count)),
        _ => None,
    };

    let length = match (raw.min_length, raw.max_length) {
        (None, None) => explicit_grouping
            .map(|grouping| grouping.capacity())
            .unwrap_or_else(|| class.default_length()),
        (min, max) if is_pin => max.or(min).unwrap_or(class.default_length()),
        (min, max) => {
            let mut length = class.default_length();
            if let Some(min) = min {
                length = length.max(min);
            }
            if let Some(max) = max {
                length = length.min(max);
            }
            length
        }
    };

    let use_default_format = !is_pin
        && raw.min_length.is_none()
        && raw.max_length.is_none()
        && raw.allowed_characters.is_none()
        && raw.required_character_sets.is_none();

    let alphabet = if is_pin {
        if raw.allowed_characters.is_some() {
            tracing::debug!("normalize::pin_ignores_allowed_characters");
        }
        class.default_alphabet().to_owned()
    } else {
        match raw.allowed_characters.as_deref() {
            // The default separator is reserved for grouping
            Some(allowed) => {
                let stripped: String = allowed
                    .chars()
                    .filter(|c| !DEFAULT_SEPARATOR.contains(*c))
                    .collect();
                if stripped.len() != allowed.len() {
                    tracing::debug!("normalize::strip_default_separator");
                }
                stripped
            }
            None => class.default_alphabet().to_owned(),
        }
    };

    let required = if is_pin {
        class.default_required_sets()
    } else {
        raw.required_character_sets
            .clone()
            .unwrap_or_else(|| class.default_required_sets())
    };

    let separator = raw.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    let grouping = explicit_grouping.or_else(|| {
        if use_default_format {
            class.default_grouping()
        } else {
            None
        }
    });
    let format =
        grouping.map(|grouping| GroupFormat::new(grouping, separator));

    GenerationParameters::builder(&alphabet, length)
        .required_character_sets(required)
        .disallowed_characters(raw.disallowed_characters.clone())
        .cannot_start_with(raw.cannot_start_with.clone())
        .cannot_end_with(raw.cannot_end_with.clone())
        .format(format)
        .max_occurrences(raw.max_occurrences_of_specific_chars.clone())
        .min_occurrences(raw.min_occurrences_of_specific_chars.clone())
        .max_consecutive_identical(raw.max_consecutive_identical_chars)
        .use_default_format(use_default_format)
        .build()
}

/// Remove repeated characters keeping the first occurrence.
fn dedup(value: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(value.len());
    for c in value.chars() {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}
