//! Independent constraint checks over a candidate's characters.
//!
//! Candidates are checked before grouping so separators never
//! take part in a predicate.
use crate::{
    CharacterClass, GenerationParameters, OccurrenceBound, WeaknessPolicy,
};
use std::fmt;

/// Reason a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A required character set is missing.
    RequiredSets,
    /// The candidate starts with the forbidden prefix.
    StartsWith,
    /// The candidate ends with the forbidden suffix.
    EndsWith,
    /// Too few of the specific characters.
    MinOccurrences,
    /// Too many of the specific characters.
    MaxOccurrences,
    /// A character repeats too many times in a row.
    ConsecutiveIdentical,
    /// The weakness heuristic rejected the candidate.
    Weak,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RequiredSets => "required_sets",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::MinOccurrences => "min_occurrences",
            Self::MaxOccurrences => "max_occurrences",
            Self::ConsecutiveIdentical => "consecutive_identical",
            Self::Weak => "weak",
        };
        write!(f, "{}", name)
    }
}

/// Every set contributes at least one character.
pub fn contains_required_sets(chars: &[char], sets: &[CharacterClass]) -> bool {
    sets.iter().all(|set| set.intersects(chars))
}

/// The leading characters are not equal to `prefix`.
pub fn does_not_start_with(chars: &[char], prefix: &str) -> bool {
    let prefix: Vec<char> = prefix.chars().collect();
    !chars.starts_with(&prefix)
}

/// The trailing characters are not equal to `suffix`.
pub fn does_not_end_with(chars: &[char], suffix: &str) -> bool {
    let suffix: Vec<char> = suffix.chars().collect();
    !chars.ends_with(&suffix)
}

/// At least `bound.count` characters belong to `bound.characters`.
pub fn at_least(chars: &[char], bound: &OccurrenceBound) -> bool {
    count_of(chars, &bound.characters) >= bound.count
}

/// At most `bound.count` characters belong to `bound.characters`.
pub fn at_most(chars: &[char], bound: &OccurrenceBound) -> bool {
    count_of(chars, &bound.characters) <= bound.count
}

/// No run of more than `limit` identical consecutive characters.
pub fn max_consecutive_identical(chars: &[char], limit: usize) -> bool {
    longest_run(chars) <= limit
}

/// None of the characters appear in `disallowed`.
pub fn contains_none_of(chars: &[char], disallowed: &str) -> bool {
    !chars.iter().any(|c| disallowed.contains(*c))
}

fn count_of(chars: &[char], characters: &str) -> usize {
    chars.iter().filter(|c| characters.contains(**c)).count()
}

fn longest_run(chars: &[char]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for c in chars {
        if previous == Some(c) {
            current += 1;
        } else {
            current = 1;
            previous = Some(c);
        }
        longest = longest.max(current);
    }
    longest
}

/// Run every predicate in order and then the weakness heuristic.
///
/// Returns the first failing check.
pub fn check(
    chars: &[char],
    params: &GenerationParameters,
    policy: &WeaknessPolicy,
) -> Result<(), Rejection> {
    if !contains_required_sets(chars, params.required_character_sets()) {
        return Err(Rejection::RequiredSets);
    }
    if let Some(prefix) = params.cannot_start_with() {
        if !does_not_start_with(chars, prefix) {
            return Err(Rejection::StartsWith);
        }
    }
    if let Some(suffix) = params.cannot_end_with() {
        if !does_not_end_with(chars, suffix) {
            return Err(Rejection::EndsWith);
        }
    }
    if let Some(bound) = params.min_occurrences() {
        if !at_least(chars, bound) {
            return Err(Rejection::MinOccurrences);
        }
    }
    if let Some(bound) = params.max_occurrences() {
        if !at_most(chars, bound) {
            return Err(Rejection::MaxOccurrences);
        }
    }
    if let Some(limit) = params.max_consecutive_identical() {
        if !max_consecutive_identical(chars, limit) {
            return Err(Rejection::ConsecutiveIdentical);
        }
    }
    if policy.is_weak_chars(chars) {
        return Err(Rejection::Weak);
    }
    Ok(())
}
