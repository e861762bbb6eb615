//! Heuristic classification of weak passwords and PINs.
//!
//! This is an approximation tuned on commonly chosen credentials,
//! it is not a provable security bound.
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::LazyLock};

/// Default entropy estimate (in bits) below which a mixed
/// password is weak.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 35.0;

/// Credentials shorter than this are always weak.
pub const MIN_LENGTH: usize = 4;

const LETTER_SET_SIZE: u32 = 26;
const DIGIT_SET_SIZE: u32 = 10;
// Estimate for the printable non alphanumeric characters (the 32 of
// `is_ascii_punctuation` plus space), not an exact class size.
const PUNCTUATION_SET_SIZE: u32 = 33;

/// PINs that reached the top 20 of chosen banking PINs.
pub const TOP_PINS: &[&str] =
    &["1234", "1004", "2000", "1122", "4321", "2001", "2580"];

/// Further commonly chosen 4 digit PINs.
///
/// From "A birthday present every eleven wallets? The security of
/// customer-chosen banking PINs" (Bonneau, Preibusch, Anderson 2012).
pub const COMMON_PINS: &[&str] = &[
    "0000", "0101", "0102", "0103", "0110", "0111", "0123", "0202", "0303",
    "0404", "0505", "0606", "0707", "0808", "0909", "1010", "1101", "1102",
    "1103", "1110", "1111", "1112", "1123", "1201", "1202", "1203", "1210",
    "1211", "1212", "1234", "1956", "1957", "1958", "1959", "1960", "1961",
    "1962", "1963", "1964", "1965", "1966", "1967", "1968", "1969", "1970",
    "1971", "1972", "1973", "1974", "1975", "1976", "1977", "1978", "1979",
    "1980", "1981", "1982", "1983", "1984", "1985", "1986", "1987", "1988",
    "1989", "1990", "1991", "1992", "1993", "1994", "1995", "1996", "1997",
    "1998", "1999", "2000", "2001", "2002", "2003", "2004", "2005", "2006",
    "2007", "2008", "2009", "2010", "2011", "2012", "2013", "2014", "2015",
    "2222", "2229", "2580", "3333", "4444", "5252", "5683", "6666", "7465",
    "7667",
];

static PIN_BLACKLIST: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    TOP_PINS.iter().chain(COMMON_PINS.iter()).copied().collect()
});

/// Policy values used by the weakness heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaknessPolicy {
    /// Entropy estimate in bits below which a mixed password is weak.
    pub entropy_threshold: f64,
    /// Additional 4 digit PINs treated as weak.
    pub extra_blacklist: Vec<String>,
}

impl Default for WeaknessPolicy {
    fn default() -> Self {
        Self {
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            extra_blacklist: Vec::new(),
        }
    }
}

impl WeaknessPolicy {
    /// Determine if a candidate is weak.
    pub fn is_weak(&self, candidate: &str) -> bool {
        let chars: Vec<char> = candidate.chars().collect();
        self.is_weak_chars(&chars)
    }

    /// Determine if a candidate given as characters is weak.
    pub fn is_weak_chars(&self, chars: &[char]) -> bool {
        if chars.len() < MIN_LENGTH {
            return true;
        }

        let numeric = chars.iter().all(|c| c.is_ascii_digit());
        if numeric && chars.len() == 4 {
            self.is_weak_pin(chars)
        } else if numeric {
            all_identical(chars) || is_run(chars, 1) || is_run(chars, -1)
        } else {
            entropy_estimate(chars) < self.entropy_threshold
        }
    }

    fn is_weak_pin(&self, pin: &[char]) -> bool {
        let value: String = pin.iter().collect();
        if PIN_BLACKLIST.contains(value.as_str())
            || self.extra_blacklist.iter().any(|p| p == &value)
        {
            return true;
        }

        // AAAA is covered by both patterns below
        let aabb = pin[0] == pin[1] && pin[2] == pin[3];
        let abab = pin[0] == pin[2] && pin[1] == pin[3];
        aabb || abab
    }
}

/// Determine if a candidate is weak using the default policy.
pub fn is_password_weak(candidate: &str) -> bool {
    WeaknessPolicy::default().is_weak(candidate)
}

/// Estimated entropy in bits: length times the base 2 logarithm of
/// the combined size of every character category present.
///
/// Categories are uppercase (26), lowercase (26), decimal digits (10)
/// and ASCII punctuation and symbols (33). Characters outside every
/// category do not contribute.
pub fn entropy_estimate(chars: &[char]) -> f64 {
    let mut upper = false;
    let mut lower = false;
    let mut digit = false;
    let mut punctuation = false;
    for c in chars {
        if c.is_uppercase() {
            upper = true;
        } else if c.is_lowercase() {
            lower = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if c.is_ascii_punctuation() {
            punctuation = true;
        }
    }

    let mut size = 0;
    if upper {
        size += LETTER_SET_SIZE;
    }
    if lower {
        size += LETTER_SET_SIZE;
    }
    if digit {
        size += DIGIT_SET_SIZE;
    }
    if punctuation {
        size += PUNCTUATION_SET_SIZE;
    }

    if size == 0 {
        return 0.0;
    }
    chars.len() as f64 * f64::from(size).log2()
}

fn all_identical(chars: &[char]) -> bool {
    chars.windows(2).all(|pair| pair[0] == pair[1])
}

/// Digits where each one differs from its predecessor by `step`.
fn is_run(chars: &[char], step: i32) -> bool {
    chars.windows(2).all(|pair| {
        match (pair[0].to_digit(10), pair[1].to_digit(10)) {
            (Some(a), Some(b)) => b as i32 - a as i32 == step,
            _ => false,
        }
    })
}
