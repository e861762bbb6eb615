//! Password classes and their built-in generation defaults.
use crate::{charset::DIGITS, CharacterClass, Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Default alphabet for generic passwords.
///
/// Omits characters that are easily confused (`l`, `o`, `I`, `O`, `0`).
pub const GENERIC_CHARACTERS: &str =
    "abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ123456789";

/// Default alphabet for Wi-Fi keys.
pub const WIFI_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyz1234567890";

/// Default alphabet for iCloud recovery keys.
pub const ICLOUD_CHARACTERS: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Default alphabet for PINs.
pub const PIN_CHARACTERS: &str = DIGITS;

/// Default separator placed between groups.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Generation profile that selects the built-in defaults.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum PasswordClass {
    /// General purpose web form password.
    #[default]
    #[serde(rename = "generic")]
    Generic,
    /// Numeric PIN.
    #[serde(rename = "pin")]
    Pin,
    /// Wireless network key.
    #[serde(rename = "wifi-key")]
    WiFiKey,
    /// iCloud account recovery key.
    #[serde(rename = "icloud-recovery-key")]
    ICloudRecoveryKey,
    /// Password for a service with its own rules; generic
    /// alphabet without grouping.
    #[serde(rename = "service-specific")]
    ServiceSpecific,
}

impl PasswordClass {
    /// All password classes.
    pub const ALL: [PasswordClass; 5] = [
        PasswordClass::Generic,
        PasswordClass::Pin,
        PasswordClass::WiFiKey,
        PasswordClass::ICloudRecoveryKey,
        PasswordClass::ServiceSpecific,
    ];

    /// Built-in alphabet.
    pub fn default_alphabet(&self) -> &'static str {
        match self {
            Self::Generic | Self::ServiceSpecific => GENERIC_CHARACTERS,
            Self::Pin => PIN_CHARACTERS,
            Self::WiFiKey => WIFI_CHARACTERS,
            Self::ICloudRecoveryKey => ICLOUD_CHARACTERS,
        }
    }

    /// Built-in number of random characters.
    pub fn default_length(&self) -> usize {
        match self {
            Self::Generic | Self::ServiceSpecific => 20,
            Self::Pin => 4,
            Self::WiFiKey => 12,
            Self::ICloudRecoveryKey => 24,
        }
    }

    /// Built-in required character sets.
    pub fn default_required_sets(&self) -> Vec<CharacterClass> {
        match self {
            Self::Generic | Self::ServiceSpecific => vec![
                CharacterClass::Uppercase,
                CharacterClass::Lowercase,
                CharacterClass::Digit,
            ],
            Self::Pin => vec![CharacterClass::Digit],
            Self::WiFiKey => {
                vec![CharacterClass::Lowercase, CharacterClass::Digit]
            }
            Self::ICloudRecoveryKey => {
                vec![CharacterClass::Uppercase, CharacterClass::Digit]
            }
        }
    }

    /// Built-in grouping.
    pub fn default_grouping(&self) -> Option<Grouping> {
        match self {
            Self::Generic => Some(Grouping::new(4, 5)),
            Self::ICloudRecoveryKey => Some(Grouping::new(4, 6)),
            Self::Pin => Some(Grouping::new(4, 1)),
            Self::WiFiKey => Some(Grouping::new(4, 3)),
            Self::ServiceSpecific => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Pin => "pin",
            Self::WiFiKey => "wifi-key",
            Self::ICloudRecoveryKey => "icloud-recovery-key",
            Self::ServiceSpecific => "service-specific",
        }
    }
}

impl fmt::Display for PasswordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PasswordClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| Error::UnknownClass(s.to_owned()))
    }
}

/// Group size and count used to format a credential for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    /// Characters in each group.
    pub group_size: usize,
    /// Number of groups.
    pub number_of_groups: usize,
}

impl Grouping {
    /// Create a grouping.
    pub const fn new(group_size: usize, number_of_groups: usize) -> Self {
        Self {
            group_size,
            number_of_groups,
        }
    }

    /// Number of characters covered by all the groups.
    pub fn capacity(&self) -> usize {
        self.group_size * self.number_of_groups
    }
}

/// Default grouping for a password class, used to format UI hints.
///
/// Returns `None` for classes that are not grouped.
pub fn default_grouping_for(class: PasswordClass) -> Option<Grouping> {
    class.default_grouping()
}
