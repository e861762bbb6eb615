#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]
//! Constraint based generation of passwords, PINs, Wi-Fi keys
//! and recovery keys.
//!
//! Caller requirements are validated and normalized once into
//! [GenerationParameters], then a rejection sampling [Generator]
//! draws candidates with an unbiased [UniformSampler] until one
//! passes every predicate and is not weak.
//!
//! ```
//! use keysmith_password::{generate_password, PasswordClass};
//!
//! let key = generate_password(PasswordClass::ICloudRecoveryKey, None)?;
//! assert_eq!(29, key.len());
//! # Ok::<(), keysmith_password::Error>(())
//! ```

pub mod charset;
pub mod class;
mod config;
mod error;
pub mod generator;
pub mod params;
pub mod predicates;
pub mod random;
mod requirements;
pub mod strength;

pub use charset::CharacterClass;
pub use class::{default_grouping_for, Grouping, PasswordClass};
pub use config::{GeneratorConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::Error;
pub use generator::{GenerationOutcome, Generator};
pub use params::{
    normalize, GenerationParameters, GenerationParametersBuilder,
    GroupFormat,
};
pub use random::{OsRandom, SecureRandom, UniformSampler};
pub use requirements::{OccurrenceBound, RawRequirements};
pub use strength::{is_password_weak, WeaknessPolicy};

/// Default cryptographically secure RNG.
pub(crate) fn csprng() -> impl rand::CryptoRng + rand::RngCore {
    rand::rngs::OsRng
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Generate a credential for a class and optional requirements
/// using the default configuration.
pub fn generate_password(
    class: PasswordClass,
    requirements: Option<&RawRequirements>,
) -> Result<String> {
    generate_password_with(class, requirements, &GeneratorConfig::default())
}

/// Generate a credential with an explicit configuration.
pub fn generate_password_with(
    class: PasswordClass,
    requirements: Option<&RawRequirements>,
    config: &GeneratorConfig,
) -> Result<String> {
    let params = normalize(class, requirements)?;
    let mut generator = Generator::new(csprng(), config.clone());
    generator.generate_password(&params)
}
