use anyhow::Result;
use keysmith_password::{
    generate_password_with, normalize, Error, GenerationOutcome,
    GenerationParameters, GeneratorConfig, Generator, OccurrenceBound,
    PasswordClass, RawRequirements, DEFAULT_MAX_ATTEMPTS,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn generator_exhausted() {
    // No 'c' can ever be drawn
    let raw = RawRequirements::new()
        .length(6)
        .allowed_characters("ab")
        .min_occurrences(OccurrenceBound::new("c", 1));
    let config = GeneratorConfig {
        max_attempts: 25,
        ..Default::default()
    };
    assert!(matches!(
        generate_password_with(PasswordClass::Generic, Some(&raw), &config),
        Err(Error::GenerationExhausted { attempts: 25 })
    ));
}

#[test]
fn generator_outcome_exhausted() -> Result<()> {
    let params = GenerationParameters::builder("x", 4).build()?;
    let config = GeneratorConfig {
        max_attempts: 3,
        ..Default::default()
    };
    // "xxxx" is never strong enough
    let mut generator = Generator::new(ChaCha20Rng::seed_from_u64(3), config);
    assert_eq!(
        GenerationOutcome::Exhausted { attempts: 3 },
        generator.generate(&params)?
    );
    Ok(())
}

#[test]
fn generator_seeded_is_reproducible() -> Result<()> {
    let params = normalize(PasswordClass::Generic, None)?;
    let mut first =
        Generator::new(ChaCha20Rng::seed_from_u64(42), Default::default());
    let mut second =
        Generator::new(ChaCha20Rng::seed_from_u64(42), Default::default());
    for _ in 0..10 {
        assert_eq!(
            first.generate_password(&params)?,
            second.generate_password(&params)?
        );
    }
    Ok(())
}

#[test]
fn generator_config_from_toml() -> Result<()> {
    let config = GeneratorConfig::load("../fixtures/config/generator.toml")?;
    assert_eq!(500, config.max_attempts);
    assert_eq!(4, config.max_fill_attempts);
    assert_eq!(40.0, config.weakness.entropy_threshold);

    let generator = Generator::new(ChaCha20Rng::seed_from_u64(0), config);
    assert_eq!(500, generator.config().max_attempts);
    Ok(())
}

#[test]
fn generator_config_defaults() {
    let config = GeneratorConfig::default();
    assert_eq!(DEFAULT_MAX_ATTEMPTS, config.max_attempts);
    assert_eq!(16, config.max_fill_attempts);
    assert!(config.weakness.extra_blacklist.is_empty());

    assert!(matches!(
        GeneratorConfig::load("../fixtures/config/missing.toml"),
        Err(Error::NotFile(_))
    ));
}

#[test]
fn generator_disallowed_characters() -> Result<()> {
    let raw = RawRequirements::new()
        .length(20)
        .disallowed_characters("abcdefABCDEF123");
    for _ in 0..25 {
        let password = generate_password_with(
            PasswordClass::Generic,
            Some(&raw),
            &Default::default(),
        )?;
        assert_eq!(20, password.len());
        assert!(!password.chars().any(|c| "abcdefABCDEF123".contains(c)));
    }
    Ok(())
}
