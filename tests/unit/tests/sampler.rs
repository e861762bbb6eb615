use anyhow::Result;
use keysmith_password::{
    generate_password_with, normalize, Error, GeneratorConfig, Generator,
    OsRandom, PasswordClass, SecureRandom, UniformSampler,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use statrs::distribution::{ChiSquared, ContinuousCDF};

const DRAWS: usize = 100_000;
const UPPER_BOUND: usize = 55;
const SIGNIFICANCE: f64 = 0.001;

/// Chi-square goodness of fit p-value against a uniform distribution.
fn uniform_p_value(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let dist = ChiSquared::new((counts.len() - 1) as f64).unwrap();
    dist.sf(chi2)
}

#[test]
fn sampler_chi_square_uniform() -> Result<()> {
    let mut sampler =
        UniformSampler::new(ChaCha20Rng::seed_from_u64(0x6b65_7973));
    let indices = sampler.draw_indices(DRAWS, UPPER_BOUND)?;
    assert_eq!(DRAWS, indices.len());

    let mut counts = vec![0u64; UPPER_BOUND];
    for index in indices {
        assert!(index < UPPER_BOUND);
        counts[index] += 1;
    }

    let p = uniform_p_value(&counts);
    assert!(p > SIGNIFICANCE, "p-value {} indicates bias", p);
    Ok(())
}

#[test]
fn sampler_naive_modulo_is_detected() {
    // The same test must catch the bias it guards against
    let mut rng = ChaCha20Rng::seed_from_u64(0x6b65_7973);
    let mut bytes = vec![0u8; DRAWS];
    rng.fill_bytes(&mut bytes);

    let mut counts = vec![0u64; UPPER_BOUND];
    for byte in bytes {
        counts[byte as usize % UPPER_BOUND] += 1;
    }
    assert!(uniform_p_value(&counts) < SIGNIFICANCE);
}

/// Source that always fails.
struct Offline;

impl SecureRandom for Offline {
    fn try_fill(
        &mut self,
        _dest: &mut [u8],
    ) -> std::result::Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::other("offline")))
    }
}

/// Source that fails a number of times before delegating.
struct Flaky {
    failures: usize,
    inner: ChaCha20Rng,
}

impl SecureRandom for Flaky {
    fn try_fill(
        &mut self,
        dest: &mut [u8],
    ) -> std::result::Result<(), rand::Error> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(rand::Error::new(std::io::Error::other("busy")));
        }
        self.inner.try_fill_bytes(dest)
    }
}

#[test]
fn sampler_random_source_unavailable() -> Result<()> {
    let params = normalize(PasswordClass::Generic, None)?;
    let config = GeneratorConfig {
        max_fill_attempts: 5,
        ..Default::default()
    };
    let mut generator = Generator::new(Offline, config);
    assert!(matches!(
        generator.generate(&params),
        Err(Error::RandomSourceUnavailable { attempts: 5 })
    ));
    Ok(())
}

#[test]
fn sampler_recovers_from_transient_failures() -> Result<()> {
    let params = normalize(PasswordClass::ICloudRecoveryKey, None)?;
    let source = Flaky {
        failures: 3,
        inner: ChaCha20Rng::seed_from_u64(1),
    };
    let mut generator = Generator::new(source, GeneratorConfig::default());
    let key = generator.generate_password(&params)?;
    assert_eq!(29, key.len());
    Ok(())
}

#[test]
fn sampler_default_entry_point() -> Result<()> {
    let config = GeneratorConfig::default();
    let password =
        generate_password_with(PasswordClass::WiFiKey, None, &config)?;
    assert_eq!(14, password.len());
    Ok(())
}

#[test]
fn sampler_os_random_source() -> Result<()> {
    let params = normalize(PasswordClass::Pin, None)?;
    let mut generator = Generator::new(OsRandom, GeneratorConfig::default());
    let pin = generator.generate_password(&params)?;
    assert_eq!(4, pin.len());
    assert!(pin.chars().all(|c| c.is_ascii_digit()));
    Ok(())
}
