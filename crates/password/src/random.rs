//! Unbiased sampling of alphabet indices from a secure random source.
use crate::{Error, Result};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Default number of consecutive failed fill requests tolerated
/// before the source is considered unavailable.
pub const DEFAULT_MAX_FILL_ATTEMPTS: usize = 16;

/// Operating system random source.
pub use rand::rngs::OsRng as OsRandom;

/// Source of cryptographically secure random bytes.
pub trait SecureRandom {
    /// Fill the buffer with random bytes.
    ///
    /// On failure the buffer contents are unspecified and the
    /// request may be retried.
    fn try_fill(
        &mut self,
        dest: &mut [u8],
    ) -> std::result::Result<(), rand::Error>;
}

impl<R: RngCore + CryptoRng> SecureRandom for R {
    fn try_fill(
        &mut self,
        dest: &mut [u8],
    ) -> std::result::Result<(), rand::Error> {
        self.try_fill_bytes(dest)
    }
}

/// Largest accepted byte value (exclusive) for an upper bound.
///
/// Bytes at or above the limit are discarded because reducing them
/// modulo `upper_bound` would favour the low end of the range.
fn modulo_bias_limit(upper_bound: u8) -> u8 {
    u8::MAX - (u8::MAX % upper_bound)
}

/// Draws uniformly distributed indices from a secure random source.
pub struct UniformSampler<R> {
    rng: R,
    max_fill_attempts: usize,
}

impl<R: SecureRandom> UniformSampler<R> {
    /// Create a sampler.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_fill_attempts: DEFAULT_MAX_FILL_ATTEMPTS,
        }
    }

    /// Set the number of consecutive fill failures tolerated.
    pub fn with_max_fill_attempts(mut self, attempts: usize) -> Self {
        self.max_fill_attempts = attempts.max(1);
        self
    }

    /// Draw `count` indices, each uniform in `[0, upper_bound)`.
    ///
    /// The upper bound must be in `[1, 256)`. A failed fill request
    /// is retried as a whole; no partial output is returned.
    pub fn draw_indices(
        &mut self,
        count: usize,
        upper_bound: usize,
    ) -> Result<Vec<usize>> {
        let upper_bound = u8::try_from(upper_bound)
            .ok()
            .filter(|bound| *bound > 0)
            .ok_or_else(|| {
                Error::malformed(format!(
                    "sampler upper bound {} is outside [1, 256)",
                    upper_bound
                ))
            })?;
        let limit = modulo_bias_limit(upper_bound);

        let mut indices = Vec::with_capacity(count);
        let mut buffer = vec![0u8; count];
        let mut failures = 0;

        while indices.len() < count {
            let batch = &mut buffer[..count - indices.len()];
            if let Err(error) = self.rng.try_fill(batch) {
                failures += 1;
                tracing::warn!(
                    error = %error,
                    failures,
                    "sampler::fill_failed",
                );
                if failures >= self.max_fill_attempts {
                    buffer.zeroize();
                    return Err(Error::RandomSourceUnavailable {
                        attempts: failures,
                    });
                }
                continue;
            }
            failures = 0;

            for byte in batch.iter() {
                if *byte < limit {
                    indices.push((*byte % upper_bound) as usize);
                }
            }
        }

        buffer.zeroize();
        Ok(indices)
    }

    /// Draw a single index uniform in `[0, upper_bound)`.
    pub fn draw_index(&mut self, upper_bound: usize) -> Result<usize> {
        let mut indices = self.draw_indices(1, upper_bound)?;
        Ok(indices.remove(0))
    }
}
