//! Rejection sampling generator.
//!
//! Each attempt draws a candidate, runs every predicate and the
//! weakness heuristic over it and either accepts it or draws again.
//! The number of attempts is bounded by
//! [GeneratorConfig::max_attempts].
use crate::{
    predicates, Error, GenerationParameters, GeneratorConfig, Result,
    SecureRandom, UniformSampler,
};
use zeroize::Zeroizing;

/// Result of running the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Candidate that passed every check, formatted for display.
    Accepted(String),
    /// Attempt budget was used up.
    Exhausted {
        /// Number of candidates drawn.
        attempts: usize,
    },
}

impl GenerationOutcome {
    /// Convert into the accepted credential.
    ///
    /// Exhaustion is reported as [Error::GenerationExhausted].
    pub fn into_result(self) -> Result<String> {
        match self {
            Self::Accepted(value) => Ok(value),
            Self::Exhausted { attempts } => {
                Err(Error::GenerationExhausted { attempts })
            }
        }
    }
}

/// Generates credentials from normalized parameters.
pub struct Generator<R> {
    sampler: UniformSampler<R>,
    config: GeneratorConfig,
}

impl<R: SecureRandom> Generator<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R, config: GeneratorConfig) -> Self {
        let sampler = UniformSampler::new(rng)
            .with_max_fill_attempts(config.max_fill_attempts);
        Self { sampler, config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the generator.
    ///
    /// Fails only when the random source is unavailable.
    pub fn generate(
        &mut self,
        params: &GenerationParameters,
    ) -> Result<GenerationOutcome> {
        let alphabet: Vec<char> = params.alphabet().chars().collect();
        let disallowed = params.disallowed_characters();

        for attempt in 1..=self.config.max_attempts {
            let candidate =
                self.draw(&alphabet, params.length(), disallowed)?;

            match predicates::check(&candidate, params, &self.config.weakness)
            {
                Ok(_) => {
                    tracing::debug!(attempts = attempt, "generator::accept");
                    let value = match params.format() {
                        Some(format) => format.apply(&candidate),
                        None => candidate.iter().collect(),
                    };
                    return Ok(GenerationOutcome::Accepted(value));
                }
                Err(rejection) => {
                    tracing::trace!(
                        attempt,
                        predicate = %rejection,
                        "generator::reject",
                    );
                }
            }
        }

        tracing::warn!(
            attempts = self.config.max_attempts,
            "generator::exhausted",
        );
        Ok(GenerationOutcome::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Run the generator and return the accepted credential.
    pub fn generate_password(
        &mut self,
        params: &GenerationParameters,
    ) -> Result<String> {
        self.generate(params)?.into_result()
    }

    /// Draw `length` characters, redrawing only the positions that
    /// hit a disallowed character.
    ///
    /// [GenerationParameters] always leave at least one drawable
    /// character so the redraw terminates.
    fn draw(
        &mut self,
        alphabet: &[char],
        length: usize,
        disallowed: Option<&str>,
    ) -> Result<Zeroizing<Vec<char>>> {
        let indices =
            Zeroizing::new(self.sampler.draw_indices(length, alphabet.len())?);
        let mut candidate: Zeroizing<Vec<char>> =
            Zeroizing::new(indices.iter().map(|i| alphabet[*i]).collect());

        if let Some(disallowed) = disallowed {
            for slot in candidate.iter_mut() {
                while disallowed.contains(*slot) {
                    *slot = alphabet[self.sampler.draw_index(alphabet.len())?];
                }
            }
        }

        Ok(candidate)
    }
}
