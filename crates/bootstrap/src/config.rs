//! Configuration for the bootstrap engine.

use crate::error::BootstrapError;

/// Configuration for case-resampling bootstrap runs.
///
/// # Example
///
/// ```
/// use tlaloc_bootstrap::BootstrapConfig;
///
/// let config = BootstrapConfig::new()
///     .with_repetitions(10_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    repetitions: usize,
    seed: u64,
}

impl BootstrapConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `repetitions = 10_000`, `seed = 0`.
    pub fn new() -> Self {
        Self {
            repetitions: 10_000,
            seed: 0,
        }
    }

    /// Sets the number of bootstrap repetitions.
    pub fn with_repetitions(mut self, r: usize) -> Self {
        self.repetitions = r;
        self
    }

    /// Sets the base RNG seed. Each repetition derives its own generator
    /// from this seed and its repetition index, so results are
    /// reproducible regardless of worker scheduling.
    pub fn with_seed(mut self, s: u64) -> Self {
        self.seed = s;
        self
    }

    /// Returns the number of repetitions.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Returns the base RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.repetitions == 0 {
            return Err(BootstrapError::InvalidConfig {
                reason: "repetitions must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::new()
    }
}
