//! Error types for the tlaloc-bootstrap crate.

/// Error type for all fallible operations in the tlaloc-bootstrap crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BootstrapError {
    /// Returned when the requested period has no present day at all.
    #[error("no data available: all {n_days} day slots are absent")]
    NoDataAvailable {
        /// Number of day slots in the requested period.
        n_days: usize,
    },

    /// Returned when the day slot sequence is empty.
    #[error("day slot sequence is empty")]
    EmptyPeriod,

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Aggregation error on the real (non-resampled) pass.
    #[error(transparent)]
    Contingency(#[from] tlaloc_contingency::ContingencyError),
}
