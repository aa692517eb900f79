//! Case-resampling bootstrap over the day dimension.
//!
//! Given one daily contingency table per present day of a verification
//! period, this crate computes a skill statistic on the real period and on
//! `repetitions` resamples of it, each drawing day slots uniformly with
//! replacement. Resampling whole days preserves intra-day spatial
//! correlation; only the day axis is randomised.
//!
//! # Quick start
//!
//! ```
//! use tlaloc_bootstrap::{BootstrapConfig, bootstrap_aroc};
//! use tlaloc_contingency::{ForecastField, ObservationField, build_table};
//!
//! let fc = ForecastField::new(1, 4, vec![9.0, 9.0, 0.0, 0.0]).unwrap();
//! let obs = ObservationField::new(vec![1, 0, 1, 0]);
//! let day = build_table(&fc, &obs, 1.0).unwrap();
//!
//! let days = vec![Some(day.clone()), None, Some(day)];
//! let config = BootstrapConfig::new().with_repetitions(100).with_seed(42);
//! let dist = bootstrap_aroc(&days, &config).unwrap();
//! assert_eq!(dist.resamples().len(), 100);
//! ```

mod config;
mod distribution;
mod engine;
mod error;

pub use config::BootstrapConfig;
pub use distribution::{BootstrapDistribution, ConfidenceInterval};
pub use engine::{bootstrap_aroc, bootstrap_frequency_bias, bootstrap_with};
pub use error::BootstrapError;
