//! Probabilistic contingency tables for ensemble rainfall verification.
//!
//! This crate converts one day's ensemble forecast and binary flood-report
//! observations into a per-member-count contingency table, and sums such
//! tables over a verification period (or over a bootstrap resample of it).
//!
//! # Pipeline
//!
//! ```text
//! region mask (restrict) -> build_table (one day) -> aggregate (period sum)
//! ```
//!
//! # Quick start
//!
//! ```
//! use tlaloc_contingency::{ForecastField, ObservationField, build_table};
//!
//! // 2 members, 3 grid cells
//! let fc = ForecastField::new(2, 3, vec![5.0, 0.0, 12.0, 7.0, 1.0, 2.0]).unwrap();
//! let obs = ObservationField::new(vec![1, 0, 0]);
//! let table = build_table(&fc, &obs, 4.0).unwrap();
//! assert_eq!(table.num_rows(), 3);
//! ```

mod aggregate;
mod build;
mod error;
mod fields;
mod sources;
mod table;

pub use aggregate::{aggregate, aggregate_indices};
pub use build::build_table;
pub use error::ContingencyError;
pub use fields::{ForecastField, ObservationField};
pub use sources::{RegionMask, ThresholdProvider, build_region_table};
pub use table::{ContingencyTable, TableRow};
