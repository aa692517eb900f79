//! Collaborator seams: climatology thresholds and region masks.
//!
//! Gridded field decoding, climatology percentile tables and the domain
//! mask live outside this crate; callers plug them in through these traits.

use crate::build::build_table;
use crate::error::ContingencyError;
use crate::fields::{ForecastField, ObservationField};
use crate::table::ContingencyTable;

/// Supplies the verifying rainfall threshold for a region and event class,
/// backed by a precomputed rainfall climatology.
pub trait ThresholdProvider {
    /// Error type of the backing lookup.
    type Error;

    /// Returns the rainfall magnitude (mm) at `magnitude_percentile` of the
    /// region's flood-rainfall climatology.
    fn threshold(&self, region: &str, magnitude_percentile: u8) -> Result<f64, Self::Error>;
}

/// Maps region codes to the grid cells belonging to that region.
pub trait RegionMask {
    /// Returns the full-domain cell indices inside `region`.
    fn cells_in_region(&self, region: &str) -> Vec<usize>;
}

/// Restricts full-domain fields to one region, then builds the daily table.
///
/// # Errors
///
/// Returns [`ContingencyError::EmptyRegion`] if the mask selects no cells,
/// plus any error of [`build_table`] or the restriction itself.
pub fn build_region_table(
    forecast: &ForecastField,
    observed: &ObservationField,
    mask: &impl RegionMask,
    region: &str,
    threshold: f64,
) -> Result<ContingencyTable, ContingencyError> {
    let cells = mask.cells_in_region(region);
    if cells.is_empty() {
        return Err(ContingencyError::EmptyRegion);
    }
    let fc = forecast.restrict(&cells)?;
    let obs = observed.restrict(&cells)?;
    build_table(&fc, &obs, threshold)
}
