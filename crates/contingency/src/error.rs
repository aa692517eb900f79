//! Error types for the tlaloc-contingency crate.

/// Error type for all fallible operations in the tlaloc-contingency crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContingencyError {
    /// Returned when forecast and observation grids disagree on cell count.
    #[error("shape mismatch: forecast has {forecast_cells} cells, observations have {observed_cells}")]
    ShapeMismatch {
        /// Number of grid cells in the forecast field.
        forecast_cells: usize,
        /// Number of grid cells in the observation field.
        observed_cells: usize,
    },

    /// Returned when the region restriction leaves zero grid cells.
    #[error("region contains no grid cells")]
    EmptyRegion,

    /// Returned when array dimensions are internally inconsistent.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a table row's rule label breaks the ascending
    /// 0..=num_members convention.
    #[error("row {index} has members_required {got}, expected {expected}")]
    BadRowLabel {
        /// Row position in the table.
        index: usize,
        /// The label the convention requires at this position.
        expected: u32,
        /// The label found.
        got: u32,
    },

    /// Returned when tables with different ensemble sizes are combined.
    #[error("ensemble size mismatch: expected {expected} members, got {got}")]
    MemberMismatch {
        /// Ensemble size of the first table.
        expected: usize,
        /// Ensemble size of the offending table.
        got: usize,
    },

    /// Returned when an aggregation has no present days at all.
    #[error("no data available: every day in the requested period is absent")]
    NoDataAvailable,

    /// Returned when a region mask index is outside the domain.
    #[error("mask cell index {index} out of bounds for domain of {num_cells} cells")]
    MaskOutOfBounds {
        /// The offending cell index.
        index: usize,
        /// Number of cells in the full domain.
        num_cells: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shape_mismatch() {
        let e = ContingencyError::ShapeMismatch {
            forecast_cells: 100,
            observed_cells: 99,
        };
        assert_eq!(
            e.to_string(),
            "shape mismatch: forecast has 100 cells, observations have 99"
        );
    }

    #[test]
    fn display_empty_region() {
        let e = ContingencyError::EmptyRegion;
        assert_eq!(e.to_string(), "region contains no grid cells");
    }

    #[test]
    fn display_length_mismatch() {
        let e = ContingencyError::LengthMismatch {
            field: "values",
            expected: 6,
            got: 5,
        };
        assert_eq!(e.to_string(), "values: expected 6 elements, got 5");
    }

    #[test]
    fn display_bad_row_label() {
        let e = ContingencyError::BadRowLabel {
            index: 1,
            expected: 1,
            got: 0,
        };
        assert_eq!(e.to_string(), "row 1 has members_required 0, expected 1");
    }

    #[test]
    fn display_member_mismatch() {
        let e = ContingencyError::MemberMismatch {
            expected: 51,
            got: 99,
        };
        assert_eq!(
            e.to_string(),
            "ensemble size mismatch: expected 51 members, got 99"
        );
    }

    #[test]
    fn display_no_data() {
        let e = ContingencyError::NoDataAvailable;
        assert_eq!(
            e.to_string(),
            "no data available: every day in the requested period is absent"
        );
    }

    #[test]
    fn display_mask_out_of_bounds() {
        let e = ContingencyError::MaskOutOfBounds {
            index: 12,
            num_cells: 10,
        };
        assert_eq!(
            e.to_string(),
            "mask cell index 12 out of bounds for domain of 10 cells"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ContingencyError>();
    }
}
