//! Forecast and observation fields for one verification day.

use crate::error::ContingencyError;

/// One ensemble forecast of accumulated rainfall at one lead time.
///
/// Stored member-major: member `m` occupies `values[m * num_cells .. (m + 1) * num_cells]`.
/// Immutable once constructed; a day's field is discarded after its
/// contingency table is built.
#[derive(Debug, Clone)]
pub struct ForecastField {
    num_members: usize,
    num_cells: usize,
    values: Vec<f64>,
}

impl ForecastField {
    /// Creates a forecast field from a flat member-major array.
    ///
    /// # Errors
    ///
    /// Returns [`ContingencyError::LengthMismatch`] if `values.len()` is not
    /// `num_members * num_cells`.
    pub fn new(
        num_members: usize,
        num_cells: usize,
        values: Vec<f64>,
    ) -> Result<Self, ContingencyError> {
        let expected = num_members * num_cells;
        if values.len() != expected {
            return Err(ContingencyError::LengthMismatch {
                field: "values",
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            num_members,
            num_cells,
            values,
        })
    }

    /// Returns the number of ensemble members.
    pub fn num_members(&self) -> usize {
        self.num_members
    }

    /// Returns the number of grid cells.
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Returns member `m`'s rainfall values over all grid cells.
    ///
    /// # Panics
    ///
    /// Panics if `m >= num_members`.
    pub fn member(&self, m: usize) -> &[f64] {
        assert!(m < self.num_members, "member index {m} out of bounds");
        &self.values[m * self.num_cells..(m + 1) * self.num_cells]
    }

    /// Restricts the field to the given grid-cell indices.
    ///
    /// # Errors
    ///
    /// Returns [`ContingencyError::MaskOutOfBounds`] if any index exceeds the
    /// domain size.
    pub fn restrict(&self, cells: &[usize]) -> Result<Self, ContingencyError> {
        for &c in cells {
            if c >= self.num_cells {
                return Err(ContingencyError::MaskOutOfBounds {
                    index: c,
                    num_cells: self.num_cells,
                });
            }
        }
        let mut values = Vec::with_capacity(self.num_members * cells.len());
        for m in 0..self.num_members {
            let row = self.member(m);
            values.extend(cells.iter().map(|&c| row[c]));
        }
        Ok(Self {
            num_members: self.num_members,
            num_cells: cells.len(),
            values,
        })
    }
}

/// One day's gridded flood-report counts for one accumulation period.
///
/// A count greater than zero means at least one flood report fell in that
/// grid cell; only positivity matters downstream.
#[derive(Debug, Clone)]
pub struct ObservationField {
    counts: Vec<u32>,
}

impl ObservationField {
    /// Creates an observation field from per-cell report counts.
    pub fn new(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    /// Returns the number of grid cells.
    pub fn num_cells(&self) -> usize {
        self.counts.len()
    }

    /// Returns the per-cell report counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Returns `true` if the cell has at least one flood report.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of bounds.
    pub fn is_event(&self, cell: usize) -> bool {
        self.counts[cell] > 0
    }

    /// Restricts the field to the given grid-cell indices.
    ///
    /// # Errors
    ///
    /// Returns [`ContingencyError::MaskOutOfBounds`] if any index exceeds the
    /// domain size.
    pub fn restrict(&self, cells: &[usize]) -> Result<Self, ContingencyError> {
        let mut counts = Vec::with_capacity(cells.len());
        for &c in cells {
            match self.counts.get(c) {
                Some(&v) => counts.push(v),
                None => {
                    return Err(ContingencyError::MaskOutOfBounds {
                        index: c,
                        num_cells: self.counts.len(),
                    });
                }
            }
        }
        Ok(Self { counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_member_rows() {
        let fc = ForecastField::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(fc.member(0), &[1.0, 2.0, 3.0]);
        assert_eq!(fc.member(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn forecast_bad_length() {
        let result = ForecastField::new(2, 3, vec![1.0; 5]);
        assert!(matches!(
            result,
            Err(ContingencyError::LengthMismatch {
                field: "values",
                expected: 6,
                got: 5,
            })
        ));
    }

    #[test]
    fn forecast_restrict() {
        let fc = ForecastField::new(2, 4, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        let sub = fc.restrict(&[0, 2]).unwrap();
        assert_eq!(sub.num_cells(), 2);
        assert_eq!(sub.member(0), &[1.0, 3.0]);
        assert_eq!(sub.member(1), &[5.0, 7.0]);
    }

    #[test]
    fn forecast_restrict_out_of_bounds() {
        let fc = ForecastField::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            fc.restrict(&[0, 3]),
            Err(ContingencyError::MaskOutOfBounds {
                index: 3,
                num_cells: 3,
            })
        ));
    }

    #[test]
    fn forecast_restrict_empty_mask() {
        let fc = ForecastField::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let sub = fc.restrict(&[]).unwrap();
        assert_eq!(sub.num_cells(), 0);
    }

    #[test]
    fn observation_events() {
        let obs = ObservationField::new(vec![0, 2, 1, 0]);
        assert!(!obs.is_event(0));
        assert!(obs.is_event(1));
        assert!(obs.is_event(2));
        assert!(!obs.is_event(3));
    }

    #[test]
    fn observation_restrict() {
        let obs = ObservationField::new(vec![0, 2, 1, 0]);
        let sub = obs.restrict(&[1, 3]).unwrap();
        assert_eq!(sub.counts(), &[2, 0]);
    }

    #[test]
    fn observation_restrict_out_of_bounds() {
        let obs = ObservationField::new(vec![0, 1]);
        assert!(obs.restrict(&[5]).is_err());
    }
}
