//! Contingency table construction for one verification day.

use crate::error::ContingencyError;
use crate::fields::{ForecastField, ObservationField};
use crate::table::{ContingencyTable, TableRow};

/// Builds the daily probabilistic contingency table for one region.
///
/// Both fields must already be restricted to the region's grid cells
/// (see [`crate::build_region_table`] for the masked variant). For each
/// cell the number of members with rainfall `>= threshold` is counted;
/// row `k` of the result scores the rule "forecast YES iff at least `k`
/// members exceed the threshold".
///
/// Every row's outcome counts sum to the grid-cell count.
///
/// # Errors
///
/// Returns [`ContingencyError::ShapeMismatch`] if the fields disagree on
/// cell count, and [`ContingencyError::EmptyRegion`] if both are empty.
pub fn build_table(
    forecast: &ForecastField,
    observed: &ObservationField,
    threshold: f64,
) -> Result<ContingencyTable, ContingencyError> {
    let n = forecast.num_cells();
    if n != observed.num_cells() {
        return Err(ContingencyError::ShapeMismatch {
            forecast_cells: n,
            observed_cells: observed.num_cells(),
        });
    }
    if n == 0 {
        return Err(ContingencyError::EmptyRegion);
    }

    let num_members = forecast.num_members();

    // Votes per cell: how many members reach the threshold.
    let mut votes = vec![0usize; n];
    for m in 0..num_members {
        for (v, &tp) in votes.iter_mut().zip(forecast.member(m)) {
            if tp >= threshold {
                *v += 1;
            }
        }
    }

    // Histogram of vote counts, split by observed outcome. Row k then
    // follows from suffix sums: a cell with v votes is a YES for every
    // rule k <= v.
    let mut event_by_votes = vec![0u64; num_members + 1];
    let mut no_event_by_votes = vec![0u64; num_members + 1];
    for (cell, &v) in votes.iter().enumerate() {
        if observed.is_event(cell) {
            event_by_votes[v] += 1;
        } else {
            no_event_by_votes[v] += 1;
        }
    }
    let total_events: u64 = event_by_votes.iter().sum();
    let total_no_events: u64 = no_event_by_votes.iter().sum();

    let mut rows = Vec::with_capacity(num_members + 1);
    let mut hits = total_events;
    let mut false_alarms = total_no_events;
    for k in 0..=num_members {
        rows.push(TableRow {
            members_required: k as u32,
            hits,
            false_alarms,
            misses: total_events - hits,
            correct_negatives: total_no_events - false_alarms,
        });
        // Cells with exactly k votes drop out of the YES set at rule k+1.
        hits -= event_by_votes[k];
        false_alarms -= no_event_by_votes[k];
    }

    ContingencyTable::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 members, 4 cells. Member 0 exceeds at cells 0 and 1, member 1 at
    /// cell 0 only; reports at cells 0 and 3.
    fn sample_inputs() -> (ForecastField, ObservationField) {
        let fc = ForecastField::new(
            2,
            4,
            vec![
                10.0, 8.0, 1.0, 0.0, // member 0
                9.0, 2.0, 0.0, 3.0, // member 1
            ],
        )
        .unwrap();
        let obs = ObservationField::new(vec![1, 0, 0, 2]);
        (fc, obs)
    }

    #[test]
    fn hand_checked_counts() {
        let (fc, obs) = sample_inputs();
        // threshold 5 -> votes = [2, 1, 0, 0]; events at cells 0 and 3.
        let t = build_table(&fc, &obs, 5.0).unwrap();
        assert_eq!(t.num_rows(), 3);

        // k=0: every cell is a YES.
        let r0 = t.row(0).unwrap();
        assert_eq!((r0.hits, r0.false_alarms, r0.misses, r0.correct_negatives), (2, 2, 0, 0));

        // k=1: YES at cells 0 and 1.
        let r1 = t.row(1).unwrap();
        assert_eq!((r1.hits, r1.false_alarms, r1.misses, r1.correct_negatives), (1, 1, 1, 1));

        // k=2: YES at cell 0 only.
        let r2 = t.row(2).unwrap();
        assert_eq!((r2.hits, r2.false_alarms, r2.misses, r2.correct_negatives), (1, 0, 1, 2));
    }

    #[test]
    fn rows_sum_to_cell_count() {
        let (fc, obs) = sample_inputs();
        for threshold in [0.0, 1.0, 2.5, 5.0, 100.0] {
            let t = build_table(&fc, &obs, threshold).unwrap();
            for row in t.rows() {
                assert_eq!(row.total(), 4, "threshold {threshold}");
            }
        }
    }

    #[test]
    fn threshold_is_inclusive() {
        let fc = ForecastField::new(1, 1, vec![5.0]).unwrap();
        let obs = ObservationField::new(vec![1]);
        let t = build_table(&fc, &obs, 5.0).unwrap();
        // Exactly at threshold counts as exceeding.
        assert_eq!(t.row(1).unwrap().hits, 1);
    }

    #[test]
    fn no_members_exceed() {
        let fc = ForecastField::new(2, 3, vec![0.0; 6]).unwrap();
        let obs = ObservationField::new(vec![1, 0, 1]);
        let t = build_table(&fc, &obs, 1.0).unwrap();
        // Row 0 still forecasts YES everywhere.
        assert_eq!(t.row(0).unwrap().hits, 2);
        assert_eq!(t.row(0).unwrap().false_alarms, 1);
        // Stricter rows forecast NO everywhere.
        for k in 1..=2 {
            let r = t.row(k).unwrap();
            assert_eq!(r.hits, 0);
            assert_eq!(r.misses, 2);
            assert_eq!(r.correct_negatives, 1);
        }
    }

    #[test]
    fn shape_mismatch() {
        let fc = ForecastField::new(2, 4, vec![0.0; 8]).unwrap();
        let obs = ObservationField::new(vec![0, 1]);
        assert!(matches!(
            build_table(&fc, &obs, 1.0),
            Err(ContingencyError::ShapeMismatch {
                forecast_cells: 4,
                observed_cells: 2,
            })
        ));
    }

    #[test]
    fn empty_region_is_an_error() {
        let fc = ForecastField::new(2, 0, vec![]).unwrap();
        let obs = ObservationField::new(vec![]);
        assert!(matches!(
            build_table(&fc, &obs, 1.0),
            Err(ContingencyError::EmptyRegion)
        ));
    }
}
