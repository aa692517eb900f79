//! Frequency bias per decision rule.

use tlaloc_contingency::ContingencyTable;

/// Policy for rows whose event count (hits + misses) is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiasDenominator {
    /// Leave the ratio undefined: the row's bias is NaN. The event never
    /// occurred, so the ratio has no meaning.
    #[default]
    Undefined,
    /// Divide the forecast-yes count by the ensemble size instead. Kept for
    /// comparability with older verification output; opt-in only.
    EnsembleSize,
}

/// Computes frequency bias for every decision rule of an aggregate table.
///
/// Element `k` is `(hits + false_alarms) / (hits + misses)` for the rule
/// "at least `k` members": the ratio of YES forecasts to observed events.
/// Values above 1 indicate over-forecasting.
///
/// Rows where the event was never observed follow `policy`.
pub fn frequency_bias(table: &ContingencyTable, policy: BiasDenominator) -> Vec<f64> {
    table
        .rows()
        .iter()
        .map(|row| {
            let forecast_yes = (row.hits + row.false_alarms) as f64;
            let observed_yes = (row.hits + row.misses) as f64;
            if observed_yes > 0.0 {
                forecast_yes / observed_yes
            } else {
                match policy {
                    BiasDenominator::Undefined => f64::NAN,
                    BiasDenominator::EnsembleSize => forecast_yes / table.num_members() as f64,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tlaloc_contingency::{ForecastField, ObservationField, build_table};

    #[test]
    fn unbiased_rows_score_one() {
        // All members exceed everywhere, every cell observed positive:
        // every rule forecasts YES everywhere and every cell is a hit.
        let fc = ForecastField::new(2, 4, vec![9.0; 8]).unwrap();
        let obs = ObservationField::new(vec![1; 4]);
        let t = build_table(&fc, &obs, 1.0).unwrap();

        let fb = frequency_bias(&t, BiasDenominator::Undefined);
        assert_eq!(fb.len(), 3);
        // Strictest rule included.
        assert_relative_eq!(fb[2], 1.0);
        for v in fb {
            assert_relative_eq!(v, 1.0);
        }
    }

    #[test]
    fn over_forecasting_exceeds_one() {
        // Both members exceed at 3 of 4 cells; only cell 0 has a report.
        let fc = ForecastField::new(2, 4, vec![9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0, 0.0]).unwrap();
        let obs = ObservationField::new(vec![1, 0, 0, 0]);
        let t = build_table(&fc, &obs, 1.0).unwrap();

        let fb = frequency_bias(&t, BiasDenominator::Undefined);
        // Rule k=2: 3 YES forecasts, 1 observed event.
        assert_relative_eq!(fb[2], 3.0);
        // Rule k=0: 4 YES forecasts, 1 event.
        assert_relative_eq!(fb[0], 4.0);
    }

    #[test]
    fn zero_events_default_to_nan() {
        let fc = ForecastField::new(1, 3, vec![9.0, 0.0, 0.0]).unwrap();
        let obs = ObservationField::new(vec![0, 0, 0]);
        let t = build_table(&fc, &obs, 1.0).unwrap();

        let fb = frequency_bias(&t, BiasDenominator::Undefined);
        assert!(fb.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn zero_events_ensemble_size_fallback() {
        let fc = ForecastField::new(2, 4, vec![9.0, 9.0, 0.0, 0.0, 9.0, 0.0, 0.0, 0.0]).unwrap();
        let obs = ObservationField::new(vec![0; 4]);
        let t = build_table(&fc, &obs, 1.0).unwrap();

        let fb = frequency_bias(&t, BiasDenominator::EnsembleSize);
        // Rule k=1: 2 YES forecasts over ensemble size 2.
        assert_relative_eq!(fb[1], 1.0);
        assert!(fb.iter().all(|v| v.is_finite()));
    }
}
