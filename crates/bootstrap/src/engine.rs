//! The resampling engine: real pass plus parallel bootstrap repetitions.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

use tlaloc_contingency::{ContingencyError, ContingencyTable, aggregate, aggregate_indices};
use tlaloc_skill::{BiasDenominator, area_under_roc, frequency_bias};

use crate::config::BootstrapConfig;
use crate::distribution::BootstrapDistribution;
use crate::error::BootstrapError;

/// Runs a bootstrap of an arbitrary skill statistic.
///
/// `day_tables` holds one slot per day of the verification period, in
/// chronological order; absent days are `None`. The statistic closure
/// receives the aggregate of a day multiset, or `None` when a resample
/// drew only absent slots, and must map that to its undefined value.
///
/// The real pass aggregates every present day exactly once. Each of the
/// `config.repetitions()` resamples draws `day_tables.len()` slot indices
/// uniformly with replacement from its own seeded generator, so the output
/// is reproducible for a given seed and independent of thread scheduling.
///
/// # Errors
///
/// Returns [`BootstrapError::EmptyPeriod`] for an empty slot sequence,
/// [`BootstrapError::NoDataAvailable`] when every slot is absent, and
/// [`BootstrapError::InvalidConfig`] from config validation.
#[tracing::instrument(skip_all, fields(n_days = day_tables.len(), repetitions = config.repetitions()))]
pub fn bootstrap_with<T, F>(
    day_tables: &[Option<ContingencyTable>],
    config: &BootstrapConfig,
    statistic: F,
) -> Result<BootstrapDistribution<T>, BootstrapError>
where
    T: Send,
    F: Fn(Option<&ContingencyTable>) -> T + Sync,
{
    config.validate()?;

    let n_days = day_tables.len();
    if n_days == 0 {
        return Err(BootstrapError::EmptyPeriod);
    }
    let n_present = day_tables.iter().filter(|d| d.is_some()).count();
    if n_present == 0 {
        return Err(BootstrapError::NoDataAvailable { n_days });
    }
    debug!(n_present, "daily tables loaded for resampling");

    // Real pass: every present day once, in original order. Also validates
    // that all daily tables share one ensemble size.
    let real_aggregate = aggregate(day_tables.iter().map(Option::as_ref))?;
    let real = statistic(Some(&real_aggregate));

    let seed = config.seed();
    let resamples: Vec<T> = (0..config.repetitions())
        .into_par_iter()
        .map(|rep| {
            let mut rng = StdRng::seed_from_u64(repetition_seed(seed, rep));
            let indices: Vec<usize> = (0..n_days).map(|_| rng.random_range(0..n_days)).collect();
            match aggregate_indices(day_tables, &indices) {
                Ok(agg) => Ok(statistic(Some(&agg))),
                // Only absent slots drawn: undefined, not fatal.
                Err(ContingencyError::NoDataAvailable) => Ok(statistic(None)),
                Err(e) => Err(BootstrapError::from(e)),
            }
        })
        .collect::<Result<Vec<T>, BootstrapError>>()?;

    Ok(BootstrapDistribution::new(real, resamples))
}

/// Bootstraps the area under the ROC curve. Undefined resamples are NaN.
pub fn bootstrap_aroc(
    day_tables: &[Option<ContingencyTable>],
    config: &BootstrapConfig,
) -> Result<BootstrapDistribution<f64>, BootstrapError> {
    bootstrap_with(day_tables, config, |agg| match agg {
        Some(table) => area_under_roc(table),
        None => f64::NAN,
    })
}

/// Bootstraps the per-rule frequency bias. Undefined resamples are
/// all-NaN vectors of the same width as the real value.
pub fn bootstrap_frequency_bias(
    day_tables: &[Option<ContingencyTable>],
    policy: BiasDenominator,
    config: &BootstrapConfig,
) -> Result<BootstrapDistribution<Vec<f64>>, BootstrapError> {
    let n_rows = day_tables
        .iter()
        .flatten()
        .next()
        .map(ContingencyTable::num_rows)
        .unwrap_or(0);
    bootstrap_with(day_tables, config, |agg| match agg {
        Some(table) => frequency_bias(table, policy),
        None => vec![f64::NAN; n_rows],
    })
}

/// Derives one repetition's private RNG seed from the base seed.
///
/// Golden-ratio stride keeps the per-repetition seeds distinct without
/// sharing generator state across workers.
fn repetition_seed(base: u64, rep: usize) -> u64 {
    base.wrapping_add((rep as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlaloc_contingency::TableRow;

    fn day_with_hits(hits: u64) -> ContingencyTable {
        let rows = (0..2u32)
            .map(|k| TableRow {
                members_required: k,
                hits,
                false_alarms: 1,
                misses: 1,
                correct_negatives: 10 - hits - 2,
            })
            .collect();
        ContingencyTable::from_rows(rows).unwrap()
    }

    #[test]
    fn repetition_seeds_are_distinct() {
        let seeds: Vec<u64> = (0..1000).map(|r| repetition_seed(42, r)).collect();
        let mut dedup = seeds.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), seeds.len());
    }

    #[test]
    fn empty_period_fails() {
        let days: Vec<Option<ContingencyTable>> = vec![];
        let cfg = BootstrapConfig::new().with_repetitions(10);
        assert!(matches!(
            bootstrap_aroc(&days, &cfg),
            Err(BootstrapError::EmptyPeriod)
        ));
    }

    #[test]
    fn all_absent_fails() {
        let days: Vec<Option<ContingencyTable>> = vec![None, None, None];
        let cfg = BootstrapConfig::new().with_repetitions(10);
        assert!(matches!(
            bootstrap_aroc(&days, &cfg),
            Err(BootstrapError::NoDataAvailable { n_days: 3 })
        ));
    }

    #[test]
    fn zero_repetitions_rejected() {
        let days = vec![Some(day_with_hits(3))];
        let cfg = BootstrapConfig::new().with_repetitions(0);
        assert!(matches!(
            bootstrap_aroc(&days, &cfg),
            Err(BootstrapError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn real_value_ignores_resampling_state() {
        let days = vec![Some(day_with_hits(2)), None, Some(day_with_hits(5))];
        let cfg_a = BootstrapConfig::new().with_repetitions(5).with_seed(1);
        let cfg_b = BootstrapConfig::new().with_repetitions(200).with_seed(999);

        let a = bootstrap_aroc(&days, &cfg_a).unwrap();
        let b = bootstrap_aroc(&days, &cfg_b).unwrap();
        assert_eq!(a.real(), b.real());
    }

    #[test]
    fn mostly_absent_period_yields_some_nan_resamples() {
        // One present slot out of four: a resample misses it with
        // probability (3/4)^4, so both outcomes appear over 200 draws.
        let days = vec![Some(day_with_hits(3)), None, None, None];
        let cfg = BootstrapConfig::new().with_repetitions(200).with_seed(7);
        let dist = bootstrap_aroc(&days, &cfg).unwrap();

        let nan_count = dist.resamples().iter().filter(|v| v.is_nan()).count();
        assert!(nan_count > 0, "expected some all-absent resamples");
        assert!(nan_count < 200, "expected some defined resamples");
    }

    #[test]
    fn frequency_bias_width_matches_rules() {
        let days = vec![Some(day_with_hits(3)), Some(day_with_hits(4))];
        let cfg = BootstrapConfig::new().with_repetitions(20).with_seed(3);
        let dist = bootstrap_frequency_bias(&days, BiasDenominator::Undefined, &cfg).unwrap();
        assert_eq!(dist.real().len(), 2);
        for resample in dist.resamples() {
            assert_eq!(resample.len(), 2);
        }
    }
}
