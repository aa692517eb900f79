//! Bootstrap output: the real statistic plus its resampled distribution.

/// An empirical percentile confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

/// The real (non-resampled) value of a skill statistic together with one
/// value per bootstrap repetition.
///
/// `T` is `f64` for AROC and `Vec<f64>` for the per-rule frequency bias.
/// NaN entries mark repetitions whose resample was undefined (e.g. only
/// absent days were drawn); they are excluded from interval estimation.
#[derive(Debug, Clone)]
pub struct BootstrapDistribution<T> {
    real: T,
    resamples: Vec<T>,
}

impl<T> BootstrapDistribution<T> {
    pub(crate) fn new(real: T, resamples: Vec<T>) -> Self {
        Self { real, resamples }
    }

    /// Returns the statistic computed on the full, non-resampled period.
    pub fn real(&self) -> &T {
        &self.real
    }

    /// Returns the resampled values, one per repetition, in repetition order.
    pub fn resamples(&self) -> &[T] {
        &self.resamples
    }
}

impl BootstrapDistribution<f64> {
    /// Computes the percentile confidence interval at `level` (e.g. 0.95).
    ///
    /// NaN resamples are excluded. Returns a NaN interval when no resample
    /// is finite, and an interval of that single value when only one is.
    pub fn confidence_interval(&self, level: f64) -> ConfidenceInterval {
        percentile_interval(&self.resamples, level)
    }
}

impl BootstrapDistribution<Vec<f64>> {
    /// Computes the per-rule percentile confidence intervals at `level`.
    ///
    /// Element `k` is the interval of the rule-`k` bias across repetitions.
    pub fn confidence_intervals(&self, level: f64) -> Vec<ConfidenceInterval> {
        let n_rules = self.real.len();
        (0..n_rules)
            .map(|k| {
                let column: Vec<f64> = self
                    .resamples
                    .iter()
                    .map(|v| v.get(k).copied().unwrap_or(f64::NAN))
                    .collect();
                percentile_interval(&column, level)
            })
            .collect()
    }
}

/// Percentile-method interval over the finite values of `samples`.
fn percentile_interval(samples: &[f64], level: f64) -> ConfidenceInterval {
    let mut finite: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return ConfidenceInterval {
            lower: f64::NAN,
            upper: f64::NAN,
        };
    }
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let tail = (1.0 - level) / 2.0;
    ConfidenceInterval {
        lower: quantile_type7(&finite, tail),
        upper: quantile_type7(&finite, 1.0 - tail),
    }
}

/// R's default quantile algorithm (type=7), on pre-sorted input.
fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}
