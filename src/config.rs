use std::path::PathBuf;

use anyhow::bail;
use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level tlaloc configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlalocConfig {
    /// Base RNG seed for the bootstrap.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Directory paths.
    pub io: IoToml,

    /// Verification period.
    pub period: PeriodToml,

    /// Lead steps to verify.
    pub steps: StepsToml,

    /// Event definition axes.
    pub events: EventsToml,

    /// Region names.
    pub regions: Vec<String>,

    /// Forecasting systems under verification.
    pub systems: Vec<SystemToml>,

    /// Bootstrap settings.
    #[serde(default)]
    pub bootstrap: BootstrapToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Root of the daily contingency table store.
    pub tables_dir: PathBuf,
    /// Directory for verification JSON output.
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    /// First verification day (YYYY-MM-DD).
    pub start: NaiveDate,
    /// Last verification day, inclusive (YYYY-MM-DD).
    pub end: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepsToml {
    /// First final step of the accumulation periods, in hours.
    pub first: u32,
    /// Last final step, inclusive, in hours.
    pub last: u32,
    /// Discretization between steps, in hours.
    #[serde(default = "default_disc")]
    pub disc: u32,
}

fn default_disc() -> u32 {
    6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsToml {
    /// Rainfall accumulation period, in hours.
    #[serde(default = "default_accumulation")]
    pub accumulation_hours: u32,
    /// Flood-report confidence cutoffs to verify against.
    pub effci: Vec<u8>,
    /// Event magnitude percentiles of the rainfall climatology.
    pub magnitudes: Vec<u8>,
}

fn default_accumulation() -> u32 {
    12
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemToml {
    /// Forecasting system name (store directory component).
    pub name: String,
    /// Number of ensemble members.
    pub members: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapToml {
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// Frequency bias fallback for rows with zero observed events:
    /// "undefined" (NaN) or "ensemble-size".
    #[serde(default = "default_bias_fallback")]
    pub bias_fallback: String,
}

impl Default for BootstrapToml {
    fn default() -> Self {
        Self {
            repetitions: default_repetitions(),
            confidence_level: default_confidence_level(),
            bias_fallback: default_bias_fallback(),
        }
    }
}

fn default_repetitions() -> usize {
    10_000
}

fn default_confidence_level() -> f64 {
    0.95
}

fn default_bias_fallback() -> String {
    "undefined".to_string()
}

impl TlalocConfig {
    /// Validates cross-field constraints the type system cannot express.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.period.end < self.period.start {
            bail!(
                "period end {} precedes start {}",
                self.period.end,
                self.period.start
            );
        }
        if self.steps.last < self.steps.first {
            bail!(
                "steps.last ({}) precedes steps.first ({})",
                self.steps.last,
                self.steps.first
            );
        }
        if self.steps.disc == 0 {
            bail!("steps.disc must be >= 1");
        }
        if self.steps.first < self.events.accumulation_hours {
            bail!(
                "steps.first ({}) is shorter than the accumulation period ({} h)",
                self.steps.first,
                self.events.accumulation_hours
            );
        }
        if self.regions.is_empty() {
            bail!("at least one region is required");
        }
        if self.systems.is_empty() {
            bail!("at least one forecasting system is required");
        }
        if self.events.effci.is_empty() {
            bail!("at least one EFFCI cutoff is required");
        }
        if self.events.magnitudes.is_empty() {
            bail!("at least one event magnitude is required");
        }
        let level = self.bootstrap.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            bail!(
                "confidence_level must be in (0, 1), got {}",
                self.bootstrap.confidence_level
            );
        }
        if !matches!(
            self.bootstrap.bias_fallback.as_str(),
            "undefined" | "ensemble-size"
        ) {
            bail!(
                "bias_fallback must be \"undefined\" or \"ensemble-size\", got {:?}",
                self.bootstrap.bias_fallback
            );
        }
        Ok(())
    }

    /// Returns the verification days, chronological and inclusive.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut d = self.period.start;
        while d <= self.period.end {
            days.push(d);
            d = d + chrono::Days::new(1);
        }
        days
    }

    /// Returns the lead steps to verify, in hours.
    pub fn lead_steps(&self) -> Vec<u32> {
        (self.steps.first..=self.steps.last)
            .step_by(self.steps.disc as usize)
            .collect()
    }
}
