//! Case identity: which verification tuple a table belongs to.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Identifies one verification case: forecasting system, region, flood
/// report confidence cutoff (EFFCI), rainfall event magnitude percentile,
/// accumulation hours and lead step.
///
/// One daily table file exists per `CaseKey` and date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseKey {
    system: String,
    region: String,
    effci: u8,
    magnitude: u8,
    accumulation_hours: u32,
    lead_step: u32,
}

impl CaseKey {
    /// Creates a case key.
    pub fn new(
        system: impl Into<String>,
        region: impl Into<String>,
        effci: u8,
        magnitude: u8,
        accumulation_hours: u32,
        lead_step: u32,
    ) -> Self {
        Self {
            system: system.into(),
            region: region.into(),
            effci,
            magnitude,
            accumulation_hours,
            lead_step,
        }
    }

    /// Returns the forecasting system name.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Returns the region name.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the EFFCI cutoff.
    pub fn effci(&self) -> u8 {
        self.effci
    }

    /// Returns the event magnitude percentile.
    pub fn magnitude(&self) -> u8 {
        self.magnitude
    }

    /// Returns the accumulation period in hours.
    pub fn accumulation_hours(&self) -> u32 {
        self.accumulation_hours
    }

    /// Returns the lead step in hours.
    pub fn lead_step(&self) -> u32 {
        self.lead_step
    }

    /// Returns the directory holding this case's daily table files,
    /// relative to the store root.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(format!("{:02}h", self.accumulation_hours))
            .join(format!("vre{:02}", self.magnitude))
            .join(&self.system)
            .join(format!("effci{:02}", self.effci))
            .join(&self.region)
            .join(format!("step{:03}", self.lead_step))
    }

    /// Returns the full path of the daily table file for `date`.
    pub fn table_path(&self, root: &Path, date: NaiveDate) -> PathBuf {
        self.dir(root).join(format!("ct_{}.csv", date.format("%Y%m%d")))
    }
}

impl fmt::Display for CaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} effci>={} vre{:02} {:02}h t+{}",
            self.system,
            self.region,
            self.effci,
            self.magnitude,
            self.accumulation_hours,
            self.lead_step
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_layout() {
        let key = CaseKey::new("ENS", "coast", 6, 85, 12, 24);
        let date = NaiveDate::from_ymd_opt(2020, 3, 7).unwrap();
        let path = key.table_path(Path::new("/data"), date);
        assert_eq!(
            path,
            PathBuf::from("/data/12h/vre85/ENS/effci06/coast/step024/ct_20200307.csv")
        );
    }

    #[test]
    fn display_is_compact() {
        let key = CaseKey::new("ecPoint", "highlands", 1, 99, 12, 120);
        assert_eq!(key.to_string(), "ecPoint highlands effci>=1 vre99 12h t+120");
    }
}
