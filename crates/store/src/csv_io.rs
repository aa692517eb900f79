//! CSV reading and writing of daily contingency tables.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tlaloc_contingency::{ContingencyTable, TableRow};

use crate::day_set::DaySet;
use crate::error::StoreError;
use crate::key::CaseKey;

/// One CSV record: a single decision rule's outcome counts.
#[derive(Debug, Serialize, Deserialize)]
struct RowRecord {
    members_exceeding: u32,
    hits: u64,
    false_alarms: u64,
    misses: u64,
    correct_negatives: u64,
}

/// Filesystem store of daily contingency tables, one CSV per case and date.
#[derive(Debug, Clone)]
pub struct TableStore {
    root: PathBuf,
}

impl TableStore {
    /// Creates a store rooted at `root`. The directory need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes one day's table, creating the case directory as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Csv`] on write failure.
    pub fn write(
        &self,
        key: &CaseKey,
        date: NaiveDate,
        table: &ContingencyTable,
    ) -> Result<(), StoreError> {
        let dir = key.dir(&self.root);
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = key.table_path(&self.root, date);
        let mut writer = csv::Writer::from_path(&path).map_err(|source| StoreError::Csv {
            path: path.clone(),
            source,
        })?;
        for row in table.rows() {
            let record = RowRecord {
                members_exceeding: row.members_required,
                hits: row.hits,
                false_alarms: row.false_alarms,
                misses: row.misses,
                correct_negatives: row.correct_negatives,
            };
            writer.serialize(record).map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Reads one day's table. A missing file means the day is absent and
    /// yields `Ok(None)`; an existing but unreadable file is an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Csv`] on a parse failure and
    /// [`StoreError::Malformed`] if the rows fail table validation.
    pub fn read(
        &self,
        key: &CaseKey,
        date: NaiveDate,
    ) -> Result<Option<ContingencyTable>, StoreError> {
        let path = key.table_path(&self.root, date);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut rows = Vec::new();
        for record in reader.deserialize::<RowRecord>() {
            let record = record.map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
            rows.push(TableRow {
                members_required: record.members_exceeding,
                hits: record.hits,
                false_alarms: record.false_alarms,
                misses: record.misses,
                correct_negatives: record.correct_negatives,
            });
        }
        let table = ContingencyTable::from_rows(rows).map_err(|e| StoreError::Malformed {
            path,
            reason: e.to_string(),
        })?;
        Ok(Some(table))
    }

    /// Loads a whole verification period into memory.
    ///
    /// Absent days become `None` slots; the bootstrap engine resamples the
    /// returned set without further I/O.
    ///
    /// # Errors
    ///
    /// Propagates any read error on a file that exists.
    pub fn load_period(&self, key: &CaseKey, dates: &[NaiveDate]) -> Result<DaySet, StoreError> {
        let mut tables = Vec::with_capacity(dates.len());
        for &date in dates {
            let table = self.read(key, date)?;
            if table.is_none() {
                debug!(case = %key, %date, "no daily table, treating day as absent");
            }
            tables.push(table);
        }
        Ok(DaySet::new(dates.to_vec(), tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ContingencyTable {
        let rows = vec![
            TableRow {
                members_required: 0,
                hits: 2,
                false_alarms: 2,
                misses: 0,
                correct_negatives: 0,
            },
            TableRow {
                members_required: 1,
                hits: 1,
                false_alarms: 1,
                misses: 1,
                correct_negatives: 1,
            },
            TableRow {
                members_required: 2,
                hits: 1,
                false_alarms: 0,
                misses: 1,
                correct_negatives: 2,
            },
        ];
        ContingencyTable::from_rows(rows).unwrap()
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path());
        let key = CaseKey::new("ENS", "coast", 6, 85, 12, 24);
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();

        let table = sample_table();
        store.write(&key, date, &table).unwrap();

        let loaded = store.read(&key, date).unwrap().unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn missing_file_is_absent_day() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path());
        let key = CaseKey::new("ENS", "coast", 6, 85, 12, 24);
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();

        assert!(store.read(&key, date).unwrap().is_none());
    }

    #[test]
    fn malformed_rows_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path());
        let key = CaseKey::new("ENS", "coast", 6, 85, 12, 24);
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();

        let path = key.table_path(store.root(), date);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        // Rule labels out of order: fails table validation.
        std::fs::write(
            &path,
            "members_exceeding,hits,false_alarms,misses,correct_negatives\n\
             1,1,1,1,1\n\
             0,2,2,0,0\n",
        )
        .unwrap();

        assert!(matches!(
            store.read(&key, date),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn load_period_mixes_present_and_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path());
        let key = CaseKey::new("ecPoint", "highlands", 1, 99, 12, 48);

        let dates: Vec<NaiveDate> = (1..=4)
            .map(|d| NaiveDate::from_ymd_opt(2020, 2, d).unwrap())
            .collect();
        store.write(&key, dates[0], &sample_table()).unwrap();
        store.write(&key, dates[2], &sample_table()).unwrap();

        let set = store.load_period(&key, &dates).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.n_present(), 2);
        assert!(set.get(dates[0]).is_some());
        assert!(set.get(dates[1]).is_none());
    }
}
