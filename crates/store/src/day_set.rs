//! In-memory collection of one case's daily tables over a period.

use chrono::NaiveDate;
use tlaloc_contingency::ContingencyTable;

/// One verification period's daily tables, in chronological order, with
/// `None` marking days whose forecast or observations were missing.
///
/// Loaded once per case and then shared read-only with the bootstrap
/// engine, which resamples slot indices purely in memory.
#[derive(Debug, Clone)]
pub struct DaySet {
    dates: Vec<NaiveDate>,
    tables: Vec<Option<ContingencyTable>>,
}

impl DaySet {
    /// Builds a day set from parallel date and table vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length.
    pub fn new(dates: Vec<NaiveDate>, tables: Vec<Option<ContingencyTable>>) -> Self {
        assert_eq!(
            dates.len(),
            tables.len(),
            "dates and tables must be parallel"
        );
        Self { dates, tables }
    }

    /// Returns the number of day slots (present and absent).
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the period holds no day slots.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the number of days with a table.
    pub fn n_present(&self) -> usize {
        self.tables.iter().filter(|t| t.is_some()).count()
    }

    /// Returns the slot dates in chronological order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the day slots, aligned with [`DaySet::dates`].
    pub fn tables(&self) -> &[Option<ContingencyTable>] {
        &self.tables
    }

    /// Returns the table for `date`, or `None` if absent or out of period.
    pub fn get(&self, date: NaiveDate) -> Option<&ContingencyTable> {
        let idx = self.dates.iter().position(|&d| d == date)?;
        self.tables[idx].as_ref()
    }
}
