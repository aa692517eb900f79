//! The probabilistic contingency table type.

use crate::error::ContingencyError;

/// One row of a contingency table: the outcome counts of a single
/// member-count decision rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableRow {
    /// Minimum number of members that must exceed the threshold for a
    /// YES forecast under this rule.
    pub members_required: u32,
    /// Cells with forecast YES and an observed flood report.
    pub hits: u64,
    /// Cells with forecast YES and no observed report.
    pub false_alarms: u64,
    /// Cells with forecast NO and an observed flood report.
    pub misses: u64,
    /// Cells with forecast NO and no observed report.
    pub correct_negatives: u64,
}

impl TableRow {
    /// Sum of all four outcome counts. Equals the grid-cell count for a
    /// daily table, or cells × present-day-occurrences for an aggregate.
    pub fn total(&self) -> u64 {
        self.hits + self.false_alarms + self.misses + self.correct_negatives
    }
}

/// A probabilistic contingency table over all member-count decision rules.
///
/// Row `k` (k = 0..=num_members) holds the outcome counts of the rule
/// "forecast YES iff at least `k` ensemble members exceed the threshold".
/// Row 0 is the always-YES rule; row `num_members` requires every member.
/// Rows are ordered by ascending `members_required`.
///
/// Daily tables and period aggregates share this type: aggregation is
/// element-wise addition of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    rows: Vec<TableRow>,
}

impl ContingencyTable {
    /// Builds a table from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`ContingencyError::EmptyRegion`] if `rows` is empty, and
    /// [`ContingencyError::BadRowLabel`] if the `members_required` labels
    /// are not the ascending sequence 0..rows.len().
    pub fn from_rows(rows: Vec<TableRow>) -> Result<Self, ContingencyError> {
        if rows.is_empty() {
            return Err(ContingencyError::EmptyRegion);
        }
        for (k, row) in rows.iter().enumerate() {
            if row.members_required as usize != k {
                return Err(ContingencyError::BadRowLabel {
                    index: k,
                    expected: k as u32,
                    got: row.members_required,
                });
            }
        }
        Ok(Self { rows })
    }

    /// Creates an all-zero table for an ensemble of `num_members` members.
    pub fn zeros(num_members: usize) -> Self {
        let rows = (0..=num_members as u32)
            .map(|k| TableRow {
                members_required: k,
                ..TableRow::default()
            })
            .collect();
        Self { rows }
    }

    /// Returns the ensemble size this table was built for.
    pub fn num_members(&self) -> usize {
        self.rows.len() - 1
    }

    /// Returns the number of decision-rule rows (`num_members + 1`).
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns all rows, ordered by ascending `members_required`.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Returns the row for the rule "at least `k` members".
    pub fn row(&self, k: usize) -> Option<&TableRow> {
        self.rows.get(k)
    }

    /// Adds another table's counts into this one, element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`ContingencyError::MemberMismatch`] if the tables were built
    /// for different ensemble sizes.
    pub fn add_assign(&mut self, other: &ContingencyTable) -> Result<(), ContingencyError> {
        if other.num_members() != self.num_members() {
            return Err(ContingencyError::MemberMismatch {
                expected: self.num_members(),
                got: other.num_members(),
            });
        }
        for (a, b) in self.rows.iter_mut().zip(other.rows.iter()) {
            a.hits += b.hits;
            a.false_alarms += b.false_alarms;
            a.misses += b.misses;
            a.correct_negatives += b.correct_negatives;
        }
        Ok(())
    }
}
