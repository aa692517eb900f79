//! Summation of daily contingency tables over a verification period.

use tracing::debug;

use crate::error::ContingencyError;
use crate::table::ContingencyTable;

/// Sums daily tables over an ordered day sequence.
///
/// Each item is either a table (day present) or `None` (forecast or
/// observations missing for that day). Absent days contribute nothing and
/// are tolerated; a fully absent period is not.
///
/// # Errors
///
/// Returns [`ContingencyError::NoDataAvailable`] if no day is present, and
/// [`ContingencyError::MemberMismatch`] if present tables disagree on
/// ensemble size.
pub fn aggregate<'a, I>(day_tables: I) -> Result<ContingencyTable, ContingencyError>
where
    I: IntoIterator<Item = Option<&'a ContingencyTable>>,
{
    let mut total: Option<ContingencyTable> = None;
    let mut absent = 0usize;
    for day in day_tables {
        match day {
            Some(table) => match total.as_mut() {
                Some(t) => t.add_assign(table)?,
                None => total = Some(table.clone()),
            },
            None => absent += 1,
        }
    }
    if absent > 0 {
        debug!(absent, "days without a contingency table were skipped");
    }
    total.ok_or(ContingencyError::NoDataAvailable)
}

/// Sums daily tables over a resampled index multiset.
///
/// `indices` addresses slots of `day_tables`; a repeated index contributes
/// its table once per occurrence. Used by the bootstrap engine, which draws
/// indices with replacement.
///
/// # Errors
///
/// Returns [`ContingencyError::NoDataAvailable`] if every drawn slot is
/// absent, and [`ContingencyError::MaskOutOfBounds`] if an index exceeds the
/// slot count.
pub fn aggregate_indices(
    day_tables: &[Option<ContingencyTable>],
    indices: &[usize],
) -> Result<ContingencyTable, ContingencyError> {
    let mut total: Option<ContingencyTable> = None;
    for &i in indices {
        let slot = day_tables
            .get(i)
            .ok_or(ContingencyError::MaskOutOfBounds {
                index: i,
                num_cells: day_tables.len(),
            })?;
        if let Some(table) = slot {
            match total.as_mut() {
                Some(t) => t.add_assign(table)?,
                None => total = Some(table.clone()),
            }
        }
    }
    total.ok_or(ContingencyError::NoDataAvailable)
}
