//! Persistence of daily probabilistic contingency tables.
//!
//! Daily tables are written once per (case, date) as small CSV files and
//! re-read into an in-memory [`DaySet`] before any resampling happens, so
//! the bootstrap loop never touches the filesystem.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use tlaloc_store::{CaseKey, TableStore};
//!
//! let store = TableStore::new("Data/Compute/DailyTables");
//! let key = CaseKey::new("ENS", "coast", 6, 85, 12, 24);
//! let dates: Vec<NaiveDate> = (0..31)
//!     .map(|d| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(d))
//!     .collect();
//! let days = store.load_period(&key, &dates).unwrap();
//! println!("{} of {} days present", days.n_present(), days.len());
//! ```

mod csv_io;
mod day_set;
mod error;
mod key;

pub use csv_io::TableStore;
pub use day_set::DaySet;
pub use error::StoreError;
pub use key::CaseKey;
