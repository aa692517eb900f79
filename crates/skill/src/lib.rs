//! Skill scores derived from probabilistic contingency tables.
//!
//! Two verification measures over an aggregated [`ContingencyTable`]:
//! frequency bias per decision rule, and the area under the ROC curve
//! summarising discrimination across all rules.
//!
//! Undefined ratios (zero denominators) surface as NaN sentinels rather
//! than errors; bootstrap consumers propagate them untouched.
//!
//! [`ContingencyTable`]: tlaloc_contingency::ContingencyTable

mod bias;
mod roc;

pub use bias::{BiasDenominator, frequency_bias};
pub use roc::area_under_roc;
