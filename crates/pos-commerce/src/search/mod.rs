//! Search module.
//!
//! Contains the record field model and the collection filter used by every
//! list view.

mod field;
mod filter;

pub use field::{FieldValue, Record};
pub use filter::{distinct_values, filter, filter_to_vec, Accept, FilterCriteria, Matcher, ALL};
