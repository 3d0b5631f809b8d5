//! Multi-field record sorting
//!
//! Every field has one comparator written in descending orientation; the
//! ascending order is its exact reverse. Ties on the primary key fall back to
//! size and/or file name, and a last ordinal comparison of the full name makes
//! the order total. The sort itself is stable, so only records with identical
//! full names keep their input order in both directions.
//!
//! Auxiliary fields are resolved once per pass into a scratch map keyed by
//! record name, so records are never mutated to hold sort keys.

mod compare;
mod spec;
mod toggle;

pub use compare::{compare_ignore_case, sort_records};
pub use spec::{SortField, SortOrder, SortSpec};
pub use toggle::SortState;
