//! Content and location criterion translation.
//!
//! [`CriteriaConverter`] dispatches each [`Criterion`](crate::types::Criterion)
//! variant to its handler and returns the resulting [`SqlExpr`](crate::sql::SqlExpr).
//! The expression refers to the base aliases of the search query:
//!
//! | alias | table |
//! |-------|-------|
//! | `c` | `ezcontentobject` |
//! | `v` | `ezcontentobject_version` (current version) |
//! | `t` | `ezcontentobject_tree` (location scope) or `ezcontentobject_trash` (trash scope) |
//!
//! Location criteria in content scope are expressed as sub-selects on
//! `ezcontentobject_tree`; criteria that only make sense for a single
//! location (depth, priority, main location) are rejected there.

mod converter;
pub mod handlers;

pub use converter::{CriteriaConverter, SearchContext, SearchScope};
