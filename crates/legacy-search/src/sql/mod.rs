//! SQL expression tree and rendering.
//!
//! Handlers build [`SqlExpr`] values; gateways attach them to a [`Select`]
//! and render the whole statement into a [`SqlFragment`].

mod expr;
mod filter;
mod fragment;
mod select;

pub use expr::{ArithOp, Column, CompareOp, Operand, SqlExpr};
pub use filter::operator_filter;
pub use fragment::{SqlFragment, SqlParam};
pub use select::{Select, SortDirection};

/// Escapes `%`, `_` and `\` and maps the `*` wildcard to `%`.
pub fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => pattern.push_str("\\\\"),
            '%' => pattern.push_str("\\%"),
            '_' => pattern.push_str("\\_"),
            '*' => pattern.push('%'),
            other => pattern.push(other),
        }
    }
    pattern
}
