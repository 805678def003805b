//! Field value converters.
//!
//! Each legacy field type stores its searchable value in one column of
//! `ezcontentobject_attribute`. A [`FieldValueConverter`] names that column
//! and turns criterion values into comparable index values.
//!
//! Field types without an index column are unsearchable: the field
//! criterion handlers skip them and fail if nothing searchable remains.

mod date;
mod numeric;
mod registry;
mod text;
mod unsearchable;

use std::fmt::Debug;

use crate::core::TransformationProcessor;
use crate::error::RepositoryResult;
use crate::sql::{Operand, SqlExpr, SqlParam, operator_filter};
use crate::types::{Specification, Value};

pub use date::DateConverter;
pub use numeric::{FloatConverter, IntegerConverter};
pub use registry::{DefaultFieldTypeService, FieldValueConverterRegistry};
pub use text::TextConverter;
pub use unsearchable::UnsearchableConverter;

/// Translates field criterion values for one field type.
pub trait FieldValueConverter: Debug + Send + Sync {
    /// Column of `ezcontentobject_attribute` holding the indexed value.
    ///
    /// `None` marks the field type as unsearchable.
    fn index_column(&self) -> Option<&'static str>;

    /// The indexed representation of an empty field.
    fn empty_value(&self) -> SqlParam;

    /// Converts one criterion value to its indexed representation.
    fn to_index_value(
        &self,
        value: &Value,
        processor: &dyn TransformationProcessor,
    ) -> RepositoryResult<SqlParam>;

    /// Builds the filter comparing `column` against the specification.
    fn build_filter(
        &self,
        column: Operand,
        specification: &Specification,
        processor: &dyn TransformationProcessor,
    ) -> RepositoryResult<SqlExpr> {
        let mut values = Vec::with_capacity(specification.values().len());
        for value in specification.values() {
            values.push(self.to_index_value(value, processor)?);
        }
        operator_filter("Field", column, specification.operator(), values)
    }
}
