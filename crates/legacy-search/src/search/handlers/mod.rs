//! Criterion handlers.
//!
//! Handlers are stateless; each returns the expression for one criterion
//! and never touches the surrounding query.

mod content;
mod content_name;
mod content_type_identifier;
mod date_metadata;
mod field;
mod field_base;
mod is_field_empty;
mod language_code;
mod location;
mod logical;
mod user_metadata;

pub use content::ContentHandler;
pub use content_name::ContentNameHandler;
pub use content_type_identifier::ContentTypeIdentifierHandler;
pub use date_metadata::DateMetadataHandler;
pub use field::FieldHandler;
pub use field_base::{FIELD_ALIAS, language_condition};
pub use is_field_empty::IsFieldEmptyHandler;
pub use language_code::LanguageCodeHandler;
pub use location::LocationHandler;
pub use logical::LogicalHandler;
pub use user_metadata::UserMetadataHandler;

use crate::error::{RepositoryResult, RuntimeError};
use crate::sql::{Operand, SqlExpr, SqlParam, operator_filter};
use crate::types::{Operator, Specification};

/// Fails with `Runtime(UnsupportedOperator)` unless the operator is allowed.
pub(crate) fn ensure_operator(
    criterion: &'static str,
    specification: &Specification,
    allowed: &[Operator],
) -> RepositoryResult<()> {
    if allowed.contains(&specification.operator()) {
        Ok(())
    } else {
        Err(RuntimeError::UnsupportedOperator {
            criterion,
            operator: specification.operator().to_string(),
        }
        .into())
    }
}

/// `operand IN (...)` or `operand = ?` over integer ids.
pub(crate) fn id_filter(
    criterion: &'static str,
    operand: impl Into<Operand>,
    specification: &Specification,
) -> RepositoryResult<SqlExpr> {
    ensure_operator(criterion, specification, &[Operator::In, Operator::Eq])?;
    let ids = int_params(criterion, specification)?;
    operator_filter(criterion, operand.into(), specification.operator(), ids)
}

/// `operand IN (...)` or `operand = ?` over string values.
pub(crate) fn string_filter(
    criterion: &'static str,
    operand: impl Into<Operand>,
    specification: &Specification,
) -> RepositoryResult<SqlExpr> {
    ensure_operator(criterion, specification, &[Operator::In, Operator::Eq])?;
    let values = specification
        .string_values()
        .into_iter()
        .map(SqlParam::String)
        .collect();
    operator_filter(criterion, operand.into(), specification.operator(), values)
}

/// The specification's values as integer parameters.
pub(crate) fn int_params(
    criterion: &'static str,
    specification: &Specification,
) -> RepositoryResult<Vec<SqlParam>> {
    Ok(specification
        .int_values(criterion)?
        .into_iter()
        .map(SqlParam::Integer)
        .collect())
}
