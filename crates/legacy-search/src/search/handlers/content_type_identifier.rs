use tracing::warn;

use crate::error::{RepositoryError, RepositoryResult};
use crate::search::SearchContext;
use crate::sql::{Column, SqlExpr, SqlParam, operator_filter};
use crate::types::{Operator, Specification};

use super::ensure_operator;

const CRITERION: &str = "ContentTypeIdentifier";

/// Resolves content type identifiers to ids.
///
/// Unknown identifiers are logged and skipped. When none resolves the
/// criterion matches nothing.
pub struct ContentTypeIdentifierHandler;

impl ContentTypeIdentifierHandler {
    /// `c.contentclass_id` over the resolved ids.
    pub fn handle(context: &SearchContext, spec: &Specification) -> RepositoryResult<SqlExpr> {
        ensure_operator(CRITERION, spec, &[Operator::In, Operator::Eq])?;

        let mut ids = Vec::with_capacity(spec.values().len());
        for identifier in spec.string_values() {
            match context.content_types.load_by_identifier(&identifier) {
                Ok(content_type) => ids.push(SqlParam::Integer(content_type.id)),
                Err(RepositoryError::NotFound(_)) => {
                    warn!(
                        identifier = %identifier,
                        "Invalid content type identifier provided for ContentTypeIdentifier criterion"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        if ids.is_empty() {
            return Ok(SqlExpr::match_none());
        }

        operator_filter(
            CRITERION,
            Column::new("c", "contentclass_id").into(),
            spec.operator(),
            ids,
        )
    }
}
