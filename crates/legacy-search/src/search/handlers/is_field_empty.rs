use crate::error::RepositoryResult;
use crate::search::SearchContext;
use crate::sql::{Operand, SqlExpr};
use crate::types::{IsFieldEmptyCriterion, LanguageSettings};

use super::field_base::field_exists;

/// Matches fields holding (or not holding) their type's empty value.
pub struct IsFieldEmptyHandler;

impl IsFieldEmptyHandler {
    /// `EXISTS` over field rows compared to the empty value.
    pub fn handle(
        context: &SearchContext,
        criterion: &IsFieldEmptyCriterion,
        settings: &LanguageSettings,
    ) -> RepositoryResult<SqlExpr> {
        field_exists(context, &criterion.target, settings, |field_type, _, column| {
            let empty = Operand::param(context.field_types.empty_value(field_type)?);
            Ok(if criterion.empty {
                SqlExpr::eq(column, empty)
            } else {
                SqlExpr::neq(column, empty)
            })
        })
    }
}
