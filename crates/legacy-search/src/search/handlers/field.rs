use crate::error::RepositoryResult;
use crate::search::SearchContext;
use crate::sql::SqlExpr;
use crate::types::{FieldCriterion, LanguageSettings};

use super::field_base::field_exists;

/// Compares field values across every content type defining the field.
pub struct FieldHandler;

impl FieldHandler {
    /// `EXISTS` over the matching field rows of the current version.
    pub fn handle(
        context: &SearchContext,
        criterion: &FieldCriterion,
        settings: &LanguageSettings,
    ) -> RepositoryResult<SqlExpr> {
        let transformation = context.transformation.as_ref();
        field_exists(context, &criterion.target, settings, |_, converter, column| {
            converter.build_filter(column, &criterion.specification, transformation)
        })
    }
}
