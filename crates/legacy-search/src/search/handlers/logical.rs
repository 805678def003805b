use crate::error::RepositoryResult;
use crate::search::CriteriaConverter;
use crate::sql::SqlExpr;
use crate::types::{Criterion, LanguageSettings};

/// `LogicalAnd`, `LogicalOr` and `LogicalNot`.
///
/// Children keep their order; nothing is flattened or simplified.
pub struct LogicalHandler;

impl LogicalHandler {
    /// Conjunction. No children yields the unconstrained expression.
    pub fn and(
        converter: &CriteriaConverter,
        children: &[Criterion],
        settings: &LanguageSettings,
    ) -> RepositoryResult<SqlExpr> {
        Ok(SqlExpr::and(Self::convert_all(converter, children, settings)?))
    }

    /// Disjunction. No children matches nothing.
    pub fn or(
        converter: &CriteriaConverter,
        children: &[Criterion],
        settings: &LanguageSettings,
    ) -> RepositoryResult<SqlExpr> {
        Ok(SqlExpr::or(Self::convert_all(converter, children, settings)?))
    }

    /// Negation.
    pub fn not(
        converter: &CriteriaConverter,
        child: &Criterion,
        settings: &LanguageSettings,
    ) -> RepositoryResult<SqlExpr> {
        Ok(SqlExpr::not(converter.dispatch(child, settings)?))
    }

    fn convert_all(
        converter: &CriteriaConverter,
        children: &[Criterion],
        settings: &LanguageSettings,
    ) -> RepositoryResult<Vec<SqlExpr>> {
        children
            .iter()
            .map(|child| converter.dispatch(child, settings))
            .collect()
    }
}
