use crate::error::RepositoryResult;
use crate::search::SearchContext;
use crate::sql::{Operand, SqlExpr, SqlParam};
use crate::types::{LanguageCodeCriterion, Operator};

use super::ensure_operator;

/// Matches content translated into any of the given languages.
pub struct LanguageCodeHandler;

impl LanguageCodeHandler {
    /// `(c.language_mask & mask) > 0`
    ///
    /// With `match_always_available` the mask includes bit 0, so
    /// always-available content matches whatever the languages are.
    pub fn handle(context: &SearchContext, criterion: &LanguageCodeCriterion) -> RepositoryResult<SqlExpr> {
        ensure_operator("LanguageCode", &criterion.codes, &[Operator::In, Operator::Eq])?;
        let mask = context.masks.generate_language_mask(
            criterion.codes.string_values(),
            criterion.match_always_available,
        )?;

        Ok(SqlExpr::gt(
            Operand::column("c", "language_mask").bit_and(Operand::param(SqlParam::Integer(mask))),
            Operand::Int(0),
        ))
    }
}
