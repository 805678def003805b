use crate::error::RepositoryResult;
use crate::search::SearchContext;
use crate::sql::{Column, Operand, Select, SqlExpr, SqlParam, operator_filter};
use crate::types::{Operator, Specification};

use super::ensure_operator;

const CRITERION: &str = "ContentName";

/// Case-insensitive match on the translated names of the current version.
pub struct ContentNameHandler;

impl ContentNameHandler {
    /// `EXISTS` over `ezcontentobject_name` rows of the current version.
    pub fn handle(context: &SearchContext, spec: &Specification) -> RepositoryResult<SqlExpr> {
        ensure_operator(CRITERION, spec, &[Operator::Eq, Operator::Like])?;
        let names = spec
            .string_values()
            .iter()
            .map(|name| SqlParam::String(context.transformation.lowercase(name)))
            .collect();

        let select = Select::from_table("ezcontentobject_name", "n")
            .select_one()
            .and_where(SqlExpr::eq(
                Column::new("n", "contentobject_id"),
                Column::new("c", "id"),
            ))
            .and_where(SqlExpr::eq(
                Column::new("n", "content_version"),
                Column::new("c", "current_version"),
            ))
            .and_where(operator_filter(
                CRITERION,
                Operand::column("n", "name").lower(),
                spec.operator(),
                names,
            )?);

        Ok(SqlExpr::exists(select))
    }
}
