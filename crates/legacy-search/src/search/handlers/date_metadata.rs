use crate::error::RepositoryResult;
use crate::search::SearchScope;
use crate::sql::{Column, Operand, Select, SqlExpr, operator_filter};
use crate::types::{DateMetadataCriterion, DateMetadataTarget, Operator};

use super::{ensure_operator, int_params};

const CRITERION: &str = "DateMetadata";

const OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Gt,
    Operator::Gte,
    Operator::Lt,
    Operator::Lte,
    Operator::In,
    Operator::Between,
];

/// Compares creation, modification or trash timestamps.
pub struct DateMetadataHandler;

impl DateMetadataHandler {
    /// Builds the timestamp comparison for `scope`.
    ///
    /// Trash timestamps live on `ezcontentobject_trash`; outside trash scope
    /// they are matched through a sub-select on that table.
    pub fn handle(scope: SearchScope, criterion: &DateMetadataCriterion) -> RepositoryResult<SqlExpr> {
        let spec = &criterion.specification;
        ensure_operator(CRITERION, spec, OPERATORS)?;
        let timestamps = int_params(CRITERION, spec)?;

        match criterion.target {
            DateMetadataTarget::Created | DateMetadataTarget::PublicationDate => operator_filter(
                CRITERION,
                Operand::column("c", "published"),
                spec.operator(),
                timestamps,
            ),
            DateMetadataTarget::Modified => operator_filter(
                CRITERION,
                Operand::column("c", "modified"),
                spec.operator(),
                timestamps,
            ),
            DateMetadataTarget::Trashed if scope == SearchScope::Trash => operator_filter(
                CRITERION,
                Operand::column("t", "trashed"),
                spec.operator(),
                timestamps,
            ),
            DateMetadataTarget::Trashed => {
                let trashed = Select::from_table("ezcontentobject_trash", "")
                    .column(Column::bare("contentobject_id"))
                    .and_where(operator_filter(
                        CRITERION,
                        Operand::Column(Column::bare("trashed")),
                        spec.operator(),
                        timestamps,
                    )?);
                Ok(SqlExpr::in_select(Column::new("c", "id"), trashed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::sql::SqlParam;
    use crate::types::Specification;

    fn criterion(target: DateMetadataTarget, spec: Specification) -> DateMetadataCriterion {
        DateMetadataCriterion {
            target,
            specification: spec,
        }
    }

    #[test]
    fn test_created_between() {
        let c = criterion(DateMetadataTarget::Created, Specification::between(1000, 2000));
        let frag = DateMetadataHandler::handle(SearchScope::Content, &c)
            .unwrap()
            .to_fragment();
        assert_eq!(frag.sql, "c.published BETWEEN ?1 AND ?2");
        assert_eq!(frag.params, vec![SqlParam::integer(1000), SqlParam::integer(2000)]);
    }

    #[test]
    fn test_modified_gt() {
        let c = criterion(
            DateMetadataTarget::Modified,
            Specification::compare(Operator::Gt, 1500).unwrap(),
        );
        let frag = DateMetadataHandler::handle(SearchScope::Location, &c)
            .unwrap()
            .to_fragment();
        assert_eq!(frag.sql, "c.modified > ?1");
    }

    #[test]
    fn test_trashed_depends_on_scope() {
        let c = criterion(
            DateMetadataTarget::Trashed,
            Specification::compare(Operator::Lt, 1500).unwrap(),
        );
        let in_trash = DateMetadataHandler::handle(SearchScope::Trash, &c)
            .unwrap()
            .to_fragment();
        assert_eq!(in_trash.sql, "t.trashed < ?1");

        let in_content = DateMetadataHandler::handle(SearchScope::Content, &c)
            .unwrap()
            .to_fragment();
        assert_eq!(
            in_content.sql,
            "c.id IN (SELECT contentobject_id FROM ezcontentobject_trash WHERE trashed < ?1)"
        );
    }

    #[test]
    fn test_like_is_rejected() {
        let c = criterion(DateMetadataTarget::Created, Specification::like("100*"));
        let err = DateMetadataHandler::handle(SearchScope::Content, &c).unwrap_err();
        assert!(matches!(err, RepositoryError::Runtime(_)));
    }
}
