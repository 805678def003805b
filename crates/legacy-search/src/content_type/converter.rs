use tracing::debug;

use crate::error::RepositoryResult;
use crate::sql::SqlExpr;
use crate::types::ContentTypeCriterion;

use super::handlers::ContentTypeCriterionHandler;

/// Translates content type criteria into SQL expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeCriteriaConverter;

impl ContentTypeCriteriaConverter {
    /// Creates the converter.
    pub fn new() -> Self {
        Self
    }

    /// Converts a criterion tree.
    pub fn convert(&self, criterion: &ContentTypeCriterion) -> RepositoryResult<SqlExpr> {
        debug!(criterion = criterion.name(), "Converting content type criterion");
        self.dispatch(criterion)
    }

    fn dispatch(&self, criterion: &ContentTypeCriterion) -> RepositoryResult<SqlExpr> {
        match criterion {
            ContentTypeCriterion::LogicalAnd(children) => Ok(SqlExpr::and(self.dispatch_all(children)?)),
            ContentTypeCriterion::LogicalOr(children) => Ok(SqlExpr::or(self.dispatch_all(children)?)),
            ContentTypeCriterion::LogicalNot(child) => Ok(SqlExpr::not(self.dispatch(child)?)),
            ContentTypeCriterion::ContentTypeId(spec) => ContentTypeCriterionHandler::content_type_id(spec),
            ContentTypeCriterion::ContentTypeIdentifier(spec) => {
                ContentTypeCriterionHandler::content_type_identifier(spec)
            }
            ContentTypeCriterion::ContainsFieldDefinitionId(spec) => {
                ContentTypeCriterionHandler::contains_field_definition_id(spec)
            }
            ContentTypeCriterion::ContentTypeGroupId(spec) => {
                ContentTypeCriterionHandler::content_type_group_id(spec)
            }
            ContentTypeCriterion::ContentTypeGroupName(spec) => {
                ContentTypeCriterionHandler::content_type_group_name(spec)
            }
            ContentTypeCriterion::IsSystem(system) => Ok(ContentTypeCriterionHandler::is_system(*system)),
        }
    }

    fn dispatch_all(&self, children: &[ContentTypeCriterion]) -> RepositoryResult<Vec<SqlExpr>> {
        children.iter().map(|child| self.dispatch(child)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Specification;

    #[test]
    fn test_composite_rendering() {
        let criterion = ContentTypeCriterion::LogicalAnd(vec![
            ContentTypeCriterion::ContentTypeIdentifier(Specification::eq("folder")),
            ContentTypeCriterion::LogicalNot(Box::new(ContentTypeCriterion::IsSystem(true))),
        ]);
        let frag = ContentTypeCriteriaConverter::new()
            .convert(&criterion)
            .unwrap()
            .to_fragment();

        assert_eq!(
            frag.sql,
            "(c.identifier = ?1) AND (NOT (c.id IN (SELECT g.contentclass_id FROM ezcontentclass_classgroup g \
             INNER JOIN ezcontentclassgroup cg ON g.group_id = cg.id WHERE cg.is_system = ?2)))"
        );
    }

    #[test]
    fn test_empty_composites() {
        let converter = ContentTypeCriteriaConverter::new();
        assert!(
            converter
                .convert(&ContentTypeCriterion::LogicalAnd(vec![]))
                .unwrap()
                .is_unconstrained()
        );
        assert_eq!(
            converter.convert(&ContentTypeCriterion::LogicalOr(vec![])).unwrap(),
            SqlExpr::or(vec![])
        );
    }
}
