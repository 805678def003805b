use crate::error::RepositoryResult;
use crate::search::handlers::{id_filter, string_filter};
use crate::sql::{Column, Operand, Select, SqlExpr, SqlParam};
use crate::types::Specification;

/// Leaf content type criteria.
pub struct ContentTypeCriterionHandler;

impl ContentTypeCriterionHandler {
    /// `c.id`
    pub fn content_type_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        id_filter("ContentTypeId", Column::new("c", "id"), spec)
    }

    /// `c.identifier`
    pub fn content_type_identifier(spec: &Specification) -> RepositoryResult<SqlExpr> {
        string_filter("ContentTypeIdentifier", Column::new("c", "identifier"), spec)
    }

    /// Content types defining any of the given field definitions.
    pub fn contains_field_definition_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        let definitions = Select::from_table("ezcontentclass_attribute", "")
            .column(Column::bare("contentclass_id"))
            .and_where(id_filter("ContainsFieldDefinitionId", Column::bare("id"), spec)?);
        Ok(SqlExpr::in_select(Column::new("c", "id"), definitions))
    }

    /// Content types in any of the given groups.
    pub fn content_type_group_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        let groups = Select::from_table("ezcontentclass_classgroup", "")
            .column(Column::bare("contentclass_id"))
            .and_where(id_filter("ContentTypeGroupId", Column::bare("group_id"), spec)?);
        Ok(SqlExpr::in_select(Column::new("c", "id"), groups))
    }

    /// Content types in any of the named groups.
    pub fn content_type_group_name(spec: &Specification) -> RepositoryResult<SqlExpr> {
        let groups = Select::from_table("ezcontentclass_classgroup", "")
            .column(Column::bare("contentclass_id"))
            .and_where(string_filter("ContentTypeGroupName", Column::bare("group_name"), spec)?);
        Ok(SqlExpr::in_select(Column::new("c", "id"), groups))
    }

    /// Content types in (or outside of) system groups.
    pub fn is_system(system: bool) -> SqlExpr {
        let groups = Select::from_table("ezcontentclass_classgroup", "g")
            .column(Column::new("g", "contentclass_id"))
            .inner_join(
                "ezcontentclassgroup",
                "cg",
                SqlExpr::eq(Column::new("g", "group_id"), Column::new("cg", "id")),
            )
            .and_where(SqlExpr::eq(
                Column::new("cg", "is_system"),
                Operand::param(SqlParam::Integer(i64::from(system))),
            ));
        SqlExpr::in_select(Column::new("c", "id"), groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_field_definition_id() {
        let spec = Specification::in_values([101, 102]).unwrap();
        let frag = ContentTypeCriterionHandler::contains_field_definition_id(&spec)
            .unwrap()
            .to_fragment();
        assert_eq!(
            frag.sql,
            "c.id IN (SELECT contentclass_id FROM ezcontentclass_attribute WHERE id IN (?1, ?2))"
        );
    }

    #[test]
    fn test_group_name() {
        let frag = ContentTypeCriterionHandler::content_type_group_name(&Specification::eq("Content"))
            .unwrap()
            .to_fragment();
        assert_eq!(
            frag.sql,
            "c.id IN (SELECT contentclass_id FROM ezcontentclass_classgroup WHERE group_name = ?1)"
        );
        assert_eq!(frag.params, vec![SqlParam::string("Content")]);
    }
}
