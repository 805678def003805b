use crate::error::RepositoryResult;
use crate::sql::{Column, Select, SqlExpr};
use crate::types::Specification;

use super::{id_filter, string_filter};

/// Criteria on `ezcontentobject` columns and the tables keyed by content.
pub struct ContentHandler;

impl ContentHandler {
    /// `c.id`
    pub fn content_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        id_filter("ContentId", Column::new("c", "id"), spec)
    }

    /// `c.remote_id`
    pub fn remote_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        string_filter("RemoteId", Column::new("c", "remote_id"), spec)
    }

    /// `c.contentclass_id`
    pub fn content_type_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        id_filter("ContentTypeId", Column::new("c", "contentclass_id"), spec)
    }

    /// Content types belonging to the given groups.
    pub fn content_type_group_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        let groups = Select::from_table("ezcontentclass_classgroup", "")
            .column(Column::bare("contentclass_id"))
            .and_where(id_filter("ContentTypeGroupId", Column::bare("group_id"), spec)?);
        Ok(SqlExpr::in_select(Column::new("c", "contentclass_id"), groups))
    }

    /// `c.section_id`
    pub fn section_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        id_filter("SectionId", Column::new("c", "section_id"), spec)
    }

    /// Sections looked up by identifier.
    pub fn section_identifier(spec: &Specification) -> RepositoryResult<SqlExpr> {
        let sections = Select::from_table("ezsection", "")
            .column(Column::bare("id"))
            .and_where(string_filter("SectionIdentifier", Column::bare("identifier"), spec)?);
        Ok(SqlExpr::in_select(Column::new("c", "section_id"), sections))
    }

    /// Content in any of the given object states.
    pub fn object_state_id(spec: &Specification) -> RepositoryResult<SqlExpr> {
        let states = Select::from_table("ezcobj_state_link", "")
            .column(Column::bare("contentobject_id"))
            .and_where(id_filter(
                "ObjectStateId",
                Column::bare("contentobject_state_id"),
                spec,
            )?);
        Ok(SqlExpr::in_select(Column::new("c", "id"), states))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::sql::SqlParam;

    #[test]
    fn test_content_id_in() {
        let spec = Specification::in_values([12]).unwrap();
        let frag = ContentHandler::content_id(&spec).unwrap().to_fragment();
        assert_eq!(frag.sql, "c.id IN (?1)");
        assert_eq!(frag.params, vec![SqlParam::integer(12)]);
    }

    #[test]
    fn test_remote_id_eq() {
        let frag = ContentHandler::remote_id(&Specification::eq("abc123"))
            .unwrap()
            .to_fragment();
        assert_eq!(frag.sql, "c.remote_id = ?1");
        assert_eq!(frag.params, vec![SqlParam::string("abc123")]);
    }

    #[test]
    fn test_section_identifier_subselect() {
        let spec = Specification::in_values(["standard", "media"]).unwrap();
        let frag = ContentHandler::section_identifier(&spec).unwrap().to_fragment();
        assert_eq!(
            frag.sql,
            "c.section_id IN (SELECT id FROM ezsection WHERE identifier IN (?1, ?2))"
        );
    }

    #[test]
    fn test_object_state_subselect() {
        let frag = ContentHandler::object_state_id(&Specification::eq(1))
            .unwrap()
            .to_fragment();
        assert_eq!(
            frag.sql,
            "c.id IN (SELECT contentobject_id FROM ezcobj_state_link WHERE contentobject_state_id = ?1)"
        );
    }

    #[test]
    fn test_unsupported_operator_is_runtime_error() {
        let err = ContentHandler::content_id(&Specification::between(1, 5)).unwrap_err();
        assert!(matches!(err, RepositoryError::Runtime(_)));
    }
}
