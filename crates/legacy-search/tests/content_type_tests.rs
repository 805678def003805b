//! Content type search against the fixture content types.

#![cfg(feature = "sqlite")]

mod common;

use common::*;

use ibexa_legacy_search::error::RepositoryError;
use ibexa_legacy_search::types::{ContentTypeCriterion, Specification};

#[test]
fn test_identifier_lookup() {
    let gateway = content_type_gateway();
    let criterion = ContentTypeCriterion::ContentTypeIdentifier(
        Specification::in_values(["article", "folder", "draft_type"]).unwrap(),
    );
    // `draft_type` only exists as a draft.
    assert_eq!(content_type_ids(&gateway, &criterion), vec![1, 2]);
}

#[test]
fn test_groups() {
    let gateway = content_type_gateway();

    let by_id = ContentTypeCriterion::ContentTypeGroupId(Specification::eq(1));
    assert_eq!(content_type_ids(&gateway, &by_id), vec![1, 2, 5]);

    let by_name = ContentTypeCriterion::ContentTypeGroupName(Specification::eq("Users"));
    assert_eq!(content_type_ids(&gateway, &by_name), vec![3, 4]);
}

#[test]
fn test_system_groups() {
    let gateway = content_type_gateway();
    assert_eq!(
        content_type_ids(&gateway, &ContentTypeCriterion::IsSystem(true)),
        vec![6]
    );
    assert_eq!(
        content_type_ids(&gateway, &ContentTypeCriterion::IsSystem(false)),
        vec![1, 2, 3, 4, 5]
    );
}

#[test]
fn test_contains_field_definition() {
    let gateway = content_type_gateway();
    let criterion =
        ContentTypeCriterion::ContainsFieldDefinitionId(Specification::in_values([10, 31]).unwrap());
    assert_eq!(content_type_ids(&gateway, &criterion), vec![2, 4]);
}

#[test]
fn test_composition() {
    let gateway = content_type_gateway();
    let criterion = ContentTypeCriterion::LogicalAnd(vec![
        ContentTypeCriterion::LogicalNot(Box::new(ContentTypeCriterion::ContentTypeGroupId(
            Specification::eq(1),
        ))),
        ContentTypeCriterion::LogicalOr(vec![
            ContentTypeCriterion::ContentTypeId(Specification::eq(4)),
            ContentTypeCriterion::IsSystem(true),
        ]),
    ]);
    assert_eq!(content_type_ids(&gateway, &criterion), vec![4, 6]);

    assert_eq!(
        content_type_ids(&gateway, &ContentTypeCriterion::LogicalAnd(vec![])),
        vec![1, 2, 3, 4, 5, 6]
    );
    assert!(content_type_ids(&gateway, &ContentTypeCriterion::LogicalOr(vec![])).is_empty());
}

#[test]
fn test_query_is_restricted_to_defined_versions() {
    let gateway = content_type_gateway();
    let frag = gateway
        .build(&ContentTypeCriterion::ContentTypeId(Specification::eq(7)))
        .unwrap();
    assert_eq!(
        frag.sql,
        "SELECT c.id FROM ezcontentclass c WHERE (c.version = 0) AND (c.id = ?1) ORDER BY c.id ASC"
    );
    assert!(gateway.find(&ContentTypeCriterion::ContentTypeId(Specification::eq(7))).unwrap().ids.is_empty());
}

#[test]
fn test_invalid_operator_is_rejected() {
    let gateway = content_type_gateway();
    let err = gateway
        .build(&ContentTypeCriterion::ContentTypeId(Specification::like("1*")))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidArgument(_)));
}
