//! Logical composition laws, checked against the fixture database.

#![cfg(feature = "sqlite")]

mod common;

use common::*;

use ibexa_legacy_search::types::{Criterion, LanguageSettings, Specification};

fn articles() -> Criterion {
    Criterion::content_type_identifier(["article"]).unwrap()
}

fn standard_section() -> Criterion {
    Criterion::section_id([1]).unwrap()
}

fn owned_by_admin() -> Criterion {
    Criterion::user_metadata(
        ibexa_legacy_search::types::UserMetadataTarget::Owner,
        Specification::eq(14),
    )
}

// ============================================================================
// Identities
// ============================================================================

#[test]
fn test_empty_and_is_unconstrained() {
    let gateway = content_gateway();
    let empty_and = Criterion::and(vec![]);

    assert_eq!(content_ids(&gateway, &empty_and), PUBLISHED_CONTENT);

    let frag = gateway
        .build(&empty_and, &LanguageSettings::default(), 0, None)
        .unwrap();
    assert!(frag.sql.ends_with("WHERE c.status = 1 ORDER BY c.id ASC"));
    assert!(frag.params.is_empty());
}

#[test]
fn test_empty_or_matches_nothing() {
    let gateway = content_gateway();
    assert!(content_ids(&gateway, &Criterion::or(vec![])).is_empty());
}

#[test]
fn test_single_child_renders_as_the_child() {
    let gateway = content_gateway();
    let settings = LanguageSettings::default();

    let bare = gateway.build(&articles(), &settings, 0, None).unwrap();
    let wrapped_and = gateway
        .build(&Criterion::and(vec![articles()]), &settings, 0, None)
        .unwrap();
    let wrapped_or = gateway
        .build(&Criterion::or(vec![articles()]), &settings, 0, None)
        .unwrap();

    assert_eq!(bare, wrapped_and);
    assert_eq!(bare, wrapped_or);
}

#[test]
fn test_match_all_and_match_none() {
    let gateway = content_gateway();
    assert_eq!(
        content_ids(&gateway, &Criterion::and(vec![Criterion::MatchAll, articles()])),
        vec![20, 21]
    );
    assert!(content_ids(&gateway, &Criterion::and(vec![Criterion::MatchNone, articles()])).is_empty());
    assert_eq!(
        content_ids(&gateway, &Criterion::or(vec![Criterion::MatchNone, articles()])),
        vec![20, 21]
    );
    assert_eq!(
        content_ids(&gateway, &Criterion::or(vec![Criterion::MatchAll, articles()])),
        PUBLISHED_CONTENT
    );
}

// ============================================================================
// Negation
// ============================================================================

#[test]
fn test_not_complements_within_published_content() {
    let gateway = content_gateway();
    let not_articles = content_ids(&gateway, &Criterion::not(articles()));
    assert_eq!(not_articles, vec![1, 10, 11, 14, 15, 22]);
}

#[test]
fn test_double_negation() {
    let gateway = content_gateway();
    assert_eq!(
        content_ids(&gateway, &Criterion::not(Criterion::not(articles()))),
        content_ids(&gateway, &articles())
    );
}

#[test]
fn test_not_renders_wrapped() {
    let gateway = content_gateway();
    let frag = gateway
        .build(
            &Criterion::not(standard_section()),
            &LanguageSettings::default(),
            0,
            None,
        )
        .unwrap();
    assert!(frag.sql.contains("NOT (c.section_id IN (?1))"));
}

#[test]
fn test_de_morgan() {
    let gateway = content_gateway();

    let not_and = Criterion::not(Criterion::and(vec![standard_section(), owned_by_admin()]));
    let or_not = Criterion::or(vec![
        Criterion::not(standard_section()),
        Criterion::not(owned_by_admin()),
    ]);
    assert_eq!(content_ids(&gateway, &not_and), content_ids(&gateway, &or_not));

    let not_or = Criterion::not(Criterion::or(vec![standard_section(), owned_by_admin()]));
    let and_not = Criterion::and(vec![
        Criterion::not(standard_section()),
        Criterion::not(owned_by_admin()),
    ]);
    assert_eq!(content_ids(&gateway, &not_or), content_ids(&gateway, &and_not));
    assert_eq!(content_ids(&gateway, &not_or), vec![15]);
}

#[test]
fn test_complement_laws() {
    let gateway = content_gateway();
    let not_c = Criterion::not(articles());
    let not_not_c = Criterion::not(Criterion::not(articles()));

    assert_eq!(
        content_ids(&gateway, &Criterion::or(vec![not_c.clone(), not_not_c.clone()])),
        PUBLISHED_CONTENT
    );
    assert!(content_ids(&gateway, &Criterion::and(vec![not_c, not_not_c])).is_empty());
}

#[test]
fn test_nested_composition_numbers_placeholders_in_order() {
    let gateway = content_gateway();
    let criterion = Criterion::or(vec![
        Criterion::and(vec![standard_section(), owned_by_admin()]),
        Criterion::not(Criterion::content_id([22]).unwrap()),
    ]);

    let frag = gateway
        .build(&criterion, &LanguageSettings::default(), 0, None)
        .unwrap();
    assert!(frag.sql.contains(
        "((c.section_id IN (?1)) AND (c.owner_id = ?2)) OR (NOT (c.id IN (?3)))"
    ));
    assert_eq!(frag.params.len(), 3);
}
