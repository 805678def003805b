//! Shared test infrastructure for the legacy search integration tests.
//!
//! Every test gets its own in-memory database seeded with a small content
//! tree (see [`fixtures`]), plus helpers to run criteria against it.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

use ibexa_legacy_search::backends::sqlite::{
    ContentSearchGateway, ContentTypeGateway, LocationSearchGateway, SqliteDatabase,
};
use ibexa_legacy_search::types::{ContentTypeCriterion, Criterion, LanguageSettings};

/// Creates a seeded in-memory database.
pub fn seeded_database() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory().expect("Failed to create SQLite database");
    seed(&db);
    db
}

/// Content gateway over a freshly seeded database.
pub fn content_gateway() -> ContentSearchGateway {
    let db = seeded_database();
    let context = db.search_context();
    ContentSearchGateway::new(db, context)
}

/// Location gateway over a freshly seeded database.
pub fn location_gateway() -> LocationSearchGateway {
    let db = seeded_database();
    let context = db.search_context();
    LocationSearchGateway::new(db, context)
}

/// Trash gateway over a freshly seeded database.
pub fn trash_gateway() -> LocationSearchGateway {
    let db = seeded_database();
    let context = db.search_context();
    LocationSearchGateway::trash(db, context)
}

/// Content type gateway over a freshly seeded database.
pub fn content_type_gateway() -> ContentTypeGateway {
    ContentTypeGateway::new(seeded_database())
}

/// Ids of the matching content items, main language only.
pub fn content_ids(gateway: &ContentSearchGateway, criterion: &Criterion) -> Vec<i64> {
    content_ids_in(gateway, criterion, &LanguageSettings::default())
}

/// Ids of the matching content items with the given language settings.
pub fn content_ids_in(
    gateway: &ContentSearchGateway,
    criterion: &Criterion,
    settings: &LanguageSettings,
) -> Vec<i64> {
    gateway
        .find(criterion, settings, 0, None)
        .unwrap_or_else(|e| panic!("content search failed for {:?}: {}", criterion, e))
        .ids
}

/// Node ids of the matching locations, main language only.
pub fn node_ids(gateway: &LocationSearchGateway, criterion: &Criterion) -> Vec<i64> {
    gateway
        .find(criterion, &LanguageSettings::default(), 0, None)
        .unwrap_or_else(|e| panic!("location search failed for {:?}: {}", criterion, e))
        .ids
}

/// Ids of the matching content types.
pub fn content_type_ids(gateway: &ContentTypeGateway, criterion: &ContentTypeCriterion) -> Vec<i64> {
    gateway
        .find(criterion)
        .unwrap_or_else(|e| panic!("content type search failed for {:?}: {}", criterion, e))
        .ids
}
