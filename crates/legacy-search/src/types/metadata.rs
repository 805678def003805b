//! Content type metadata consumed by criterion handlers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Minimal reference to a content type definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentTypeRef {
    /// Content type id.
    pub id: i64,
    /// Content type identifier, e.g. `article`.
    pub identifier: String,
}

/// A searchable field definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchableField {
    /// Field definition id.
    pub field_definition_id: i64,
    /// Field type identifier, e.g. `ezstring`.
    pub field_type_identifier: String,
}

/// Content type identifier → field identifier → searchable field.
///
/// Ordered maps keep handler output deterministic.
pub type SearchableFieldMap = BTreeMap<String, BTreeMap<String, SearchableField>>;
