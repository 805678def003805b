//! Core types for criteria and the metadata they are resolved against.
//!
//! - [`criterion`] - Content and location search criteria
//! - [`content_type_criterion`] - Content type query criteria
//! - [`language`] - Languages and language settings
//! - [`metadata`] - Content type and searchable field metadata

pub mod content_type_criterion;
pub mod criterion;
pub mod language;
pub mod metadata;

pub use content_type_criterion::ContentTypeCriterion;
pub use criterion::{
    Criterion, DateMetadataCriterion, DateMetadataTarget, FieldCriterion, IsFieldEmptyCriterion,
    LanguageCodeCriterion, Operator, Specification, UserMetadataCriterion, UserMetadataTarget,
    Value, VisibilityState, parse_path_string,
};
pub use language::{Language, LanguageSettings};
pub use metadata::{ContentTypeRef, SearchableField, SearchableFieldMap};
