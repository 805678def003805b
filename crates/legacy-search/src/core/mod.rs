//! Collaborator interfaces consumed by the criterion handlers.
//!
//! The translation engine does not own languages, content types or field
//! types. It reads their metadata through these traits:
//!
//! - [`LanguageHandler`] - language lookup by code or id
//! - [`ContentTypeHandler`] - content type lookup and the searchable field map
//! - [`FieldTypeService`] - per field type empty values
//! - [`TransformationProcessor`] - text normalization for case-insensitive matching
//!
//! Every trait is `Send + Sync` so a converter built once can be shared
//! across threads.

mod handlers;
mod transformation;

pub use handlers::{ContentTypeHandler, FieldTypeService, LanguageHandler};
pub use transformation::{LowercaseTransformation, TransformationProcessor};
