//! Error types for the legacy search engine.
//!
//! Errors are grouped by kind rather than by the component that raised them:
//! a caller can tell "this reference does not exist" apart from "this engine
//! cannot search that" apart from "the criterion itself is malformed"
//! without inspecting messages.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all translation and gateway operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A referenced entity (language, content type, converter) does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The engine is not able to translate the request.
    #[error(transparent)]
    NotImplemented(#[from] NotImplementedError),

    /// The criterion or one of its values is invalid.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Internal consistency errors.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Database backend errors.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised when a referenced entity cannot be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("language not found: {code}")]
    Language { code: String },

    #[error("language not found: id {id}")]
    LanguageId { id: i64 },

    #[error("content type not found: {identifier}")]
    ContentType { identifier: String },

    #[error("no field value converter registered for field type '{field_type}'")]
    FieldValueConverter { field_type: String },

    #[error("field type not found: {field_type}")]
    FieldType { field_type: String },
}

/// Errors raised when the engine cannot express a request in SQL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotImplementedError {
    /// No handler exists for the criterion in the converter's scope.
    #[error("criterion '{criterion}' is not supported in {scope} search")]
    UnsupportedCriterion {
        criterion: &'static str,
        scope: &'static str,
    },

    /// Every field type matched by a field criterion is unsearchable.
    #[error(
        "following field types are not searchable in the legacy search engine: {}",
        field_types.join(", ")
    )]
    UnsearchableFieldTypes {
        target: String,
        field_types: Vec<String>,
    },
}

/// Errors raised for invalid criteria or criterion values.
#[derive(Error, Debug)]
pub enum InvalidArgumentError {
    /// The number of values does not match the operator.
    #[error("operator {operator} expects {expected} value(s), got {actual}")]
    Arity {
        operator: String,
        expected: &'static str,
        actual: usize,
    },

    /// The criterion does not accept the given operator.
    #[error("criterion '{criterion}' does not support operator {operator}")]
    UnsupportedOperator {
        criterion: &'static str,
        operator: String,
    },

    /// No searchable field definition carries the requested identifier.
    #[error("no searchable fields found for the provided criterion target '{target}'")]
    NoSearchableFields { target: String },

    /// A value has the wrong shape for its argument.
    #[error("invalid value for '{argument}': {message}")]
    InvalidValue { argument: String, message: String },

    /// A structured value failed to parse.
    #[error("malformed value for '{argument}': {source}")]
    MalformedValue {
        argument: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors indicating an internal exhaustiveness or consistency bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A handler received an operator it has no translation for.
    #[error("unknown operator {operator} for {criterion} criterion handler")]
    UnsupportedOperator {
        criterion: &'static str,
        operator: String,
    },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema initialisation error.
    #[error("schema initialisation failed: {message}")]
    SchemaError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Returns true if this error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}
