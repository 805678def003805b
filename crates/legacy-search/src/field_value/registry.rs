use std::collections::HashMap;
use std::sync::Arc;

use crate::core::FieldTypeService;
use crate::error::{NotFoundError, RepositoryError, RepositoryResult};
use crate::sql::SqlParam;

use super::{
    DateConverter, FieldValueConverter, FloatConverter, IntegerConverter, TextConverter,
    UnsearchableConverter,
};

const TEXT_TYPES: &[&str] = &[
    "ezstring",
    "eztext",
    "ezemail",
    "ezisbn",
    "ezcountry",
    "ezauthor",
    "ezselection",
    "ezrichtext",
    "ezkeyword",
];
const INTEGER_TYPES: &[&str] = &["ezinteger", "ezboolean", "ezobjectrelation"];
const DATE_TYPES: &[&str] = &["ezdate", "ezdatetime", "eztime"];
const UNSEARCHABLE_TYPES: &[&str] = &[
    "ezimage",
    "ezbinaryfile",
    "ezmedia",
    "ezobjectrelationlist",
    "ezuser",
    "ezurl",
    "ezgmaplocation",
    "ezpage",
];

/// Field type identifier → converter.
#[derive(Debug, Clone, Default)]
pub struct FieldValueConverterRegistry {
    converters: HashMap<String, Arc<dyn FieldValueConverter>>,
}

impl FieldValueConverterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the legacy field types registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for field_type in TEXT_TYPES {
            registry.register(*field_type, Arc::new(TextConverter));
        }
        for field_type in INTEGER_TYPES {
            registry.register(*field_type, Arc::new(IntegerConverter));
        }
        registry.register("ezfloat", Arc::new(FloatConverter));
        for field_type in DATE_TYPES {
            registry.register(*field_type, Arc::new(DateConverter));
        }
        for field_type in UNSEARCHABLE_TYPES {
            registry.register(*field_type, Arc::new(UnsearchableConverter::new(*field_type)));
        }
        registry
    }

    /// Registers (or replaces) the converter for `field_type`.
    pub fn register(&mut self, field_type: impl Into<String>, converter: Arc<dyn FieldValueConverter>) {
        self.converters.insert(field_type.into(), converter);
    }

    /// Looks up the converter for `field_type`.
    pub fn get(&self, field_type: &str) -> RepositoryResult<Arc<dyn FieldValueConverter>> {
        self.converters.get(field_type).cloned().ok_or_else(|| {
            NotFoundError::FieldValueConverter {
                field_type: field_type.to_string(),
            }
            .into()
        })
    }

    /// Returns true if a converter is registered for `field_type`.
    pub fn contains(&self, field_type: &str) -> bool {
        self.converters.contains_key(field_type)
    }
}

/// [`FieldTypeService`] answering from the converter registry.
#[derive(Debug, Clone)]
pub struct DefaultFieldTypeService {
    registry: Arc<FieldValueConverterRegistry>,
}

impl DefaultFieldTypeService {
    /// Creates the service over `registry`.
    pub fn new(registry: Arc<FieldValueConverterRegistry>) -> Self {
        Self { registry }
    }
}

impl FieldTypeService for DefaultFieldTypeService {
    fn empty_value(&self, field_type: &str) -> RepositoryResult<SqlParam> {
        match self.registry.get(field_type) {
            Ok(converter) => Ok(converter.empty_value()),
            Err(RepositoryError::NotFound(_)) => Err(NotFoundError::FieldType {
                field_type: field_type.to_string(),
            }
            .into()),
            Err(other) => Err(other),
        }
    }
}
