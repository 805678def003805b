use crate::core::TransformationProcessor;
use crate::error::{NotImplementedError, RepositoryResult};
use crate::sql::SqlParam;
use crate::types::Value;

use super::FieldValueConverter;

/// Field types the legacy engine cannot search.
#[derive(Debug, Clone)]
pub struct UnsearchableConverter {
    field_type: &'static str,
}

impl UnsearchableConverter {
    /// Creates the converter for `field_type`.
    pub fn new(field_type: &'static str) -> Self {
        Self { field_type }
    }
}

impl FieldValueConverter for UnsearchableConverter {
    fn index_column(&self) -> Option<&'static str> {
        None
    }

    fn empty_value(&self) -> SqlParam {
        SqlParam::Null
    }

    fn to_index_value(
        &self,
        _value: &Value,
        _processor: &dyn TransformationProcessor,
    ) -> RepositoryResult<SqlParam> {
        Err(NotImplementedError::UnsearchableFieldTypes {
            target: String::new(),
            field_types: vec![self.field_type.to_string()],
        }
        .into())
    }
}
