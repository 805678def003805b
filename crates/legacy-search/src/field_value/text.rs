use crate::core::TransformationProcessor;
use crate::error::RepositoryResult;
use crate::sql::SqlParam;
use crate::types::Value;

use super::FieldValueConverter;

/// Text-like field types indexed in `sort_key_string`.
///
/// Values are case-folded the same way the index is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

impl FieldValueConverter for TextConverter {
    fn index_column(&self) -> Option<&'static str> {
        Some("sort_key_string")
    }

    fn empty_value(&self) -> SqlParam {
        SqlParam::string("")
    }

    fn to_index_value(
        &self,
        value: &Value,
        processor: &dyn TransformationProcessor,
    ) -> RepositoryResult<SqlParam> {
        Ok(SqlParam::String(processor.lowercase(&value.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LowercaseTransformation;

    #[test]
    fn test_values_are_case_folded() {
        let value = TextConverter
            .to_index_value(&Value::from("Hello World"), &LowercaseTransformation)
            .unwrap();
        assert_eq!(value, SqlParam::string("hello world"));
    }
}
