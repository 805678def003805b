use crate::core::TransformationProcessor;
use crate::error::{InvalidArgumentError, RepositoryResult};
use crate::sql::SqlParam;
use crate::types::Value;

use super::FieldValueConverter;

/// Integer-valued field types indexed in `sort_key_int`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerConverter;

impl FieldValueConverter for IntegerConverter {
    fn index_column(&self) -> Option<&'static str> {
        Some("sort_key_int")
    }

    fn empty_value(&self) -> SqlParam {
        SqlParam::integer(0)
    }

    fn to_index_value(
        &self,
        value: &Value,
        _processor: &dyn TransformationProcessor,
    ) -> RepositoryResult<SqlParam> {
        value
            .as_i64()
            .map(SqlParam::Integer)
            .ok_or_else(|| invalid(value, "an integer"))
    }
}

/// `ezfloat`, indexed in `data_float`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatConverter;

impl FieldValueConverter for FloatConverter {
    fn index_column(&self) -> Option<&'static str> {
        Some("data_float")
    }

    fn empty_value(&self) -> SqlParam {
        SqlParam::float(0.0)
    }

    fn to_index_value(
        &self,
        value: &Value,
        _processor: &dyn TransformationProcessor,
    ) -> RepositoryResult<SqlParam> {
        value
            .as_f64()
            .map(SqlParam::Float)
            .ok_or_else(|| invalid(value, "a number"))
    }
}

fn invalid(value: &Value, expected: &str) -> crate::error::RepositoryError {
    InvalidArgumentError::InvalidValue {
        argument: "value".to_string(),
        message: format!("expected {}, got '{}'", expected, value),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LowercaseTransformation;
    use crate::error::RepositoryError;

    #[test]
    fn test_integer_accepts_numeric_strings() {
        let value = IntegerConverter
            .to_index_value(&Value::from("42"), &LowercaseTransformation)
            .unwrap();
        assert_eq!(value, SqlParam::integer(42));
    }

    #[test]
    fn test_integer_rejects_text() {
        let err = IntegerConverter
            .to_index_value(&Value::from("forty-two"), &LowercaseTransformation)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidArgument(_)));
    }

    #[test]
    fn test_float_widens_integers() {
        let value = FloatConverter
            .to_index_value(&Value::Int(3), &LowercaseTransformation)
            .unwrap();
        assert_eq!(value, SqlParam::float(3.0));
    }
}
