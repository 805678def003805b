use chrono::{DateTime, NaiveDate};

use crate::core::TransformationProcessor;
use crate::error::{InvalidArgumentError, RepositoryResult};
use crate::sql::SqlParam;
use crate::types::Value;

use super::FieldValueConverter;

/// Date and time field types, indexed as unix timestamps in `data_int`.
///
/// Accepts integer timestamps, RFC 3339 date-times and `YYYY-MM-DD` dates
/// (midnight UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConverter;

impl DateConverter {
    fn parse_timestamp(text: &str) -> RepositoryResult<i64> {
        let text = text.trim();
        if let Ok(timestamp) = text.parse::<i64>() {
            return Ok(timestamp);
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
            return Ok(datetime.timestamp());
        }

        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
            InvalidArgumentError::MalformedValue {
                argument: "value".to_string(),
                source: Box::new(e),
            }
        })?;
        Ok(date.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp()))
    }
}

impl FieldValueConverter for DateConverter {
    fn index_column(&self) -> Option<&'static str> {
        Some("data_int")
    }

    fn empty_value(&self) -> SqlParam {
        SqlParam::integer(0)
    }

    fn to_index_value(
        &self,
        value: &Value,
        _processor: &dyn TransformationProcessor,
    ) -> RepositoryResult<SqlParam> {
        match value {
            Value::Int(timestamp) => Ok(SqlParam::Integer(*timestamp)),
            Value::String(text) => Self::parse_timestamp(text).map(SqlParam::Integer),
            other => Err(InvalidArgumentError::InvalidValue {
                argument: "value".to_string(),
                message: format!("expected a timestamp or date string, got '{}'", other),
            }
            .into()),
        }
    }
}
