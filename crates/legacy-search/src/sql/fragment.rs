//! Rendered SQL with bound parameters.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// A fragment of SQL with bound parameters.
///
/// Placeholders are positional (`?1`, `?2`, ...) and numbered in the order
/// the parameters appear in `params`, starting after the render offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlFragment {
    /// The SQL text.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlParam {
    /// Integer parameter.
    Integer(i64),
    /// Float parameter.
    Float(f64),
    /// String parameter.
    String(String),
    /// Null parameter.
    Null,
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }

    /// Creates a float parameter.
    pub fn float(f: f64) -> Self {
        SqlParam::Float(f)
    }
}

impl From<&Value> for SqlParam {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => SqlParam::Integer(i64::from(*b)),
            Value::Int(i) => SqlParam::Integer(*i),
            Value::Float(f) => SqlParam::Float(*f),
            Value::String(s) => SqlParam::String(s.clone()),
        }
    }
}

impl SqlFragment {
    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// Accumulates SQL text and allocates placeholders in visit order.
pub(crate) struct SqlWriter {
    sql: String,
    params: Vec<SqlParam>,
    offset: usize,
}

impl SqlWriter {
    pub(crate) fn new(offset: usize) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            offset,
        }
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub(crate) fn push_int(&mut self, i: i64) {
        let _ = write!(self.sql, "{}", i);
    }

    /// Binds a parameter and writes its placeholder.
    pub(crate) fn push_param(&mut self, param: SqlParam) {
        self.params.push(param);
        let _ = write!(self.sql, "?{}", self.offset + self.params.len());
    }

    pub(crate) fn finish(self) -> SqlFragment {
        SqlFragment::with_params(self.sql, self.params)
    }
}
