use crate::error::{RepositoryResult, RuntimeError};
use crate::types::Operator;

use super::expr::{CompareOp, Operand, SqlExpr};
use super::fragment::SqlParam;
use super::like_pattern;

/// Builds `operand <operator> values` from already converted values.
///
/// `LIKE` string values are escaped and their `*` wildcards mapped to `%`;
/// several `LIKE` values are combined with `OR`. `criterion` names the
/// caller in errors.
pub fn operator_filter(
    criterion: &'static str,
    operand: Operand,
    operator: Operator,
    values: Vec<SqlParam>,
) -> RepositoryResult<SqlExpr> {
    let unsupported = || RuntimeError::UnsupportedOperator {
        criterion,
        operator: operator.to_string(),
    };
    let mut values = values.into_iter();

    let expr = match operator {
        Operator::In => SqlExpr::in_list(operand, values),
        Operator::Between => match (values.next(), values.next()) {
            (Some(low), Some(high)) => {
                SqlExpr::between(operand, Operand::Param(low), Operand::Param(high))
            }
            _ => return Err(unsupported().into()),
        },
        Operator::Like => {
            let mut patterns: Vec<SqlExpr> = values
                .map(|value| {
                    let pattern = match value {
                        SqlParam::String(s) => like_pattern(&s),
                        SqlParam::Integer(i) => i.to_string(),
                        SqlParam::Float(f) => f.to_string(),
                        SqlParam::Null => String::new(),
                    };
                    SqlExpr::like(operand.clone(), Operand::param(SqlParam::String(pattern)))
                })
                .collect();
            if patterns.len() == 1 {
                patterns.remove(0)
            } else {
                SqlExpr::or(patterns)
            }
        }
        scalar => {
            let op = CompareOp::from_operator(scalar).ok_or_else(unsupported)?;
            let value = values.next().ok_or_else(unsupported)?;
            SqlExpr::compare(operand, op, Operand::Param(value))
        }
    };
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between() {
        let expr = operator_filter(
            "DateMetadata",
            Operand::column("c", "published"),
            Operator::Between,
            vec![SqlParam::integer(1000), SqlParam::integer(2000)],
        )
        .unwrap();
        let frag = expr.to_fragment();
        assert_eq!(frag.sql, "c.published BETWEEN ?1 AND ?2");
        assert_eq!(frag.params, vec![SqlParam::integer(1000), SqlParam::integer(2000)]);
    }

    #[test]
    fn test_missing_between_bound_is_an_error() {
        let result = operator_filter(
            "Depth",
            Operand::column("t", "depth"),
            Operator::Between,
            vec![SqlParam::integer(1)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_like_escapes_literal_wildcards() {
        let expr = operator_filter(
            "ContentName",
            Operand::column("n", "name"),
            Operator::Like,
            vec![SqlParam::string("50%*")],
        )
        .unwrap();
        assert_eq!(expr.to_fragment().params, vec![SqlParam::string("50\\%%")]);
    }
}
