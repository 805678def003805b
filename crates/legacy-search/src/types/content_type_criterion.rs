//! Content type query criteria.

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgumentError;

use super::criterion::{Operator, Specification};

/// A criterion for querying content type definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypeCriterion {
    /// All children must match. No children means no constraint.
    LogicalAnd(Vec<ContentTypeCriterion>),
    /// Any child must match. No children matches nothing.
    LogicalOr(Vec<ContentTypeCriterion>),
    /// The child must not match.
    LogicalNot(Box<ContentTypeCriterion>),
    /// Content type ids.
    ContentTypeId(Specification),
    /// Content type identifiers.
    ContentTypeIdentifier(Specification),
    /// Content types defining any of the field definitions.
    ContainsFieldDefinitionId(Specification),
    /// Content type group ids.
    ContentTypeGroupId(Specification),
    /// Content type group names.
    ContentTypeGroupName(Specification),
    /// Content types in (or outside of) system groups.
    IsSystem(bool),
}

impl ContentTypeCriterion {
    /// Returns the criterion name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ContentTypeCriterion::LogicalAnd(_) => "LogicalAnd",
            ContentTypeCriterion::LogicalOr(_) => "LogicalOr",
            ContentTypeCriterion::LogicalNot(_) => "LogicalNot",
            ContentTypeCriterion::ContentTypeId(_) => "ContentTypeId",
            ContentTypeCriterion::ContentTypeIdentifier(_) => "ContentTypeIdentifier",
            ContentTypeCriterion::ContainsFieldDefinitionId(_) => "ContainsFieldDefinitionId",
            ContentTypeCriterion::ContentTypeGroupId(_) => "ContentTypeGroupId",
            ContentTypeCriterion::ContentTypeGroupName(_) => "ContentTypeGroupName",
            ContentTypeCriterion::IsSystem(_) => "IsSystem",
        }
    }

    /// Checks operators and value shapes of the whole tree.
    pub fn validate(&self) -> Result<(), InvalidArgumentError> {
        match self {
            ContentTypeCriterion::LogicalAnd(children) | ContentTypeCriterion::LogicalOr(children) => {
                children.iter().try_for_each(ContentTypeCriterion::validate)
            }
            ContentTypeCriterion::LogicalNot(child) => child.validate(),
            ContentTypeCriterion::IsSystem(_) => Ok(()),
            ContentTypeCriterion::ContentTypeId(spec)
            | ContentTypeCriterion::ContainsFieldDefinitionId(spec)
            | ContentTypeCriterion::ContentTypeGroupId(spec) => {
                self.check_operator(spec)?;
                spec.int_values(self.name()).map(|_| ())
            }
            ContentTypeCriterion::ContentTypeIdentifier(spec)
            | ContentTypeCriterion::ContentTypeGroupName(spec) => self.check_operator(spec),
        }
    }

    fn check_operator(&self, spec: &Specification) -> Result<(), InvalidArgumentError> {
        match spec.operator() {
            Operator::In | Operator::Eq => Ok(()),
            other => Err(InvalidArgumentError::UnsupportedOperator {
                criterion: self.name(),
                operator: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nested() {
        let criterion: ContentTypeCriterion = serde_json::from_str(
            r#"{"logical_or": [
                {"content_type_identifier": {"operator": "in", "value": ["folder"]}},
                {"logical_not": {"is_system": true}}
            ]}"#,
        )
        .unwrap();
        assert!(criterion.validate().is_ok());
        assert_eq!(criterion.name(), "LogicalOr");
    }

    #[test]
    fn test_validate_rejects_range_operator() {
        let criterion = ContentTypeCriterion::ContentTypeId(Specification::between(1, 3));
        assert!(criterion.validate().is_err());
    }
}
