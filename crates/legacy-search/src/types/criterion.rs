//! Content and location search criteria.
//!
//! A [`Criterion`] is an immutable tree. Composite variants hold child
//! criteria; leaf variants hold a validated [`Specification`] (operator plus
//! one or more values) and, where relevant, a target.
//!
//! # JSON form
//!
//! Criteria are externally tagged with snake_case variant names. Scalar
//! values are accepted wherever a list is expected:
//!
//! ```
//! use ibexa_legacy_search::types::{Criterion, Operator};
//!
//! let criterion: Criterion = serde_json::from_str(
//!     r#"{"logical_and": [
//!         {"content_type_identifier": {"operator": "in", "value": ["article", "blog_post"]}},
//!         {"date_metadata": {"target": "created", "operator": "between", "value": [1000, 2000]}},
//!         {"logical_not": {"section_id": {"operator": "eq", "value": 3}}}
//!     ]}"#,
//! )
//! .unwrap();
//!
//! assert!(criterion.validate().is_ok());
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvalidArgumentError;

/// Comparison operators a leaf criterion can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equal.
    Eq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Member of a set.
    In,
    /// Inclusive range.
    Between,
    /// Pattern match, `*` is the wildcard.
    Like,
}

impl Operator {
    /// Returns true if the operator compares against exactly one value.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "EQ"),
            Operator::Gt => write!(f, "GT"),
            Operator::Gte => write!(f, "GTE"),
            Operator::Lt => write!(f, "LT"),
            Operator::Lte => write!(f, "LTE"),
            Operator::In => write!(f, "IN"),
            Operator::Between => write!(f, "BETWEEN"),
            Operator::Like => write!(f, "LIKE"),
        }
    }
}

/// A single criterion value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Value {
    /// Returns the value as an integer, accepting numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => s.trim().parse().ok(),
            Value::Float(_) => None,
        }
    }

    /// Returns the value as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(_) => None,
        }
    }

    /// Returns the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// An operator together with the values it applies to.
///
/// The value count always matches the operator: `BETWEEN` holds exactly two
/// values, scalar comparisons exactly one, `IN` and `LIKE` at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpecification", into = "RawSpecification")]
pub struct Specification {
    operator: Operator,
    values: Vec<Value>,
}

impl Specification {
    /// Creates a specification, checking the value arity.
    pub fn new(operator: Operator, values: Vec<Value>) -> Result<Self, InvalidArgumentError> {
        let expected = match operator {
            Operator::Between if values.len() != 2 => Some("exactly 2"),
            op if op.is_scalar() && values.len() != 1 => Some("exactly 1"),
            Operator::In | Operator::Like if values.is_empty() => Some("at least 1"),
            _ => None,
        };

        if let Some(expected) = expected {
            return Err(InvalidArgumentError::Arity {
                operator: operator.to_string(),
                expected,
                actual: values.len(),
            });
        }

        Ok(Self { operator, values })
    }

    /// `EQ` against a single value.
    pub fn eq(value: impl Into<Value>) -> Self {
        Self {
            operator: Operator::Eq,
            values: vec![value.into()],
        }
    }

    /// Scalar comparison (`EQ`, `GT`, `GTE`, `LT`, `LTE`).
    pub fn compare(operator: Operator, value: impl Into<Value>) -> Result<Self, InvalidArgumentError> {
        Self::new(operator, vec![value.into()])
    }

    /// `IN` over a non-empty set of values.
    pub fn in_values<I, V>(values: I) -> Result<Self, InvalidArgumentError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(Operator::In, values.into_iter().map(Into::into).collect())
    }

    /// `BETWEEN low AND high`.
    pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self {
            operator: Operator::Between,
            values: vec![low.into(), high.into()],
        }
    }

    /// `LIKE` with a single pattern.
    pub fn like(pattern: impl Into<Value>) -> Self {
        Self {
            operator: Operator::Like,
            values: vec![pattern.into()],
        }
    }

    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the values, always at least one.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns all values as integers.
    pub fn int_values(&self, argument: &str) -> Result<Vec<i64>, InvalidArgumentError> {
        self.values
            .iter()
            .map(|v| {
                v.as_i64().ok_or_else(|| InvalidArgumentError::InvalidValue {
                    argument: argument.to_string(),
                    message: format!("expected an integer, got '{}'", v),
                })
            })
            .collect()
    }

    /// Returns all values rendered as strings.
    pub fn string_values(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }
}

#[derive(Serialize, Deserialize)]
struct RawSpecification {
    operator: Operator,
    value: OneOrMany,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Value>),
    One(Value),
}

impl TryFrom<RawSpecification> for Specification {
    type Error = InvalidArgumentError;

    fn try_from(raw: RawSpecification) -> Result<Self, Self::Error> {
        let values = match raw.value {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => vec![value],
        };
        Specification::new(raw.operator, values)
    }
}

impl From<Specification> for RawSpecification {
    fn from(spec: Specification) -> Self {
        let value = if spec.operator.is_scalar() && spec.values.len() == 1 {
            OneOrMany::One(spec.values.into_iter().next().unwrap_or(Value::Int(0)))
        } else {
            OneOrMany::Many(spec.values)
        };
        RawSpecification {
            operator: spec.operator,
            value,
        }
    }
}

/// Which timestamp a [`DateMetadataCriterion`] compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMetadataTarget {
    /// Last modification of the content item.
    Modified,
    /// Creation of the content item.
    Created,
    /// First publication of the content item.
    PublicationDate,
    /// Time the item was moved to the trash.
    Trashed,
}

/// Which user relation a [`UserMetadataCriterion`] matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMetadataTarget {
    /// Owner of the content item.
    Owner,
    /// Creator of the current version.
    Modifier,
    /// Any user group the owner belongs to, transitively.
    Group,
}

/// Visibility states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    /// Visible content or location.
    Visible,
    /// Hidden content or location.
    Hidden,
}

fn default_true() -> bool {
    true
}

/// Matches content available in at least one of the given languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageCodeCriterion {
    /// Language codes.
    #[serde(flatten)]
    pub codes: Specification,
    /// Whether always-available content matches regardless of language.
    #[serde(default = "default_true")]
    pub match_always_available: bool,
}

/// Compares one of the content timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateMetadataCriterion {
    /// The timestamp to compare.
    pub target: DateMetadataTarget,
    /// Operator and timestamps.
    #[serde(flatten)]
    pub specification: Specification,
}

/// Matches content by owner, modifier or owner group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetadataCriterion {
    /// The user relation to match.
    pub target: UserMetadataTarget,
    /// Operator and user (or group) content ids.
    #[serde(flatten)]
    pub specification: Specification,
}

/// Compares the value of a field across all content types using the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCriterion {
    /// Field definition identifier.
    pub target: String,
    /// Operator and values.
    #[serde(flatten)]
    pub specification: Specification,
}

/// Matches content whose field is (or is not) empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsFieldEmptyCriterion {
    /// Field definition identifier.
    pub target: String,
    /// `true` matches empty fields, `false` non-empty ones.
    #[serde(default = "default_true")]
    pub empty: bool,
}

/// A content or location search criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// All children must match. No children means no constraint.
    LogicalAnd(Vec<Criterion>),
    /// Any child must match. No children matches nothing.
    LogicalOr(Vec<Criterion>),
    /// The child must not match.
    LogicalNot(Box<Criterion>),
    /// Matches everything.
    MatchAll,
    /// Matches nothing.
    MatchNone,
    /// Content ids.
    ContentId(Specification),
    /// Content remote ids.
    RemoteId(Specification),
    /// Content type ids.
    ContentTypeId(Specification),
    /// Content type identifiers, resolved to ids.
    ContentTypeIdentifier(Specification),
    /// Content type group ids.
    ContentTypeGroupId(Specification),
    /// Section ids.
    SectionId(Specification),
    /// Section identifiers.
    SectionIdentifier(Specification),
    /// Object state ids.
    ObjectStateId(Specification),
    /// Available translations.
    LanguageCode(LanguageCodeCriterion),
    /// Creation, modification or trash timestamps.
    DateMetadata(DateMetadataCriterion),
    /// Owner, modifier or owner group.
    UserMetadata(UserMetadataCriterion),
    /// Field values.
    Field(FieldCriterion),
    /// Field emptiness.
    IsFieldEmpty(IsFieldEmptyCriterion),
    /// Case-insensitive content name.
    ContentName(Specification),
    /// Location ids.
    LocationId(Specification),
    /// Parent location ids.
    ParentLocationId(Specification),
    /// Location remote ids.
    LocationRemoteId(Specification),
    /// Locations at or below the given path strings.
    Subtree(Specification),
    /// Locations on the given path strings.
    Ancestor(Specification),
    /// Visible or hidden.
    Visibility(VisibilityState),
    /// Location depth. Location search only.
    Depth(Specification),
    /// Location priority. Location search only.
    LocationPriority(Specification),
    /// Main or secondary location. Location search only.
    IsMainLocation(bool),
}

const ID_OPERATORS: &[Operator] = &[Operator::In, Operator::Eq];
const RANGE_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Gt,
    Operator::Gte,
    Operator::Lt,
    Operator::Lte,
    Operator::In,
    Operator::Between,
];
const ALL_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Gt,
    Operator::Gte,
    Operator::Lt,
    Operator::Lte,
    Operator::In,
    Operator::Between,
    Operator::Like,
];

impl Criterion {
    /// `ContentId IN (ids)`.
    pub fn content_id<I: IntoIterator<Item = i64>>(ids: I) -> Result<Self, InvalidArgumentError> {
        Ok(Criterion::ContentId(Specification::in_values(ids)?))
    }

    /// `ContentTypeIdentifier IN (identifiers)`.
    pub fn content_type_identifier<I, S>(identifiers: I) -> Result<Self, InvalidArgumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Criterion::ContentTypeIdentifier(Specification::in_values(
            identifiers.into_iter().map(Into::into),
        )?))
    }

    /// `SectionId IN (ids)`.
    pub fn section_id<I: IntoIterator<Item = i64>>(ids: I) -> Result<Self, InvalidArgumentError> {
        Ok(Criterion::SectionId(Specification::in_values(ids)?))
    }

    /// Language code criterion.
    pub fn language_code<I, S>(codes: I, match_always_available: bool) -> Result<Self, InvalidArgumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Criterion::LanguageCode(LanguageCodeCriterion {
            codes: Specification::in_values(codes.into_iter().map(Into::into))?,
            match_always_available,
        }))
    }

    /// Date metadata criterion.
    pub fn date_metadata(target: DateMetadataTarget, specification: Specification) -> Self {
        Criterion::DateMetadata(DateMetadataCriterion {
            target,
            specification,
        })
    }

    /// User metadata criterion.
    pub fn user_metadata(target: UserMetadataTarget, specification: Specification) -> Self {
        Criterion::UserMetadata(UserMetadataCriterion {
            target,
            specification,
        })
    }

    /// Field criterion.
    pub fn field(target: impl Into<String>, specification: Specification) -> Self {
        Criterion::Field(FieldCriterion {
            target: target.into(),
            specification,
        })
    }

    /// Field emptiness criterion.
    pub fn is_field_empty(target: impl Into<String>, empty: bool) -> Self {
        Criterion::IsFieldEmpty(IsFieldEmptyCriterion {
            target: target.into(),
            empty,
        })
    }

    /// Conjunction.
    pub fn and(criteria: Vec<Criterion>) -> Self {
        Criterion::LogicalAnd(criteria)
    }

    /// Disjunction.
    pub fn or(criteria: Vec<Criterion>) -> Self {
        Criterion::LogicalOr(criteria)
    }

    /// Negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(criterion: Criterion) -> Self {
        Criterion::LogicalNot(Box::new(criterion))
    }

    /// Returns the criterion name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::LogicalAnd(_) => "LogicalAnd",
            Criterion::LogicalOr(_) => "LogicalOr",
            Criterion::LogicalNot(_) => "LogicalNot",
            Criterion::MatchAll => "MatchAll",
            Criterion::MatchNone => "MatchNone",
            Criterion::ContentId(_) => "ContentId",
            Criterion::RemoteId(_) => "RemoteId",
            Criterion::ContentTypeId(_) => "ContentTypeId",
            Criterion::ContentTypeIdentifier(_) => "ContentTypeIdentifier",
            Criterion::ContentTypeGroupId(_) => "ContentTypeGroupId",
            Criterion::SectionId(_) => "SectionId",
            Criterion::SectionIdentifier(_) => "SectionIdentifier",
            Criterion::ObjectStateId(_) => "ObjectStateId",
            Criterion::LanguageCode(_) => "LanguageCode",
            Criterion::DateMetadata(_) => "DateMetadata",
            Criterion::UserMetadata(_) => "UserMetadata",
            Criterion::Field(_) => "Field",
            Criterion::IsFieldEmpty(_) => "IsFieldEmpty",
            Criterion::ContentName(_) => "ContentName",
            Criterion::LocationId(_) => "LocationId",
            Criterion::ParentLocationId(_) => "ParentLocationId",
            Criterion::LocationRemoteId(_) => "LocationRemoteId",
            Criterion::Subtree(_) => "Subtree",
            Criterion::Ancestor(_) => "Ancestor",
            Criterion::Visibility(_) => "Visibility",
            Criterion::Depth(_) => "Depth",
            Criterion::LocationPriority(_) => "LocationPriority",
            Criterion::IsMainLocation(_) => "IsMainLocation",
        }
    }

    /// Returns the specification of a leaf criterion.
    pub fn specification(&self) -> Option<&Specification> {
        match self {
            Criterion::ContentId(s)
            | Criterion::RemoteId(s)
            | Criterion::ContentTypeId(s)
            | Criterion::ContentTypeIdentifier(s)
            | Criterion::ContentTypeGroupId(s)
            | Criterion::SectionId(s)
            | Criterion::SectionIdentifier(s)
            | Criterion::ObjectStateId(s)
            | Criterion::ContentName(s)
            | Criterion::LocationId(s)
            | Criterion::ParentLocationId(s)
            | Criterion::LocationRemoteId(s)
            | Criterion::Subtree(s)
            | Criterion::Ancestor(s)
            | Criterion::Depth(s)
            | Criterion::LocationPriority(s) => Some(s),
            Criterion::LanguageCode(c) => Some(&c.codes),
            Criterion::DateMetadata(c) => Some(&c.specification),
            Criterion::UserMetadata(c) => Some(&c.specification),
            Criterion::Field(c) => Some(&c.specification),
            Criterion::LogicalAnd(_)
            | Criterion::LogicalOr(_)
            | Criterion::LogicalNot(_)
            | Criterion::MatchAll
            | Criterion::MatchNone
            | Criterion::IsFieldEmpty(_)
            | Criterion::Visibility(_)
            | Criterion::IsMainLocation(_) => None,
        }
    }

    /// Returns the operators this criterion accepts.
    pub fn supported_operators(&self) -> &'static [Operator] {
        match self {
            Criterion::DateMetadata(_) | Criterion::Depth(_) | Criterion::LocationPriority(_) => {
                RANGE_OPERATORS
            }
            Criterion::Field(_) => ALL_OPERATORS,
            Criterion::ContentName(_) => &[Operator::Eq, Operator::Like],
            c if c.specification().is_some() => ID_OPERATORS,
            _ => &[],
        }
    }

    /// Checks the whole tree: operator support and value shapes.
    pub fn validate(&self) -> Result<(), InvalidArgumentError> {
        match self {
            Criterion::LogicalAnd(children) | Criterion::LogicalOr(children) => {
                children.iter().try_for_each(Criterion::validate)
            }
            Criterion::LogicalNot(child) => child.validate(),
            Criterion::Subtree(spec) | Criterion::Ancestor(spec) => {
                self.check_operator(spec)?;
                for path in spec.values() {
                    parse_path_string(&path.to_string())?;
                }
                Ok(())
            }
            Criterion::ContentId(spec)
            | Criterion::ContentTypeId(spec)
            | Criterion::ContentTypeGroupId(spec)
            | Criterion::SectionId(spec)
            | Criterion::ObjectStateId(spec)
            | Criterion::LocationId(spec)
            | Criterion::ParentLocationId(spec)
            | Criterion::Depth(spec)
            | Criterion::LocationPriority(spec) => {
                self.check_operator(spec)?;
                spec.int_values(self.name()).map(|_| ())
            }
            Criterion::DateMetadata(c) => {
                self.check_operator(&c.specification)?;
                c.specification.int_values("DateMetadata").map(|_| ())
            }
            Criterion::UserMetadata(c) => {
                self.check_operator(&c.specification)?;
                c.specification.int_values("UserMetadata").map(|_| ())
            }
            Criterion::Field(c) if c.target.is_empty() => Err(InvalidArgumentError::InvalidValue {
                argument: "target".to_string(),
                message: "field identifier must not be empty".to_string(),
            }),
            _ => match self.specification() {
                Some(spec) => self.check_operator(spec),
                None => Ok(()),
            },
        }
    }

    fn check_operator(&self, spec: &Specification) -> Result<(), InvalidArgumentError> {
        if self.supported_operators().contains(&spec.operator()) {
            Ok(())
        } else {
            Err(InvalidArgumentError::UnsupportedOperator {
                criterion: self.name(),
                operator: spec.operator().to_string(),
            })
        }
    }
}

static PATH_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(\d+/)+$").expect("path string pattern is valid"));

/// Parses a location path string (`/1/2/42/`) into its node ids.
pub fn parse_path_string(path: &str) -> Result<Vec<i64>, InvalidArgumentError> {
    if !PATH_STRING.is_match(path) {
        return Err(InvalidArgumentError::InvalidValue {
            argument: "path_string".to_string(),
            message: format!("'{}' is not a valid location path string", path),
        });
    }

    path.trim_matches('/')
        .split('/')
        .map(|id| {
            id.parse::<i64>()
                .map_err(|e| InvalidArgumentError::MalformedValue {
                    argument: "path_string".to_string(),
                    source: Box::new(e),
                })
        })
        .collect()
}
