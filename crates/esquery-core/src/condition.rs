use crate::value::Value;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConditionError
///
/// Construction-time validation failures. Shapes are checked when a leaf is
/// built, never coerced later.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConditionError {
    #[error("unknown operator {spelling:?}")]
    UnknownOperator { spelling: String },

    #[error("operator {operator} expects {expected}, got {got}")]
    ValueShape {
        operator: Operator,
        expected: ValueShape,
        got: ValueShape,
    },
}

///
/// Conjunction
/// AND/OR combinator joining sibling members of a group.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Conjunction {
    #[default]
    #[display("AND")]
    And,
    #[display("OR")]
    Or,
}

///
/// Operator
///
/// Leaf comparison operators, displayed with the SQL-ish spellings the
/// entity-query surface accepts.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Operator {
    #[default]
    #[display("=")]
    Eq,
    #[display("!=")]
    Ne,
    #[display("IN")]
    In,
    #[display("NOT IN")]
    NotIn,
    #[display("IS NULL")]
    IsNull,
    #[display("IS NOT NULL")]
    IsNotNull,
    #[display(">")]
    Gt,
    #[display(">=")]
    Gte,
    #[display("<")]
    Lt,
    #[display("<=")]
    Lte,
    #[display("BETWEEN")]
    Between,
    #[display("STARTS_WITH")]
    StartsWith,
    #[display("ENDS_WITH")]
    EndsWith,
    #[display("CONTAINS")]
    Contains,
}

impl Operator {
    /// Payload shape this operator accepts.
    #[must_use]
    pub const fn expected_shape(self) -> ValueShape {
        match self {
            Self::IsNull | Self::IsNotNull => ValueShape::None,
            Self::In | Self::NotIn => ValueShape::Set,
            Self::Between => ValueShape::Pair,
            Self::Eq
            | Self::Ne
            | Self::Gt
            | Self::Gte
            | Self::Lt
            | Self::Lte
            | Self::StartsWith
            | Self::EndsWith
            | Self::Contains => ValueShape::Scalar,
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = ConditionError;

    fn try_from(spelling: &str) -> Result<Self, ConditionError> {
        let operator = match spelling {
            "=" => Self::Eq,
            "!=" | "<>" => Self::Ne,
            "IN" => Self::In,
            "NOT IN" => Self::NotIn,
            "IS NULL" => Self::IsNull,
            "IS NOT NULL" => Self::IsNotNull,
            ">" => Self::Gt,
            ">=" => Self::Gte,
            "<" => Self::Lt,
            "<=" => Self::Lte,
            "BETWEEN" => Self::Between,
            "STARTS_WITH" => Self::StartsWith,
            "ENDS_WITH" => Self::EndsWith,
            "CONTAINS" => Self::Contains,
            _ => {
                return Err(ConditionError::UnknownOperator {
                    spelling: spelling.to_string(),
                });
            }
        };

        Ok(operator)
    }
}

///
/// ValueShape
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ValueShape {
    #[display("no value")]
    None,
    #[display("a scalar")]
    Scalar,
    #[display("an ordered pair")]
    Pair,
    #[display("a value set")]
    Set,
}

///
/// ConditionValue
///
/// Payload attached to a leaf. Closed sum over the shapes the operators
/// accept; the shape is validated against the operator at construction.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ConditionValue {
    None,
    Scalar(Value),
    Pair(Value, Value),
    Set(Vec<Value>),
}

impl ConditionValue {
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn pair(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::Pair(low.into(), high.into())
    }

    pub fn set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Set(values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub const fn shape(&self) -> ValueShape {
        match self {
            Self::None => ValueShape::None,
            Self::Scalar(_) => ValueShape::Scalar,
            Self::Pair(..) => ValueShape::Pair,
            Self::Set(_) => ValueShape::Set,
        }
    }
}

///
/// Condition
///
/// Leaf predicate: field, operator, payload. Public construction is
/// shape-checked; deserialized trees are re-checked during lowering.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Condition {
    field: String,
    operator: Operator,
    value: ConditionValue,
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        value: ConditionValue,
    ) -> Result<Self, ConditionError> {
        let expected = operator.expected_shape();
        let got = value.shape();
        if expected != got {
            return Err(ConditionError::ValueShape {
                operator,
                expected,
                got,
            });
        }

        Ok(Self {
            field: field.into(),
            operator,
            value,
        })
    }

    /// Dynamic entity-query surface: the operator arrives as its SQL-ish
    /// spelling and defaults to `=` when omitted.
    pub fn parse(
        field: impl Into<String>,
        operator: Option<&str>,
        value: ConditionValue,
    ) -> Result<Self, ConditionError> {
        let operator = match operator {
            Some(spelling) => Operator::try_from(spelling)?,
            None => Operator::default(),
        };

        Self::new(field, operator, value)
    }

    /// Internal constructor for the typed builder methods, which guarantee
    /// the shape by signature.
    fn raw(field: String, operator: Operator, value: ConditionValue) -> Self {
        debug_assert_eq!(operator.expected_shape(), value.shape());

        Self {
            field,
            operator,
            value,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub const fn value(&self) -> &ConditionValue {
        &self.value
    }
}

///
/// Node
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Node {
    Leaf(Condition),
    Group(ConditionGroup),
}

impl From<Condition> for Node {
    fn from(condition: Condition) -> Self {
        Self::Leaf(condition)
    }
}

impl From<ConditionGroup> for Node {
    fn from(group: ConditionGroup) -> Self {
        Self::Group(group)
    }
}

///
/// ConditionGroup
///
/// Recursive filter predicate: leaf conditions and nested sub-groups joined
/// by one conjunction. The conjunction is fixed at creation — there is no
/// setter, so it cannot change once members exist. Pure data accumulator;
/// lowering lives in `compile`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ConditionGroup {
    conjunction: Conjunction,
    members: Vec<Node>,
}

impl ConditionGroup {
    #[must_use]
    pub const fn new(conjunction: Conjunction) -> Self {
        Self {
            conjunction,
            members: Vec::new(),
        }
    }

    /// AND group: every member must match.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(Conjunction::And)
    }

    /// OR group: at least one member must match.
    #[must_use]
    pub const fn any() -> Self {
        Self::new(Conjunction::Or)
    }

    #[must_use]
    pub const fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    #[must_use]
    pub fn members(&self) -> &[Node] {
        &self.members
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append a prebuilt leaf or nested sub-group.
    #[must_use]
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.members.push(node.into());
        self
    }

    fn leaf(self, field: impl Into<String>, operator: Operator, value: ConditionValue) -> Self {
        self.with(Condition::raw(field.into(), operator, value))
    }

    // ------------------------------------------------------------------
    // Typed leaf builders — shape is enforced by the signature
    // ------------------------------------------------------------------

    /// Equality shorthand; the default operator when none is given.
    #[must_use]
    pub fn condition(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.eq(field, value)
    }

    #[must_use]
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::Eq, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn ne(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::Ne, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::Gt, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::Gte, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::Lt, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::Lte, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn in_list<I, T>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.leaf(field, Operator::In, ConditionValue::set(values))
    }

    #[must_use]
    pub fn not_in<I, T>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.leaf(field, Operator::NotIn, ConditionValue::set(values))
    }

    /// Endpoints may be given in either order; lowering normalizes them.
    #[must_use]
    pub fn between(
        self,
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.leaf(field, Operator::Between, ConditionValue::pair(low, high))
    }

    #[must_use]
    pub fn starts_with(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::StartsWith, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn ends_with(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::EndsWith, ConditionValue::scalar(value))
    }

    #[must_use]
    pub fn contains(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.leaf(field, Operator::Contains, ConditionValue::scalar(value))
    }

    /// Field is present and non-null (IS NOT NULL).
    #[must_use]
    pub fn exists(self, field: impl Into<String>) -> Self {
        self.leaf(field, Operator::IsNotNull, ConditionValue::None)
    }

    /// Field is absent or null (IS NULL).
    #[must_use]
    pub fn not_exists(self, field: impl Into<String>) -> Self {
        self.leaf(field, Operator::IsNull, ConditionValue::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_defaults_to_eq() {
        let condition = Condition::parse("name", None, ConditionValue::scalar("bob")).unwrap();
        assert_eq!(condition.operator(), Operator::Eq);
    }

    #[test]
    fn operator_spellings_parse() {
        assert_eq!(Operator::try_from("<>").unwrap(), Operator::Ne);
        assert_eq!(Operator::try_from("!=").unwrap(), Operator::Ne);
        assert_eq!(Operator::try_from("NOT IN").unwrap(), Operator::NotIn);
        assert_eq!(Operator::try_from("BETWEEN").unwrap(), Operator::Between);
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = Condition::parse("age", Some("LIKE"), ConditionValue::scalar(1)).unwrap_err();
        assert_eq!(
            err,
            ConditionError::UnknownOperator {
                spelling: "LIKE".to_string()
            }
        );
    }

    #[test]
    fn between_requires_exactly_two_endpoints() {
        let one = Condition::parse("age", Some("BETWEEN"), ConditionValue::scalar(5));
        let three = Condition::parse("age", Some("BETWEEN"), ConditionValue::set([1, 2, 3]));

        for result in [one, three] {
            assert!(matches!(
                result.unwrap_err(),
                ConditionError::ValueShape {
                    operator: Operator::Between,
                    expected: ValueShape::Pair,
                    ..
                }
            ));
        }
    }

    #[test]
    fn set_operators_require_sets() {
        let err = Condition::parse("tags", Some("IN"), ConditionValue::scalar("a")).unwrap_err();
        assert!(matches!(
            err,
            ConditionError::ValueShape {
                operator: Operator::In,
                expected: ValueShape::Set,
                got: ValueShape::Scalar,
            }
        ));
    }

    #[test]
    fn null_checks_take_no_value() {
        let err = Condition::parse("bio", Some("IS NULL"), ConditionValue::scalar(1)).unwrap_err();
        assert!(matches!(
            err,
            ConditionError::ValueShape {
                operator: Operator::IsNull,
                expected: ValueShape::None,
                ..
            }
        ));

        let ok = Condition::parse("bio", Some("IS NULL"), ConditionValue::None).unwrap();
        assert_eq!(ok.operator(), Operator::IsNull);
    }

    #[test]
    fn groups_nest_and_keep_member_order() {
        let group = ConditionGroup::all()
            .eq("type", "page")
            .with(ConditionGroup::any().eq("status", 1).eq("status", 2));

        assert_eq!(group.conjunction(), Conjunction::And);
        assert_eq!(group.members().len(), 2);
        assert!(matches!(group.members()[0], Node::Leaf(_)));
        assert!(matches!(group.members()[1], Node::Group(_)));
    }
}
