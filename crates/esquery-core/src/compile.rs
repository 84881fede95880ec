use crate::{
    condition::{Condition, ConditionGroup, ConditionValue, Conjunction, Node, Operator, ValueShape},
    dsl::{BoolQuery, Clause, RangeBounds},
    value::Value,
};
use std::cmp::Ordering;
use thiserror::Error as ThisError;
use tracing::warn;

///
/// CompileError
///
/// Lowering-time backstop for condition shapes that slipped past
/// construction (deserialized trees). Identifies the offending operator and
/// conjunction; a condition is never silently dropped.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("cannot compile {operator} under {conjunction}: expected {expected}, got {got}")]
    InvalidCondition {
        operator: Operator,
        conjunction: Conjunction,
        expected: ValueShape,
        got: ValueShape,
    },
}

/// Recursively lower a condition group into a boolean clause document.
///
/// Bucket selection follows the conjunction: AND-positive clauses land in
/// `must`, AND-negative in `must_not`, OR-positive in `should`. A negative
/// clause under OR has no native bucket and is wrapped as
/// `should += {bool: {must_not: clause}}`.
///
/// Recursion depth is bounded by the caller's own nesting.
pub fn lower(group: &ConditionGroup) -> Result<BoolQuery, CompileError> {
    let conjunction = group.conjunction();
    let mut out = BoolQuery::default();

    for node in group.members() {
        match node {
            Node::Group(sub) => {
                let nested = lower(sub)?.into_clause();
                match conjunction {
                    Conjunction::And => out.must.push(nested),
                    Conjunction::Or => out.should.push(nested),
                }
            }
            Node::Leaf(condition) => lower_leaf(condition, conjunction, &mut out)?,
        }
    }

    Ok(out)
}

/// Lower one leaf into `(clause, negated)` and push it into the bucket the
/// conjunction selects.
fn lower_leaf(
    condition: &Condition,
    conjunction: Conjunction,
    out: &mut BoolQuery,
) -> Result<(), CompileError> {
    let field = condition.field().to_string();

    let (clause, negated) = match (condition.operator(), condition.value()) {
        (Operator::Eq, ConditionValue::Scalar(value)) => (term(field, value), false),
        (Operator::Ne, ConditionValue::Scalar(value)) => (term(field, value), true),

        (Operator::In, ConditionValue::Set(values)) => (terms(field, values), false),
        (Operator::NotIn, ConditionValue::Set(values)) => (terms(field, values), true),

        (Operator::IsNull, ConditionValue::None) => (Clause::Exists { field }, true),
        (Operator::IsNotNull, ConditionValue::None) => (Clause::Exists { field }, false),

        (Operator::Gt, ConditionValue::Scalar(value)) => (
            range(
                field,
                RangeBounds {
                    gt: Some(value.clone()),
                    ..RangeBounds::default()
                },
            ),
            false,
        ),
        (Operator::Gte, ConditionValue::Scalar(value)) => (
            range(
                field,
                RangeBounds {
                    gte: Some(value.clone()),
                    ..RangeBounds::default()
                },
            ),
            false,
        ),
        (Operator::Lt, ConditionValue::Scalar(value)) => (
            range(
                field,
                RangeBounds {
                    lt: Some(value.clone()),
                    ..RangeBounds::default()
                },
            ),
            false,
        ),
        (Operator::Lte, ConditionValue::Scalar(value)) => (
            range(
                field,
                RangeBounds {
                    lte: Some(value.clone()),
                    ..RangeBounds::default()
                },
            ),
            false,
        ),

        (Operator::Between, ConditionValue::Pair(a, b)) => {
            // Callers may pass endpoints in either order.
            let (low, high) = match a.natural_cmp(b) {
                Ordering::Greater => (b, a),
                Ordering::Less | Ordering::Equal => (a, b),
            };

            (
                range(
                    field,
                    RangeBounds {
                        gt: Some(low.clone()),
                        lt: Some(high.clone()),
                        ..RangeBounds::default()
                    },
                ),
                false,
            )
        }

        (Operator::StartsWith, ConditionValue::Scalar(value)) => (
            Clause::Prefix {
                field,
                value: value.to_string(),
            },
            false,
        ),
        (Operator::EndsWith, ConditionValue::Scalar(value)) => {
            warn!(
                field = %field,
                operator = "ENDS_WITH",
                "leading-wildcard clause compiles to an unindexed scan"
            );
            (
                Clause::Wildcard {
                    field,
                    pattern: format!("*{value}"),
                },
                false,
            )
        }
        (Operator::Contains, ConditionValue::Scalar(value)) => {
            warn!(
                field = %field,
                operator = "CONTAINS",
                "leading-wildcard clause compiles to an unindexed scan"
            );
            (
                Clause::Wildcard {
                    field,
                    pattern: format!("*{value}*"),
                },
                false,
            )
        }

        (operator, value) => {
            return Err(CompileError::InvalidCondition {
                operator,
                conjunction,
                expected: operator.expected_shape(),
                got: value.shape(),
            });
        }
    };

    match (conjunction, negated) {
        (Conjunction::And, false) => out.must.push(clause),
        (Conjunction::And, true) => out.must_not.push(clause),
        (Conjunction::Or, false) => out.should.push(clause),
        (Conjunction::Or, true) => out.should.push(BoolQuery::negating(clause).into_clause()),
    }

    Ok(())
}

fn term(field: String, value: &Value) -> Clause {
    Clause::Term {
        field,
        value: value.clone(),
    }
}

fn terms(field: String, values: &[Value]) -> Clause {
    Clause::Terms {
        field,
        values: values.to_vec(),
    }
}

fn range(field: String, bounds: RangeBounds) -> Clause {
    Clause::Range { field, bounds }
}
