use crate::{
    codec::Codec,
    common::{self, path::AttributeName},
    wire::WireValue,
};

use std::ops;

/// Prefix of the placeholders a condition renders.
const CONDITION_PREFIX: &str = "cond";

/// Logical operator for combining conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogicalOperator {
    /// Logical AND - all conditions must be true.
    And,
    /// Logical OR - at least one condition must be true.
    Or,
}

impl ops::Deref for LogicalOperator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Test applied to one attribute.
///
/// ```rust
/// use dynamodb_codec::common::condition::Condition;
/// use dynamodb_codec::wire::WireValue;
///
/// let eq = Condition::Equals(WireValue::Str("value".to_string()));
/// let exists = Condition::NotNull;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Checks if an attribute begins with a specified prefix (string types only).
    BeginsWith(String),
    /// Checks if an attribute value is between two values (inclusive).
    Between(WireValue, WireValue),
    /// Checks if an attribute contains a specified value.
    Contains(WireValue),
    /// Checks if an attribute value equals a specified value.
    Equals(WireValue),
    /// Checks if an attribute value is greater than a specified value.
    GreaterThan(WireValue),
    /// Checks if an attribute value is greater than or equal to a specified value.
    GreaterThanOrEqual(WireValue),
    /// Checks if an attribute value is in a list of specified values.
    In(Vec<WireValue>),
    /// Checks if an attribute value is less than a specified value.
    LessThan(WireValue),
    /// Checks if an attribute value is less than or equal to a specified value.
    LessThanOrEqual(WireValue),
    /// Checks if an attribute does not contain a specified value.
    NotContains(WireValue),
    /// Checks if an attribute value does not equal a specified value.
    NotEqual(WireValue),
    /// Checks if an attribute exists.
    NotNull,
    /// Checks if an attribute does not exist.
    Null,
}

impl Condition {
    /// Equality against a value encoded with `codec`.
    pub fn equals<C: Codec>(codec: &C, value: &C::Value) -> Self {
        Self::Equals(codec.write(value))
    }

    fn get_expression(&self, path: &str, placeholders: &mut common::Placeholders) -> String {
        match self {
            Self::BeginsWith(prefix) => {
                let value = placeholders.value(WireValue::Str(prefix.clone()));
                format!("begins_with({path}, {value})")
            }
            Self::Between(low, high) => {
                let low = placeholders.value(low.clone());
                let high = placeholders.value(high.clone());
                format!("{path} BETWEEN {low} AND {high}")
            }
            Self::Contains(value) => {
                let value = placeholders.value(value.clone());
                format!("contains({path}, {value})")
            }
            Self::Equals(value) => comparison(path, "=", value, placeholders),
            Self::GreaterThan(value) => comparison(path, ">", value, placeholders),
            Self::GreaterThanOrEqual(value) => comparison(path, ">=", value, placeholders),
            Self::In(values) => {
                let values: Vec<_> = values
                    .iter()
                    .map(|value| placeholders.value(value.clone()))
                    .collect();
                format!("{path} IN ({})", values.join(", "))
            }
            Self::LessThan(value) => comparison(path, "<", value, placeholders),
            Self::LessThanOrEqual(value) => comparison(path, "<=", value, placeholders),
            Self::NotContains(value) => {
                let value = placeholders.value(value.clone());
                format!("NOT contains({path}, {value})")
            }
            Self::NotEqual(value) => comparison(path, "<>", value, placeholders),
            Self::NotNull => format!("attribute_exists({path})"),
            Self::Null => format!("attribute_not_exists({path})"),
        }
    }
}

fn comparison(
    path: &str,
    operator: &str,
    value: &WireValue,
    placeholders: &mut common::Placeholders,
) -> String {
    let value = placeholders.value(value.clone());
    format!("{path} {operator} {value}")
}

/// Condition applied to an attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition {
    /// The condition to apply to the attribute.
    pub condition: Condition,
    /// The attribute to apply the condition to.
    pub name: AttributeName,
}

/// Tree of attribute conditions joined by logical operators.
///
/// ```rust
/// use dynamodb_codec::common::condition::{Condition, ConditionExpression};
/// use dynamodb_codec::wire::WireValue;
///
/// let expression = ConditionExpression::on("status", Condition::Equals(WireValue::Str("active".to_string())))
///     .and(ConditionExpression::on("deleted", Condition::Null));
/// let rendered = expression.render();
/// assert_eq!(rendered.expression, "#cond0 = :cond0 AND attribute_not_exists(#cond1)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionExpression {
    /// A single attribute condition.
    Leaf(KeyCondition),
    /// Two expressions joined by an operator.
    Logical(LogicalOperator, Box<ConditionExpression>, Box<ConditionExpression>),
    /// Negation.
    Not(Box<ConditionExpression>),
}

impl ConditionExpression {
    /// Condition on one attribute.
    pub fn on(name: impl Into<AttributeName>, condition: Condition) -> Self {
        Self::Leaf(KeyCondition {
            condition,
            name: name.into(),
        })
    }

    /// Both must hold.
    pub fn and(self, other: Self) -> Self {
        Self::Logical(LogicalOperator::And, Box::new(self), Box::new(other))
    }

    /// Either must hold.
    pub fn or(self, other: Self) -> Self {
        Self::Logical(LogicalOperator::Or, Box::new(self), Box::new(other))
    }

    /// Negate.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    fn is_composite(&self) -> bool {
        matches!(self, Self::Logical(..))
    }

    /// Render into expression text and placeholder maps.
    pub fn render(&self) -> common::ExpressionInput {
        let mut placeholders = common::Placeholders::new(CONDITION_PREFIX);
        let expression = self.get_expression_recursive(&mut placeholders);
        placeholders.finish(expression)
    }

    fn get_expression_recursive(&self, placeholders: &mut common::Placeholders) -> String {
        match self {
            Self::Leaf(key_condition) => {
                let path = placeholders.path(&key_condition.name);
                key_condition.condition.get_expression(&path, placeholders)
            }
            Self::Logical(operator, left, right) => {
                let left = left.get_child_expression(placeholders);
                let right = right.get_child_expression(placeholders);
                format!("{left}{}{right}", &**operator)
            }
            Self::Not(inner) => {
                let inner = inner.get_expression_recursive(placeholders);
                format!("NOT ({inner})")
            }
        }
    }

    fn get_child_expression(&self, placeholders: &mut common::Placeholders) -> String {
        let expression = self.get_expression_recursive(placeholders);
        if self.is_composite() {
            format!("({expression})")
        } else {
            expression
        }
    }
}

impl From<ConditionExpression> for common::ExpressionInput {
    fn from(condition: ConditionExpression) -> Self {
        condition.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    use rstest::rstest;
    use std::collections;

    fn number(value: &str) -> WireValue {
        WireValue::Num(value.to_string())
    }

    #[rstest]
    #[case::equals(
        ConditionExpression::on(
            "a",
            Condition::Equals(
                number("1")
            )
        ),
        "#cond0 = :cond0",
        vec![("#cond0", "a")],
        vec![(":cond0", number("1"))]
    )]
    #[case::between(
        ConditionExpression::on(
            "a",
            Condition::Between(
                number("1"),
                number("5")
            )
        ),
        "#cond0 BETWEEN :cond0 AND :cond1",
        vec![("#cond0", "a")],
        vec![(":cond0", number("1")), (":cond1", number("5"))]
    )]
    #[case::in_list(
        ConditionExpression::on(
            "a",
            Condition::In(
                vec![
                    number("1"),
                    number("2"),
                ]
            )
        ),
        "#cond0 IN (:cond0, :cond1)",
        vec![("#cond0", "a")],
        vec![(":cond0", number("1")), (":cond1", number("2"))]
    )]
    #[case::begins_with(
        ConditionExpression::on(
            "a",
            Condition::BeginsWith(
                "pre".to_string()
            )
        ),
        "begins_with(#cond0, :cond0)",
        vec![("#cond0", "a")],
        vec![(":cond0", WireValue::Str("pre".to_string()))]
    )]
    #[case::not_contains(
        ConditionExpression::on(
            "a",
            Condition::NotContains(
                number("1")
            )
        ),
        "NOT contains(#cond0, :cond0)",
        vec![("#cond0", "a")],
        vec![(":cond0", number("1"))]
    )]
    #[case::nested_path(
        ConditionExpression::on(
            "middle.list[1]".parse::<AttributeName>().unwrap(),
            Condition::NotNull
        ),
        "attribute_exists(#cond0.#cond1[1])",
        vec![("#cond0", "middle"), ("#cond1", "list")],
        vec![]
    )]
    #[case::and_reuses_names(
        ConditionExpression::on(
            "a",
            Condition::GreaterThan(
                number("1")
            )
        ).and(
            ConditionExpression::on(
                "a",
                Condition::LessThanOrEqual(
                    number("9")
                )
            )
        ),
        "#cond0 > :cond0 AND #cond0 <= :cond1",
        vec![("#cond0", "a")],
        vec![(":cond0", number("1")), (":cond1", number("9"))]
    )]
    #[case::composite_children_parenthesised(
        ConditionExpression::on(
            "a",
            Condition::Null
        ).or(
            ConditionExpression::on(
                "b",
                Condition::NotEqual(
                    number("1")
                )
            ).and(
                ConditionExpression::on(
                    "c",
                    Condition::NotNull
                )
            )
        ),
        "attribute_not_exists(#cond0) OR (#cond1 <> :cond0 AND attribute_exists(#cond2))",
        vec![("#cond0", "a"), ("#cond1", "b"), ("#cond2", "c")],
        vec![(":cond0", number("1"))]
    )]
    #[case::not(
        ConditionExpression::on(
            "a",
            Condition::Contains(
                number("1")
            )
        ).not(),
        "NOT (contains(#cond0, :cond0))",
        vec![("#cond0", "a")],
        vec![(":cond0", number("1"))]
    )]
    fn test_condition_expression_render(
        #[case] condition: ConditionExpression,
        #[case] expression: &str,
        #[case] names: Vec<(&str, &str)>,
        #[case] values: Vec<(&str, WireValue)>,
    ) {
        let expected = common::ExpressionInput {
            expression: expression.to_string(),
            expression_attribute_names: names
                .into_iter()
                .map(|(placeholder, name)| (placeholder.to_string(), name.to_string()))
                .collect(),
            expression_attribute_values: values
                .into_iter()
                .map(|(placeholder, value)| (placeholder.to_string(), value))
                .collect::<collections::HashMap<_, _>>(),
        };
        let actual: common::ExpressionInput = condition.into();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_equals_uses_codec() {
        let condition = Condition::equals(&codec::number::<u32>(), &7);
        assert_eq!(condition, Condition::Equals(number("7")));
    }
}
