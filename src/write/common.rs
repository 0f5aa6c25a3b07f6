use crate::{common, wire::WireValue, write::update_expression::UpdateExpression};

use aws_sdk_dynamodb::types;
use std::collections;

/// Request parameters rendered from [`WriteArgs`], in SDK types.
///
/// Update and condition placeholders share one name map and one value map.
/// Their key families never overlap, so merging never overwrites.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteInput {
    /// Rendered update expression.
    pub update_expression: Option<String>,
    /// Rendered condition expression.
    pub condition_expression: Option<String>,
    /// Name placeholders of both expressions.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Value placeholders of both expressions.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
}

/// Update and condition applied by one write request.
///
/// ```rust
/// use dynamodb_codec::codec;
/// use dynamodb_codec::common::condition::{Condition, ConditionExpression};
/// use dynamodb_codec::write::{common::{WriteArgs, WriteInput}, update_expression::UpdateExpression};
///
/// let write_args = WriteArgs {
///     update: Some(UpdateExpression::add("visits", &codec::number::<u64>(), &1)),
///     condition: Some(ConditionExpression::on("id", Condition::NotNull)),
/// };
/// let write_input = WriteInput::from(write_args);
/// assert_eq!(write_input.update_expression.as_deref(), Some("ADD #updateAdd_0 :updateAdd"));
/// assert_eq!(write_input.condition_expression.as_deref(), Some("attribute_exists(#cond0)"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// Mutations to apply.
    pub update: Option<UpdateExpression>,
    /// Condition that must hold for the write to succeed.
    pub condition: Option<common::condition::ConditionExpression>,
}

impl From<WriteArgs> for WriteInput {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_codec.write_input", skip_all)
    )]
    fn from(write_args: WriteArgs) -> Self {
        let mut expression_attribute_names = None;
        let mut expression_attribute_values: Option<collections::HashMap<String, WireValue>> = None;
        let update_expression = write_args.update.map(|update| {
            common::ExpressionInput::from(update).merge_into(
                &mut expression_attribute_names,
                &mut expression_attribute_values,
            )
        });
        let condition_expression = write_args.condition.map(|condition| {
            common::ExpressionInput::from(condition).merge_into(
                &mut expression_attribute_names,
                &mut expression_attribute_values,
            )
        });
        Self {
            update_expression,
            condition_expression,
            expression_attribute_names,
            expression_attribute_values: expression_attribute_values.map(|values| {
                values
                    .into_iter()
                    .map(|(placeholder, value)| (placeholder, value.into()))
                    .collect()
            }),
        }
    }
}

/// Apply a [`WriteInput`] to an update item builder.
#[macro_export]
macro_rules! apply_write_input {
    ($builder:expr, $write_input:expr) => {{
        let write_input: $crate::write::common::WriteInput = $write_input;
        $builder
            .set_update_expression(write_input.update_expression)
            .set_condition_expression(write_input.condition_expression)
            .set_expression_attribute_names(write_input.expression_attribute_names)
            .set_expression_attribute_values(write_input.expression_attribute_values)
    }};
}

/// Apply the condition part of a [`WriteInput`] to a put or delete item builder.
#[macro_export]
macro_rules! apply_condition_input {
    ($builder:expr, $write_input:expr) => {{
        let write_input: $crate::write::common::WriteInput = $write_input;
        $builder
            .set_condition_expression(write_input.condition_expression)
            .set_expression_attribute_names(write_input.expression_attribute_names)
            .set_expression_attribute_values(write_input.expression_attribute_values)
    }};
}
