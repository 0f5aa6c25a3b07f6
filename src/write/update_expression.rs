use crate::{
    codec::Codec,
    common::{self, path::AttributeName},
    wire::WireValue,
};

use std::{collections, ops};

/// Key prefix applied to the left side of a merge.
const LEFT_PREFIX: &str = "l_";
/// Key prefix applied to the right side of a merge.
const RIGHT_PREFIX: &str = "r_";
/// Value placeholder of the empty list used when appending to an absent list.
const EMPTY_LIST: &str = "emptyList";

/// Clause an update leaf belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum UpdateType {
    /// `SET`
    Set,
    /// `ADD`
    Add,
    /// `DELETE`
    Delete,
    /// `REMOVE`
    Remove,
}

impl ops::Deref for UpdateType {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Set => "SET",
            Self::Add => "ADD",
            Self::Delete => "DELETE",
            Self::Remove => "REMOVE",
        }
    }
}

/// Mutation performed by a leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateAction {
    /// Assign a value.
    Set,
    /// Append one element to a list, creating the list when absent.
    Append,
    /// Prepend one element to a list, creating the list when absent.
    Prepend,
    /// Append several elements to a list, creating the list when absent.
    AppendAll,
    /// Prepend several elements to a list, creating the list when absent.
    PrependAll,
    /// Assign a value only if the attribute doesn't exist.
    SetIfNotExists,
    /// Add to a number or a set.
    Add,
    /// Delete elements from a set.
    Delete,
    /// Remove the attribute.
    Remove,
    /// Copy the value of another attribute.
    SetFromAttribute(AttributeName),
}

impl UpdateAction {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Set => "updateSet",
            Self::Append => "updateAppend",
            Self::Prepend => "updatePrepend",
            Self::AppendAll => "updateAppendAll",
            Self::PrependAll => "updatePrependAll",
            Self::SetIfNotExists => "updateSetIfNotExists",
            Self::Add => "updateAdd",
            Self::Delete => "updateDelete",
            Self::Remove => "updateRemove",
            Self::SetFromAttribute(_) => "updateSetFromAttribute",
        }
    }

    fn update_type(&self) -> UpdateType {
        match self {
            Self::Add => UpdateType::Add,
            Self::Delete => UpdateType::Delete,
            Self::Remove => UpdateType::Remove,
            _ => UpdateType::Set,
        }
    }

    fn has_list_fallback(&self) -> bool {
        matches!(
            self,
            Self::Append | Self::Prepend | Self::AppendAll | Self::PrependAll
        )
    }
}

/// Single mutation of one attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafUpdate {
    /// What the leaf does.
    pub action: UpdateAction,
    /// Attribute it targets.
    pub name: AttributeName,
    /// Encoded operand, absent for `REMOVE` and attribute copies.
    pub value: Option<WireValue>,
}

impl LeafUpdate {
    /// Clause this leaf renders into.
    pub fn update_type(&self) -> UpdateType {
        self.action.update_type()
    }

    /// Render with every placeholder key prefixed by `scope`.
    fn get_update_expression(&self, scope: &str) -> common::ExpressionInput {
        let prefix = format!("{scope}{}", self.action.prefix());
        let mut expression_attribute_names = collections::HashMap::new();
        let path = self.name.render(|position, name| {
            let placeholder = format!("#{prefix}_{position}");
            expression_attribute_names.insert(placeholder.clone(), name.to_string());
            placeholder
        });
        let value = format!(":{prefix}");
        let fallback = format!(":{scope}{EMPTY_LIST}");
        let expression = match &self.action {
            UpdateAction::Set => format!("{path} = {value}"),
            UpdateAction::Append | UpdateAction::AppendAll => {
                format!("{path} = list_append(if_not_exists({path}, {fallback}), {value})")
            }
            UpdateAction::Prepend | UpdateAction::PrependAll => {
                format!("{path} = list_append({value}, if_not_exists({path}, {fallback}))")
            }
            UpdateAction::SetIfNotExists => format!("{path} = if_not_exists({path}, {value})"),
            UpdateAction::Add | UpdateAction::Delete => format!("{path} {value}"),
            UpdateAction::Remove => path,
            UpdateAction::SetFromAttribute(source) => {
                let source = source.render(|position, name| {
                    let placeholder = format!("#{prefix}_from_{position}");
                    expression_attribute_names.insert(placeholder.clone(), name.to_string());
                    placeholder
                });
                format!("{path} = {source}")
            }
        };
        let mut expression_attribute_values = collections::HashMap::new();
        if let Some(operand) = &self.value {
            expression_attribute_values.insert(value, operand.clone());
        }
        if self.action.has_list_fallback() {
            expression_attribute_values.insert(fallback, WireValue::List(Vec::new()));
        }
        common::ExpressionInput {
            expression,
            expression_attribute_names,
            expression_attribute_values,
        }
    }
}

/// Update expression: one leaf mutation or the merge of two expressions.
///
/// Fragments are built independently and combined with [`UpdateExpression::and`].
/// Merging prefixes every placeholder key of the left side with `l_` and of the
/// right side with `r_`, at every level, so fragments touching the same
/// attribute never share a placeholder.
///
/// ```rust
/// use dynamodb_codec::codec;
/// use dynamodb_codec::write::update_expression::UpdateExpression;
///
/// let update = UpdateExpression::set("name", &codec::string(), &"Jane".to_string())
///     .and(UpdateExpression::add("age", &codec::number::<i32>(), &1))
///     .and(UpdateExpression::remove("nickname"));
/// assert_eq!(
///     update.expression(),
///     "SET #l_l_updateSet_0 = :l_l_updateSet ADD #l_r_updateAdd_0 :l_r_updateAdd REMOVE #r_updateRemove_0"
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateExpression {
    /// Single mutation.
    Leaf(LeafUpdate),
    /// Both sides applied in one request.
    And(Box<UpdateExpression>, Box<UpdateExpression>),
}

impl UpdateExpression {
    fn leaf(action: UpdateAction, name: impl Into<AttributeName>, value: Option<WireValue>) -> Self {
        Self::Leaf(LeafUpdate {
            action,
            name: name.into(),
            value,
        })
    }

    /// Assign `value`.
    pub fn set<C: Codec>(name: impl Into<AttributeName>, codec: &C, value: &C::Value) -> Self {
        Self::leaf(UpdateAction::Set, name, Some(codec.write(value)))
    }

    /// Assign `value` unless the attribute already exists.
    pub fn set_if_not_exists<C: Codec>(
        name: impl Into<AttributeName>,
        codec: &C,
        value: &C::Value,
    ) -> Self {
        Self::leaf(UpdateAction::SetIfNotExists, name, Some(codec.write(value)))
    }

    /// Copy the attribute `from` into `to`.
    pub fn set_from_attribute(from: impl Into<AttributeName>, to: impl Into<AttributeName>) -> Self {
        Self::leaf(UpdateAction::SetFromAttribute(from.into()), to, None)
    }

    /// Append `value` to a list, creating the list if absent.
    pub fn append<C: Codec>(name: impl Into<AttributeName>, codec: &C, value: &C::Value) -> Self {
        let values = WireValue::List(vec![codec.write(value)]);
        Self::leaf(UpdateAction::Append, name, Some(values))
    }

    /// Prepend `value` to a list, creating the list if absent.
    pub fn prepend<C: Codec>(name: impl Into<AttributeName>, codec: &C, value: &C::Value) -> Self {
        let values = WireValue::List(vec![codec.write(value)]);
        Self::leaf(UpdateAction::Prepend, name, Some(values))
    }

    /// Append every element of `values`, creating the list if absent.
    pub fn append_all<C: Codec>(
        name: impl Into<AttributeName>,
        codec: &C,
        values: &[C::Value],
    ) -> Self {
        let values = WireValue::List(values.iter().map(|value| codec.write(value)).collect());
        Self::leaf(UpdateAction::AppendAll, name, Some(values))
    }

    /// Prepend every element of `values`, creating the list if absent.
    pub fn prepend_all<C: Codec>(
        name: impl Into<AttributeName>,
        codec: &C,
        values: &[C::Value],
    ) -> Self {
        let values = WireValue::List(values.iter().map(|value| codec.write(value)).collect());
        Self::leaf(UpdateAction::PrependAll, name, Some(values))
    }

    /// Add `value` to a number or a set.
    pub fn add<C: Codec>(name: impl Into<AttributeName>, codec: &C, value: &C::Value) -> Self {
        Self::leaf(UpdateAction::Add, name, Some(codec.write(value)))
    }

    /// Delete the elements of `value` from a set.
    pub fn delete<C: Codec>(name: impl Into<AttributeName>, codec: &C, value: &C::Value) -> Self {
        Self::leaf(UpdateAction::Delete, name, Some(codec.write(value)))
    }

    /// Remove the attribute.
    pub fn remove(name: impl Into<AttributeName>) -> Self {
        Self::leaf(UpdateAction::Remove, name, None)
    }

    /// Apply `self` and `other` in one request.
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Merge many expressions left to right. `None` when there are none.
    pub fn all(expressions: impl IntoIterator<Item = Self>) -> Option<Self> {
        expressions.into_iter().reduce(Self::and)
    }

    fn collect_leaves<'a>(&'a self, scope: String, leaves: &mut Vec<(String, &'a LeafUpdate)>) {
        match self {
            Self::Leaf(leaf) => leaves.push((scope, leaf)),
            Self::And(left, right) => {
                left.collect_leaves(format!("{scope}{LEFT_PREFIX}"), leaves);
                right.collect_leaves(format!("{scope}{RIGHT_PREFIX}"), leaves);
            }
        }
    }

    /// Render into expression text and placeholder maps.
    ///
    /// Leaves are grouped by clause in `SET`, `ADD`, `DELETE`, `REMOVE` order,
    /// each clause listing its leaves left to right.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_codec.update_expression.render", skip_all)
    )]
    pub fn render(&self) -> common::ExpressionInput {
        let mut leaves = Vec::new();
        self.collect_leaves(String::new(), &mut leaves);
        let mut clauses: collections::BTreeMap<UpdateType, Vec<common::ExpressionInput>> =
            collections::BTreeMap::new();
        for (scope, leaf) in leaves {
            clauses
                .entry(leaf.update_type())
                .or_default()
                .push(leaf.get_update_expression(&scope));
        }
        let clauses = clauses
            .into_iter()
            .map(|(update_type, operations)| {
                let mut clause = common::ExpressionInput::merge(", ", operations);
                clause.expression = format!("{} {}", &*update_type, clause.expression);
                clause
            })
            .collect();
        common::ExpressionInput::merge(" ", clauses)
    }

    /// The update expression text.
    pub fn expression(&self) -> String {
        self.render().expression
    }

    /// Name placeholders used by [`UpdateExpression::expression`].
    pub fn attribute_names(&self) -> collections::HashMap<String, String> {
        self.render().expression_attribute_names
    }

    /// Value placeholders used by [`UpdateExpression::expression`].
    pub fn attribute_values(&self) -> collections::HashMap<String, WireValue> {
        self.render().expression_attribute_values
    }
}

impl From<UpdateExpression> for common::ExpressionInput {
    fn from(update_expression: UpdateExpression) -> Self {
        update_expression.render()
    }
}
