//! Shared expression plumbing.
//!
//! This module provides the attribute path model and the expression triple
//! (text, name placeholders, value placeholders) shared by conditions,
//! projections and update expressions.

/// Condition expression building for filters and conditional writes.
pub mod condition;

/// Attribute names and paths.
pub mod path;

/// Attribute selection for projection expressions.
pub mod selection;

use crate::wire::WireValue;

use indexmap::IndexMap;
use std::collections;

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// Rendered expression: its text plus the placeholder maps it refers to.
///
/// Name placeholders are keyed with their leading `#` and value placeholders
/// with their leading `:`, ready to hand to a request builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpressionInput {
    /// Expression text.
    pub expression: String,
    /// `#placeholder` to attribute name.
    pub expression_attribute_names: collections::HashMap<String, String>,
    /// `:placeholder` to value.
    pub expression_attribute_values: collections::HashMap<String, WireValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, WireValue>>,
    ) -> String {
        match names {
            Some(existing) => existing.extend(self.expression_attribute_names),
            None => *names = Some(self.expression_attribute_names),
        }
        if !self.expression_attribute_values.is_empty() {
            match values {
                Some(existing) => existing.extend(self.expression_attribute_values),
                None => *values = Some(self.expression_attribute_values),
            }
        }
        self.expression
    }
}

/// Numbered placeholders for one expression render.
///
/// Each distinct attribute name gets one name placeholder; every value gets
/// its own value placeholder.
#[derive(Debug)]
pub(crate) struct Placeholders {
    prefix: &'static str,
    names: IndexMap<String, String>,
    values: collections::HashMap<String, WireValue>,
}

impl Placeholders {
    pub(crate) fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            names: IndexMap::new(),
            values: collections::HashMap::new(),
        }
    }

    pub(crate) fn name(&mut self, name: &str) -> String {
        let prefix = self.prefix;
        let next = self.names.len();
        self.names
            .entry(name.to_string())
            .or_insert_with(|| format!("#{prefix}{next}"))
            .clone()
    }

    pub(crate) fn path(&mut self, path: &path::AttributeName) -> String {
        path.render(|_, name| self.name(name))
    }

    pub(crate) fn value(&mut self, value: WireValue) -> String {
        let placeholder = format!(":{}{}", self.prefix, self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    pub(crate) fn finish(self, expression: String) -> ExpressionInput {
        ExpressionInput {
            expression,
            expression_attribute_names: self
                .names
                .into_iter()
                .map(|(name, placeholder)| (placeholder, name))
                .collect(),
            expression_attribute_values: self.values,
        }
    }
}
