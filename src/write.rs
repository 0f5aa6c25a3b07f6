//! Encoding items and building write expressions.

/// Update and condition expressions combined for one write request.
pub mod common;

/// Update expression algebra.
pub mod update_expression;

use crate::{
    codec::Codec,
    error::{Error, Result},
    wire::{self, WireValue},
};

use aws_sdk_dynamodb::types;
use std::collections;

/// Encode a value as an item.
///
/// Fails with [`Error::NotAnItem`] if the codec doesn't produce a map.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_codec::{codec, write};
/// use std::collections::HashMap;
///
/// let item = write::encode_item(&codec::map(codec::boolean()), &HashMap::from([("a".to_string(), true)])).unwrap();
/// assert_eq!(item, HashMap::from([("a".to_string(), AttributeValue::Bool(true))]));
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "dynamodb_codec.encode_item", skip_all, err)
)]
pub fn encode_item<C: Codec>(
    codec: &C,
    value: &C::Value,
) -> Result<collections::HashMap<String, types::AttributeValue>> {
    match codec.write(value) {
        WireValue::Map(fields) => Ok(wire::into_attribute_map(fields)),
        other => Err(Error::NotAnItem(other.tag())),
    }
}
