//! Decoding items returned by the SDK.
//!
//! An item is the attribute map of one record. It is decoded by reading the
//! whole map as a [`WireValue::Map`] with the record's codec.

use crate::{
    codec::Codec,
    error::Result,
    wire::{self, WireValue},
};

use aws_sdk_dynamodb::types;
use std::collections;

/// Decode one item.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_codec::{codec, read};
/// use std::collections::HashMap;
///
/// let item = HashMap::from([("a".to_string(), AttributeValue::N("1".to_string()))]);
/// let decoded = read::decode_item(&codec::map(codec::number::<u8>()), item).unwrap();
/// assert_eq!(decoded, HashMap::from([("a".to_string(), 1)]));
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "dynamodb_codec.decode_item", skip_all, err)
)]
pub fn decode_item<C: Codec>(
    codec: &C,
    item: collections::HashMap<String, types::AttributeValue>,
) -> Result<C::Value> {
    let fields = wire::from_attribute_map(item)?;
    let value = codec.read(&WireValue::Map(fields))?;
    Ok(value)
}

/// Decode every item, failing on the first that doesn't decode.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "dynamodb_codec.decode_items", skip_all, err)
)]
pub fn decode_items<C: Codec>(
    codec: &C,
    items: impl IntoIterator<Item = collections::HashMap<String, types::AttributeValue>>,
) -> Result<Vec<C::Value>> {
    items
        .into_iter()
        .map(|item| decode_item(codec, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec, codec::error::ReadError, error::Error};

    use rstest::rstest;

    fn item(fields: &[(&str, types::AttributeValue)]) -> collections::HashMap<String, types::AttributeValue> {
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[rstest]
    #[case::single(
        vec![
            item(&[("a", types::AttributeValue::N("1".to_string()))]),
        ],
        vec![
            collections::HashMap::from([("a".to_string(), 1)]),
        ]
    )]
    #[case::many(
        vec![
            item(&[("a", types::AttributeValue::N("1".to_string()))]),
            item(&[]),
        ],
        vec![
            collections::HashMap::from([("a".to_string(), 1)]),
            collections::HashMap::new(),
        ]
    )]
    fn test_decode_items(
        #[case] items: Vec<collections::HashMap<String, types::AttributeValue>>,
        #[case] expected: Vec<collections::HashMap<String, i32>>,
    ) {
        let actual = decode_items(&codec::map(codec::number::<i32>()), items).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_decode_item_unsupported_attribute() {
        let item = item(&[("a", types::AttributeValue::Bs(vec![]))]);
        let actual = decode_item(&codec::map(codec::string()), item);
        assert!(matches!(actual, Err(Error::UnsupportedAttribute(name)) if name == "BS"));
    }

    #[test]
    fn test_decode_item_read_error() {
        let item = item(&[("a", types::AttributeValue::Bool(true))]);
        let actual = decode_item(&codec::map(codec::string()), item);
        assert!(matches!(
            actual,
            Err(Error::Read(ReadError::NoPropertyOfType { .. }))
        ));
    }
}
