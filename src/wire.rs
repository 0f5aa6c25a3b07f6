use crate::error::{Error, Result};

use aws_sdk_dynamodb::{primitives::Blob, types};
use serde::{Deserialize, Serialize};
use std::{collections, fmt};

/// Attribute value as it travels on the wire.
///
/// Numbers are carried as decimal text so no precision is lost between the
/// native value and the store.
///
/// ```rust
/// use dynamodb_codec::wire::WireValue;
///
/// let value = WireValue::Num("42".to_string());
/// assert_eq!(value.tag().to_string(), "N");
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(from = "Repr", into = "Repr")]
pub enum WireValue {
    /// Text.
    Str(String),
    /// Number in decimal text form.
    Num(String),
    /// Boolean.
    Bool(bool),
    /// Explicit null.
    Null,
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Ordered, heterogeneous list.
    List(Vec<WireValue>),
    /// String-keyed map.
    Map(collections::HashMap<String, WireValue>),
    /// Set of numbers in decimal text form. Never empty on the wire.
    NumberSet(collections::BTreeSet<String>),
    /// Set of strings. Never empty on the wire.
    StringSet(collections::BTreeSet<String>),
}

/// Type tag of a [`WireValue`], rendered the way the store names it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WireTag {
    /// `S`
    S,
    /// `N`
    N,
    /// `BOOL`
    Bool,
    /// `NULL`
    Null,
    /// `B`
    B,
    /// `L`
    L,
    /// `M`
    M,
    /// `NS`
    Ns,
    /// `SS`
    Ss,
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::S => "S",
            Self::N => "N",
            Self::Bool => "BOOL",
            Self::Null => "NULL",
            Self::B => "B",
            Self::L => "L",
            Self::M => "M",
            Self::Ns => "NS",
            Self::Ss => "SS",
        };
        f.write_str(tag)
    }
}

impl WireValue {
    /// The type tag of this value.
    pub fn tag(&self) -> WireTag {
        match self {
            Self::Str(_) => WireTag::S,
            Self::Num(_) => WireTag::N,
            Self::Bool(_) => WireTag::Bool,
            Self::Null => WireTag::Null,
            Self::Bytes(_) => WireTag::B,
            Self::List(_) => WireTag::L,
            Self::Map(_) => WireTag::M,
            Self::NumberSet(_) => WireTag::Ns,
            Self::StringSet(_) => WireTag::Ss,
        }
    }

    /// Whether this is the explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<WireValue> for types::AttributeValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Str(text) => Self::S(text),
            WireValue::Num(number) => Self::N(number),
            WireValue::Bool(flag) => Self::Bool(flag),
            WireValue::Null => Self::Null(true),
            WireValue::Bytes(bytes) => Self::B(Blob::new(bytes)),
            WireValue::List(items) => Self::L(items.into_iter().map(Into::into).collect()),
            WireValue::Map(fields) => Self::M(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, value.into()))
                    .collect(),
            ),
            WireValue::NumberSet(numbers) => Self::Ns(numbers.into_iter().collect()),
            WireValue::StringSet(strings) => Self::Ss(strings.into_iter().collect()),
        }
    }
}

impl TryFrom<types::AttributeValue> for WireValue {
    type Error = Error;

    fn try_from(value: types::AttributeValue) -> Result<Self> {
        let value = match value {
            types::AttributeValue::S(text) => Self::Str(text),
            types::AttributeValue::N(number) => Self::Num(number),
            types::AttributeValue::Bool(flag) => Self::Bool(flag),
            types::AttributeValue::Null(_) => Self::Null,
            types::AttributeValue::B(blob) => Self::Bytes(blob.into_inner()),
            types::AttributeValue::L(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_>>()?,
            ),
            types::AttributeValue::M(fields) => Self::Map(from_attribute_map(fields)?),
            types::AttributeValue::Ns(numbers) => Self::NumberSet(numbers.into_iter().collect()),
            types::AttributeValue::Ss(strings) => Self::StringSet(strings.into_iter().collect()),
            types::AttributeValue::Bs(_) => {
                return Err(Error::UnsupportedAttribute("BS".to_string()));
            }
            other => return Err(Error::UnsupportedAttribute(format!("{other:?}"))),
        };
        Ok(value)
    }
}

/// Convert an item as returned by the SDK into wire fields.
pub fn from_attribute_map(
    item: collections::HashMap<String, types::AttributeValue>,
) -> Result<collections::HashMap<String, WireValue>> {
    let mut fields = collections::HashMap::with_capacity(item.len());
    for (name, value) in item {
        fields.insert(name, value.try_into()?);
    }
    Ok(fields)
}

/// Convert wire fields into the map shape the SDK expects.
pub fn into_attribute_map(
    fields: collections::HashMap<String, WireValue>,
) -> collections::HashMap<String, types::AttributeValue> {
    fields
        .into_iter()
        .map(|(name, value)| (name, value.into()))
        .collect()
}

/// DynamoDB JSON shape, e.g. `{"S": "text"}` or `{"NULL": true}`.
#[derive(Clone, Deserialize, Serialize)]
enum Repr {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "B")]
    B(#[serde(with = "base64_bytes")] Vec<u8>),
    #[serde(rename = "L")]
    L(Vec<WireValue>),
    #[serde(rename = "M")]
    M(collections::HashMap<String, WireValue>),
    #[serde(rename = "NS")]
    Ns(collections::BTreeSet<String>),
    #[serde(rename = "SS")]
    Ss(collections::BTreeSet<String>),
}

impl From<Repr> for WireValue {
    fn from(repr: Repr) -> Self {
        match repr {
            Repr::S(text) => Self::Str(text),
            Repr::N(number) => Self::Num(number),
            Repr::Bool(flag) => Self::Bool(flag),
            Repr::Null(_) => Self::Null,
            Repr::B(bytes) => Self::Bytes(bytes),
            Repr::L(items) => Self::List(items),
            Repr::M(fields) => Self::Map(fields),
            Repr::Ns(numbers) => Self::NumberSet(numbers),
            Repr::Ss(strings) => Self::StringSet(strings),
        }
    }
}

impl From<WireValue> for Repr {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Str(text) => Self::S(text),
            WireValue::Num(number) => Self::N(number),
            WireValue::Bool(flag) => Self::Bool(flag),
            WireValue::Null => Self::Null(true),
            WireValue::Bytes(bytes) => Self::B(bytes),
            WireValue::List(items) => Self::L(items),
            WireValue::Map(fields) => Self::M(fields),
            WireValue::NumberSet(numbers) => Self::Ns(numbers),
            WireValue::StringSet(strings) => Self::Ss(strings),
        }
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(de::Error::custom)
    }
}
