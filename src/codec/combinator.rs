use crate::{
    codec::{Codec, error::ReadError},
    wire::WireValue,
};

use std::fmt;

/// Codec for a type in total, bidirectional correspondence with the inner
/// codec's type. Inherits the inner default.
#[derive(Clone)]
pub struct Iso<C, F, G> {
    inner: C,
    to: F,
    from: G,
}

impl<C, F, G, T> Codec for Iso<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> T,
    G: Fn(&T) -> C::Value,
{
    type Value = T;

    fn read(&self, value: &WireValue) -> Result<T, ReadError> {
        self.inner.read(value).map(&self.to)
    }

    fn write(&self, value: &T) -> WireValue {
        self.inner.write(&(self.from)(value))
    }

    fn default_value(&self) -> Option<T> {
        self.inner.default_value().map(&self.to)
    }
}

/// Wrap `inner` with a total mapping in both directions.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec};
/// use dynamodb_codec::wire::WireValue;
///
/// #[derive(Debug, PartialEq)]
/// struct UserId(String);
///
/// let codec = codec::iso(codec::string(), UserId, |id: &UserId| id.0.clone());
/// assert_eq!(codec.read(&WireValue::Str("u1".to_string())), Ok(UserId("u1".to_string())));
/// ```
pub fn iso<C, F, G, T>(inner: C, to: F, from: G) -> Iso<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> T,
    G: Fn(&T) -> C::Value,
{
    Iso { inner, to, from }
}

/// Codec whose read may fail after the inner read succeeds.
#[derive(Clone)]
pub struct XMap<C, F, G> {
    inner: C,
    to: F,
    from: G,
}

impl<C, F, G, T> Codec for XMap<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> Result<T, ReadError>,
    G: Fn(&T) -> C::Value,
{
    type Value = T;

    fn read(&self, value: &WireValue) -> Result<T, ReadError> {
        self.inner.read(value).and_then(&self.to)
    }

    fn write(&self, value: &T) -> WireValue {
        self.inner.write(&(self.from)(value))
    }
}

/// Wrap `inner` with a fallible read mapping and a total write mapping.
pub fn xmap<C, F, G, T>(inner: C, to: F, from: G) -> XMap<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> Result<T, ReadError>,
    G: Fn(&T) -> C::Value,
{
    XMap { inner, to, from }
}

/// Codec whose read goes through a native parse, any parse error becoming
/// [`ReadError::TypeCoercion`].
#[derive(Clone)]
pub struct CoercedXMap<C, F, G> {
    inner: C,
    to: F,
    from: G,
}

impl<C, F, G, T, E> Codec for CoercedXMap<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> Result<T, E>,
    E: fmt::Display,
    G: Fn(&T) -> C::Value,
{
    type Value = T;

    fn read(&self, value: &WireValue) -> Result<T, ReadError> {
        let value = self.inner.read(value)?;
        (self.to)(value).map_err(ReadError::coercion)
    }

    fn write(&self, value: &T) -> WireValue {
        self.inner.write(&(self.from)(value))
    }
}

/// Wrap `inner` with a native parse on read and a total mapping on write.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec};
/// use dynamodb_codec::wire::WireValue;
/// use std::net::Ipv4Addr;
///
/// let codec = codec::coerced_xmap(
///     codec::string(),
///     |text: String| text.parse::<Ipv4Addr>(),
///     |address: &Ipv4Addr| address.to_string(),
/// );
/// assert!(codec.read(&WireValue::Str("nope".to_string())).is_err());
/// ```
pub fn coerced_xmap<C, F, G, T, E>(inner: C, to: F, from: G) -> CoercedXMap<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> Result<T, E>,
    E: fmt::Display,
    G: Fn(&T) -> C::Value,
{
    CoercedXMap { inner, to, from }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{collection, primitive};

    use rstest::rstest;
    use std::collections;

    #[derive(Clone, Debug, PartialEq)]
    struct Tags(collections::HashSet<String>);

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Level {
        Low,
        High,
    }

    fn level(text: String) -> Result<Level, ReadError> {
        match text.as_str() {
            "low" => Ok(Level::Low),
            "high" => Ok(Level::High),
            other => Err(ReadError::coercion(format!("unknown level {other}"))),
        }
    }

    fn level_text(level: &Level) -> String {
        match level {
            Level::Low => "low".to_string(),
            Level::High => "high".to_string(),
        }
    }

    #[test]
    fn test_iso_inherits_default() {
        let codec = iso(collection::set::<String>(), Tags, |tags: &Tags| tags.0.clone());
        assert_eq!(codec.default_value(), Some(Tags(collections::HashSet::new())));
        assert_eq!(codec.write(&Tags(collections::HashSet::new())), WireValue::Null);
    }

    #[rstest]
    #[case::known(WireValue::Str("high".to_string()), Ok(Level::High))]
    #[case::unknown(
        WireValue::Str("medium".to_string()),
        Err(ReadError::TypeCoercion("unknown level medium".to_string()))
    )]
    #[case::wrong_tag(
        WireValue::Bool(true),
        Err(ReadError::NoPropertyOfType {
            expected: crate::wire::WireTag::S,
            actual: WireValue::Bool(true),
        })
    )]
    fn test_xmap_read(#[case] wire: WireValue, #[case] expected: Result<Level, ReadError>) {
        let codec = xmap(primitive::string(), level, level_text);
        assert_eq!(codec.read(&wire), expected);
        assert_eq!(codec.default_value(), None);
    }

    #[test]
    fn test_coerced_xmap_wraps_parse_error() {
        let codec = coerced_xmap(
            primitive::string(),
            |text: String| text.parse::<u32>(),
            |number: &u32| number.to_string(),
        );
        assert_eq!(codec.write(&7), WireValue::Str("7".to_string()));
        assert_eq!(codec.read(&WireValue::Str("7".to_string())), Ok(7));
        assert_eq!(
            codec.read(&WireValue::Str("x".to_string())),
            Err(ReadError::TypeCoercion(
                "invalid digit found in string".to_string()
            ))
        );
    }
}
