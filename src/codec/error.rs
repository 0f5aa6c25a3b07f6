use crate::wire::{WireTag, WireValue};

use std::fmt;

/// Reason a wire value could not be read into a native value.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec, error::ReadError};
/// use dynamodb_codec::wire::{WireTag, WireValue};
///
/// let actual = codec::string().read(&WireValue::Bool(true));
/// assert_eq!(
///     actual,
///     Err(ReadError::NoPropertyOfType {
///         expected: WireTag::S,
///         actual: WireValue::Bool(true),
///     })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ReadError {
    /// The attribute is absent and its codec has no default.
    #[error("missing property")]
    MissingProperty,
    /// The wire value carries a different tag than the codec expects.
    #[error("expected {expected}, found {actual:?}")]
    NoPropertyOfType {
        /// Tag the codec expects.
        expected: WireTag,
        /// Value actually found.
        actual: WireValue,
    },
    /// The tag matched but the payload could not be converted.
    #[error("type coercion failed: {0}")]
    TypeCoercion(String),
    /// One or more fields of a record failed. Never empty.
    #[error("invalid properties: {}", Properties(.0))]
    InvalidProperties(Vec<(String, ReadError)>),
}

impl ReadError {
    pub(crate) fn no_property_of_type(expected: WireTag, actual: &WireValue) -> Self {
        Self::NoPropertyOfType {
            expected,
            actual: actual.clone(),
        }
    }

    /// Wrap the cause of a failed conversion.
    pub fn coercion(cause: impl fmt::Display) -> Self {
        Self::TypeCoercion(cause.to_string())
    }
}

struct Properties<'a>(&'a [(String, ReadError)]);

impl fmt::Display for Properties<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, error)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::missing(ReadError::MissingProperty, "missing property")]
    #[case::no_property_of_type(
        ReadError::NoPropertyOfType {
            expected: WireTag::N,
            actual: WireValue::Str(
                "a".to_string()
            ),
        },
        "expected N, found Str(\"a\")"
    )]
    #[case::invalid_properties(
        ReadError::InvalidProperties(
            vec![
                ("a".to_string(), ReadError::MissingProperty),
                ("b".to_string(), ReadError::TypeCoercion("bad".to_string())),
            ]
        ),
        "invalid properties: a: missing property, b: type coercion failed: bad"
    )]
    fn test_read_error_display(#[case] error: ReadError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
