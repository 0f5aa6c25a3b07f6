//! Bidirectional conversion between native values and [`WireValue`]s.
//!
//! A [`Codec`] is a plain value: primitive codecs are leaves, and the
//! constructors in [`collection`] and [`combinator`] compose them into codecs
//! for collections and custom types. Records and tagged unions get their codec
//! from [`record_codec!`](crate::record_codec) and [`union_codec!`](crate::union_codec).
//!
//! ```rust
//! use dynamodb_codec::codec::{self, Codec};
//! use dynamodb_codec::wire::WireValue;
//!
//! let codec = codec::option(codec::number::<i64>());
//! assert_eq!(codec.write(&Some(7)), WireValue::Num("7".to_string()));
//! assert_eq!(codec.read(&WireValue::Null), Ok(None));
//! ```

/// Composite codecs for sequences, sets, maps and optional values.
pub mod collection;

/// Codecs derived from another codec through conversion functions.
pub mod combinator;

/// Read failures.
pub mod error;

/// Leaf codecs for scalar kinds.
pub mod primitive;

/// Structural derivation for records with named fields.
pub mod record;

/// Structural derivation for tagged unions.
pub mod union;

pub use collection::{array, float_set, list, map, option, seq, set};
pub use combinator::{coerced_xmap, iso, xmap};
pub use primitive::{boolean, bytes, number, string, uuid};

use crate::wire::WireValue;

use error::ReadError;

/// Paired read and write conversion for one native type.
///
/// `write` is total. `read` reports every failure as a [`ReadError`].
pub trait Codec {
    /// The native type this codec converts.
    type Value;

    /// Decode a wire value.
    fn read(&self, value: &WireValue) -> Result<Self::Value, ReadError>;

    /// Encode a native value.
    fn write(&self, value: &Self::Value) -> WireValue;

    /// Value to use when the attribute is absent from a record.
    fn default_value(&self) -> Option<Self::Value> {
        None
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    type Value = C::Value;

    fn read(&self, value: &WireValue) -> Result<Self::Value, ReadError> {
        (**self).read(value)
    }

    fn write(&self, value: &Self::Value) -> WireValue {
        (**self).write(value)
    }

    fn default_value(&self) -> Option<Self::Value> {
        (**self).default_value()
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    type Value = C::Value;

    fn read(&self, value: &WireValue) -> Result<Self::Value, ReadError> {
        (**self).read(value)
    }

    fn write(&self, value: &Self::Value) -> WireValue {
        (**self).write(value)
    }

    fn default_value(&self) -> Option<Self::Value> {
        (**self).default_value()
    }
}

/// The canonical codec of a type.
///
/// Implemented for the primitive kinds, for collections of types that have
/// one, and by the derivation macros for records and unions.
pub trait DefaultCodec: Sized {
    /// Codec type returned by [`DefaultCodec::codec`].
    type Codec: Codec<Value = Self>;

    /// Build the canonical codec.
    fn codec() -> Self::Codec;
}

/// Canonical codec of `T`.
///
/// `Vec<u8>` resolves through the `Vec<T>` impl to a list of `N` values. Use
/// [`bytes`] for a byte sequence carried as `B`.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec};
/// use dynamodb_codec::wire::WireValue;
///
/// let data = vec![1u8, 2];
/// assert_eq!(codec::bytes().write(&data), WireValue::Bytes(vec![1, 2]));
/// assert!(matches!(codec::of::<Vec<u8>>().write(&data), WireValue::List(_)));
/// ```
pub fn of<T: DefaultCodec>() -> T::Codec {
    T::codec()
}
