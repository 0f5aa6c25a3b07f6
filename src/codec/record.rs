use crate::{
    codec::{Codec, error::ReadError},
    wire::{WireTag, WireValue},
};

use std::collections;

/// Field-by-field decoder for a wire map.
///
/// Every field is decoded independently and every failure is kept, so a
/// record with several broken fields reports all of them at once.
///
/// ```rust
/// use dynamodb_codec::codec::{self, error::ReadError, record::FieldsReader};
/// use dynamodb_codec::wire::WireValue;
/// use std::collections::HashMap;
///
/// let wire = WireValue::Map(HashMap::new());
/// let mut reader = FieldsReader::new(&wire).unwrap();
/// let name = reader.field("name", &codec::string());
/// let age = reader.field("age", &codec::option(codec::number::<u8>()));
/// let actual = reader.finish(|| Some((name?, age?)));
/// assert_eq!(
///     actual,
///     Err(ReadError::InvalidProperties(vec![(
///         "name".to_string(),
///         ReadError::MissingProperty,
///     )]))
/// );
/// ```
#[derive(Debug)]
pub struct FieldsReader<'a> {
    fields: Option<&'a collections::HashMap<String, WireValue>>,
    errors: Vec<(String, ReadError)>,
}

impl<'a> FieldsReader<'a> {
    /// Start decoding `value`, which must be a map.
    pub fn new(value: &'a WireValue) -> Result<Self, ReadError> {
        match value {
            WireValue::Map(fields) => Ok(Self::from_fields(Some(fields))),
            other => Err(ReadError::no_property_of_type(WireTag::M, other)),
        }
    }

    /// Start decoding a set of fields. `None` behaves as an empty map.
    pub fn from_fields(fields: Option<&'a collections::HashMap<String, WireValue>>) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    /// Decode one field, falling back to the codec default when absent.
    ///
    /// Returns `None` when the field failed; the failure is recorded.
    pub fn field<C: Codec>(&mut self, name: &str, codec: &C) -> Option<C::Value> {
        let outcome = match self.fields.and_then(|fields| fields.get(name)) {
            Some(value) => codec.read(value),
            None => codec.default_value().ok_or(ReadError::MissingProperty),
        };
        match outcome {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push((name.to_string(), error));
                None
            }
        }
    }

    /// Build the record if every field succeeded.
    ///
    /// `build` is only called when no field failed, and receives its inputs
    /// from the `Some` values returned by [`FieldsReader::field`].
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ReadError> {
        if !self.errors.is_empty() {
            return Err(ReadError::InvalidProperties(self.errors));
        }
        // a field only yields None after recording an error
        build().ok_or(ReadError::MissingProperty)
    }
}

/// Field-by-field encoder producing a wire map.
///
/// Fields that encode to `NULL` are left out, keeping absent optional fields
/// and empty sets off the wire.
#[derive(Debug, Default)]
pub struct FieldsWriter {
    fields: collections::HashMap<String, WireValue>,
}

impl FieldsWriter {
    /// Encode one field.
    pub fn field<C: Codec>(&mut self, name: &str, codec: &C, value: &C::Value) {
        let value = codec.write(value);
        if !value.is_null() {
            self.fields.insert(name.to_string(), value);
        }
    }

    /// The encoded fields.
    pub fn into_fields(self) -> collections::HashMap<String, WireValue> {
        self.fields
    }

    /// The encoded fields as a wire map.
    pub fn finish(self) -> WireValue {
        WireValue::Map(self.fields)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $wire:literal) => {
        $wire
    };
}

/// Derive a codec for a record type from its list of fields.
///
/// Each field names the codec used for it; `as "name"` overrides the attribute
/// name on the wire. The macro defines a unit codec struct and makes it the
/// [`DefaultCodec`](crate::codec::DefaultCodec) of the record.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec};
/// use dynamodb_codec::record_codec;
/// use std::collections::HashSet;
///
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     name: String,
///     nickname: Option<String>,
///     item: HashSet<i32>,
/// }
///
/// record_codec! {
///     PersonCodec for Person {
///         name: codec::string(),
///         nickname as "nick": codec::option(codec::string()),
///         item: codec::set::<i32>(),
///     }
/// }
///
/// let person = Person {
///     name: "bob".to_string(),
///     nickname: None,
///     item: HashSet::from([1, 2, 3]),
/// };
/// assert_eq!(PersonCodec.read(&PersonCodec.write(&person)), Ok(person));
/// ```
#[macro_export]
macro_rules! record_codec {
    (
        $(#[$meta:meta])*
        $vis:vis $codec:ident for $record:ident {
            $( $field:ident $(as $wire:literal)? : $field_codec:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        $vis struct $codec;

        impl $crate::codec::Codec for $codec {
            type Value = $record;

            fn read(
                &self,
                value: &$crate::wire::WireValue,
            ) -> ::core::result::Result<$record, $crate::codec::error::ReadError> {
                #[allow(unused_mut)]
                let mut reader = $crate::codec::record::FieldsReader::new(value)?;
                $(
                    let $field = reader.field($crate::__wire_name!($field $(, $wire)?), &$field_codec);
                )*
                reader.finish(|| ::core::option::Option::Some($record { $( $field: $field? ),* }))
            }

            fn write(&self, value: &$record) -> $crate::wire::WireValue {
                #[allow(unused_mut)]
                let mut writer = $crate::codec::record::FieldsWriter::default();
                $(
                    writer.field($crate::__wire_name!($field $(, $wire)?), &$field_codec, &value.$field);
                )*
                writer.finish()
            }
        }

        impl $crate::codec::DefaultCodec for $record {
            type Codec = $codec;

            fn codec() -> $codec {
                $codec
            }
        }
    };
}
