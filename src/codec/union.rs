use crate::{
    codec::{error::ReadError, record::FieldsWriter},
    wire::{WireTag, WireValue},
};

use std::collections;

/// Fields of an alternative as found on the wire.
pub type Alternative<'a> = (&'a str, Option<&'a collections::HashMap<String, WireValue>>);

/// Split a union value into its alternative name and fields.
///
/// Alternatives with fields travel as `{name: {fields}}`; alternatives
/// without fields travel as the bare name.
pub fn split(value: &WireValue) -> Result<Alternative<'_>, ReadError> {
    match value {
        WireValue::Str(name) => Ok((name.as_str(), None)),
        WireValue::Map(wrapper) => {
            let mut entries = wrapper.iter();
            match (entries.next(), entries.next()) {
                (Some((name, WireValue::Map(fields))), None) => Ok((name.as_str(), Some(fields))),
                (Some((_, other)), None) => Err(ReadError::no_property_of_type(WireTag::M, other)),
                _ => Err(ReadError::coercion(format!(
                    "expected a single alternative, found {} keys",
                    wrapper.len()
                ))),
            }
        }
        other => Err(ReadError::no_property_of_type(WireTag::M, other)),
    }
}

/// Wrap the encoded fields of an alternative.
pub fn wrap(name: &str, has_fields: bool, fields: FieldsWriter) -> WireValue {
    if !has_fields {
        return WireValue::Str(name.to_string());
    }
    WireValue::Map(collections::HashMap::from([(name.to_string(), fields.finish())]))
}

/// Error for a name that matches no alternative.
pub fn unknown_alternative(name: &str) -> ReadError {
    ReadError::coercion(format!("unknown alternative `{name}`"))
}

/// Derive a codec for an enum whose variants are records or unit variants.
///
/// Variants with fields list them in braces like [`record_codec!`](crate::record_codec);
/// unit variants are written as their bare name.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec};
/// use dynamodb_codec::union_codec;
/// use dynamodb_codec::wire::WireValue;
///
/// #[derive(Debug, PartialEq)]
/// enum Shape {
///     Circle { radius: f64 },
///     Empty,
/// }
///
/// union_codec! {
///     ShapeCodec for Shape {
///         Circle { radius: codec::number::<f64>() },
///         Empty,
///     }
/// }
///
/// assert_eq!(ShapeCodec.write(&Shape::Empty), WireValue::Str("Empty".to_string()));
/// let circle = Shape::Circle { radius: 1.5 };
/// assert_eq!(ShapeCodec.read(&ShapeCodec.write(&circle)), Ok(circle));
/// ```
#[macro_export]
macro_rules! union_codec {
    (
        $(#[$meta:meta])*
        $vis:vis $codec:ident for $union:ident {
            $(
                $variant:ident $({
                    $( $field:ident $(as $wire:literal)? : $field_codec:expr ),* $(,)?
                })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        $vis struct $codec;

        impl $crate::codec::Codec for $codec {
            type Value = $union;

            fn read(
                &self,
                value: &$crate::wire::WireValue,
            ) -> ::core::result::Result<$union, $crate::codec::error::ReadError> {
                let (name, fields) = $crate::codec::union::split(value)?;
                $(
                    if name == stringify!($variant) {
                        #[allow(unused_mut)]
                        let mut reader = $crate::codec::record::FieldsReader::from_fields(fields);
                        $($(
                            let $field = reader.field($crate::__wire_name!($field $(, $wire)?), &$field_codec);
                        )*)?
                        return reader.finish(|| {
                            ::core::option::Option::Some($union::$variant { $($( $field: $field? ),*)? })
                        });
                    }
                )*
                ::core::result::Result::Err($crate::codec::union::unknown_alternative(name))
            }

            fn write(&self, value: &$union) -> $crate::wire::WireValue {
                match value {
                    $(
                        $union::$variant { $($( $field ),*)? } => {
                            let declared: &[&str] = &[$($( stringify!($field) ),*)?];
                            #[allow(unused_mut)]
                            let mut writer = $crate::codec::record::FieldsWriter::default();
                            $($(
                                writer.field($crate::__wire_name!($field $(, $wire)?), &$field_codec, $field);
                            )*)?
                            $crate::codec::union::wrap(stringify!($variant), !declared.is_empty(), writer)
                        }
                    )*
                }
            }
        }

        impl $crate::codec::DefaultCodec for $union {
            type Codec = $codec;

            fn codec() -> $codec {
                $codec
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{self, Codec};

    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    enum Animal {
        Dog { name: String, age: Option<u8> },
        Cat { lives: i32 },
        Unknown,
    }

    crate::union_codec! {
        AnimalCodec for Animal {
            Dog {
                name: codec::string(),
                age: codec::option(codec::number::<u8>()),
            },
            Cat { lives as "livesLeft": codec::number::<i32>() },
            Unknown,
        }
    }

    fn fields<const N: usize>(entries: [(&str, WireValue); N]) -> WireValue {
        WireValue::Map(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    #[rstest]
    #[case::unit(Animal::Unknown, WireValue::Str("Unknown".to_string()))]
    #[case::populated(
        Animal::Dog {
            name: "rex".to_string(),
            age: Some(3),
        },
        fields([(
            "Dog",
            fields([
                ("name", WireValue::Str("rex".to_string())),
                ("age", WireValue::Num("3".to_string())),
            ]),
        )])
    )]
    #[case::renamed_field(
        Animal::Cat { lives: 9 },
        fields([(
            "Cat",
            fields([
                ("livesLeft", WireValue::Num("9".to_string())),
            ]),
        )])
    )]
    #[case::optional_absent(
        Animal::Dog {
            name: "rex".to_string(),
            age: None,
        },
        fields([(
            "Dog",
            fields([
                ("name", WireValue::Str("rex".to_string())),
            ]),
        )])
    )]
    fn test_union_round_trip(#[case] value: Animal, #[case] expected: WireValue) {
        let actual = AnimalCodec.write(&value);
        assert_eq!(actual, expected);
        assert_eq!(AnimalCodec.read(&actual), Ok(value));
    }

    #[rstest]
    #[case::unknown_name(
        WireValue::Str("Bird".to_string()),
        ReadError::TypeCoercion("unknown alternative `Bird`".to_string())
    )]
    #[case::too_many_keys(
        fields([("Dog", fields([])), ("Unknown", fields([]))]),
        ReadError::TypeCoercion("expected a single alternative, found 2 keys".to_string())
    )]
    #[case::not_a_map(
        WireValue::Bool(true),
        ReadError::NoPropertyOfType {
            expected: WireTag::M,
            actual: WireValue::Bool(true),
        }
    )]
    #[case::alternative_errors(
        fields([("Dog", fields([("age", WireValue::Str("old".to_string()))]))]),
        ReadError::InvalidProperties(vec![
            ("name".to_string(), ReadError::MissingProperty),
            (
                "age".to_string(),
                ReadError::NoPropertyOfType {
                    expected: WireTag::N,
                    actual: WireValue::Str("old".to_string()),
                },
            ),
        ])
    )]
    fn test_union_read_errors(#[case] wire: WireValue, #[case] expected: ReadError) {
        assert_eq!(AnimalCodec.read(&wire), Err(expected));
    }

    #[test]
    fn test_unit_alternative_accepts_wrapper() {
        let wire = fields([("Unknown", fields([]))]);
        assert_eq!(AnimalCodec.read(&wire), Ok(Animal::Unknown));
    }
}
