use crate::{
    codec::{Codec, DefaultCodec, error::ReadError},
    wire::{WireTag, WireValue},
};

use rust_decimal::Decimal;
use std::{fmt, marker, str::FromStr};
use uuid::Uuid;

/// Codec between `String` and `S`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;

    fn read(&self, value: &WireValue) -> Result<String, ReadError> {
        match value {
            WireValue::Str(text) => Ok(text.clone()),
            other => Err(ReadError::no_property_of_type(WireTag::S, other)),
        }
    }

    fn write(&self, value: &String) -> WireValue {
        WireValue::Str(value.clone())
    }
}

/// Codec between `bool` and `BOOL`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoolCodec;

impl Codec for BoolCodec {
    type Value = bool;

    fn read(&self, value: &WireValue) -> Result<bool, ReadError> {
        match value {
            WireValue::Bool(flag) => Ok(*flag),
            other => Err(ReadError::no_property_of_type(WireTag::Bool, other)),
        }
    }

    fn write(&self, value: &bool) -> WireValue {
        WireValue::Bool(*value)
    }
}

/// Codec between `Vec<u8>` and `B`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BytesCodec;

impl Codec for BytesCodec {
    type Value = Vec<u8>;

    fn read(&self, value: &WireValue) -> Result<Vec<u8>, ReadError> {
        match value {
            WireValue::Bytes(bytes) => Ok(bytes.clone()),
            other => Err(ReadError::no_property_of_type(WireTag::B, other)),
        }
    }

    fn write(&self, value: &Vec<u8>) -> WireValue {
        WireValue::Bytes(value.clone())
    }
}

/// Codec between [`Uuid`] and its hyphenated text in `S`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidCodec;

impl Codec for UuidCodec {
    type Value = Uuid;

    fn read(&self, value: &WireValue) -> Result<Uuid, ReadError> {
        match value {
            WireValue::Str(text) => Uuid::parse_str(text).map_err(ReadError::coercion),
            other => Err(ReadError::no_property_of_type(WireTag::S, other)),
        }
    }

    fn write(&self, value: &Uuid) -> WireValue {
        WireValue::Str(value.to_string())
    }
}

/// Native numeric kind carried as `N`.
pub trait Number: Sized + fmt::Display {
    /// Parse the decimal text of a number attribute.
    fn parse_number(text: &str) -> Result<Self, String>;
}

macro_rules! impl_number {
    ($($kind:ty),* $(,)?) => {
        $(
            impl Number for $kind {
                fn parse_number(text: &str) -> Result<Self, String> {
                    <$kind as FromStr>::from_str(text).map_err(|error| error.to_string())
                }
            }

            impl DefaultCodec for $kind {
                type Codec = NumberCodec<$kind>;

                fn codec() -> Self::Codec {
                    number()
                }
            }
        )*
    };
}

impl_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Rejects numbers with more significant digits than a [`Decimal`] holds,
/// which would otherwise be rounded on read.
impl Number for Decimal {
    fn parse_number(text: &str) -> Result<Self, String> {
        let decimal = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|error| error.to_string())?;
        if significant_digits(text) != significant_digits(&decimal.normalize().to_string()) {
            return Err(format!("{text} does not fit a decimal without rounding"));
        }
        Ok(decimal)
    }
}

/// Digits of the mantissa without sign, point, leading or trailing zeros.
fn significant_digits(text: &str) -> String {
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    digits
        .trim_start_matches('0')
        .trim_end_matches('0')
        .to_string()
}

impl DefaultCodec for Decimal {
    type Codec = NumberCodec<Decimal>;

    fn codec() -> Self::Codec {
        number()
    }
}

/// Codec between a [`Number`] and `N`.
pub struct NumberCodec<N>(marker::PhantomData<fn() -> N>);

impl<N> Clone for NumberCodec<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for NumberCodec<N> {}

impl<N> fmt::Debug for NumberCodec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NumberCodec")
    }
}

impl<N: Number> Codec for NumberCodec<N> {
    type Value = N;

    fn read(&self, value: &WireValue) -> Result<N, ReadError> {
        match value {
            WireValue::Num(text) => N::parse_number(text).map_err(ReadError::TypeCoercion),
            other => Err(ReadError::no_property_of_type(WireTag::N, other)),
        }
    }

    fn write(&self, value: &N) -> WireValue {
        WireValue::Num(value.to_string())
    }
}

impl DefaultCodec for String {
    type Codec = StringCodec;

    fn codec() -> Self::Codec {
        StringCodec
    }
}

impl DefaultCodec for bool {
    type Codec = BoolCodec;

    fn codec() -> Self::Codec {
        BoolCodec
    }
}

impl DefaultCodec for Uuid {
    type Codec = UuidCodec;

    fn codec() -> Self::Codec {
        UuidCodec
    }
}

/// Codec for `String`.
pub fn string() -> StringCodec {
    StringCodec
}

/// Codec for `bool`.
pub fn boolean() -> BoolCodec {
    BoolCodec
}

/// Codec for byte sequences carried as `B`.
///
/// Pass it explicitly: [`of::<Vec<u8>>()`](crate::codec::of) is a list of numbers.
pub fn bytes() -> BytesCodec {
    BytesCodec
}

/// Codec for [`Uuid`].
pub fn uuid() -> UuidCodec {
    UuidCodec
}

/// Codec for any [`Number`] kind.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec};
/// use dynamodb_codec::wire::WireValue;
///
/// let codec = codec::number::<u16>();
/// assert_eq!(codec.read(&WireValue::Num("8080".to_string())), Ok(8080));
/// ```
pub fn number<N: Number>() -> NumberCodec<N> {
    NumberCodec(marker::PhantomData)
}
