use crate::{
    codec::{Codec, DefaultCodec, error::ReadError, primitive::Number},
    wire::{WireTag, WireValue},
};

use rust_decimal::Decimal;
use std::{collections, fmt, hash, marker};

/// Codec between any sequence collection and `L`.
///
/// Elements are read in order and the first failing element fails the whole
/// list.
pub struct SeqCodec<C, S> {
    inner: C,
    collection: marker::PhantomData<fn() -> S>,
}

impl<C: Clone, S> Clone for SeqCodec<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            collection: marker::PhantomData,
        }
    }
}

impl<C: fmt::Debug, S> fmt::Debug for SeqCodec<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqCodec").field("inner", &self.inner).finish()
    }
}

impl<C, S> Codec for SeqCodec<C, S>
where
    C: Codec,
    S: FromIterator<C::Value>,
    for<'a> &'a S: IntoIterator<Item = &'a C::Value>,
{
    type Value = S;

    fn read(&self, value: &WireValue) -> Result<S, ReadError> {
        match value {
            WireValue::List(items) => items.iter().map(|item| self.inner.read(item)).collect(),
            other => Err(ReadError::no_property_of_type(WireTag::L, other)),
        }
    }

    fn write(&self, value: &S) -> WireValue {
        WireValue::List(value.into_iter().map(|item| self.inner.write(item)).collect())
    }
}

/// Codec for a `Vec` of `inner` values.
pub fn list<C: Codec>(inner: C) -> SeqCodec<C, Vec<C::Value>> {
    seq(inner)
}

/// Codec for any sequence collection of `inner` values, e.g. a `VecDeque`.
pub fn seq<C: Codec, S>(inner: C) -> SeqCodec<C, S> {
    SeqCodec {
        inner,
        collection: marker::PhantomData,
    }
}

/// Codec between `[T; N]` and `L` holding exactly `N` elements.
#[derive(Clone, Debug)]
pub struct ArrayCodec<C, const N: usize> {
    inner: C,
}

impl<C: Codec, const N: usize> Codec for ArrayCodec<C, N> {
    type Value = [C::Value; N];

    fn read(&self, value: &WireValue) -> Result<Self::Value, ReadError> {
        match value {
            WireValue::List(items) => {
                let items = items
                    .iter()
                    .map(|item| self.inner.read(item))
                    .collect::<Result<Vec<_>, _>>()?;
                let found = items.len();
                items.try_into().map_err(|_| {
                    ReadError::coercion(format!("expected {N} elements, found {found}"))
                })
            }
            other => Err(ReadError::no_property_of_type(WireTag::L, other)),
        }
    }

    fn write(&self, value: &Self::Value) -> WireValue {
        WireValue::List(value.iter().map(|item| self.inner.write(item)).collect())
    }
}

/// Codec for a fixed-size array of `inner` values.
pub fn array<C: Codec, const N: usize>(inner: C) -> ArrayCodec<C, N> {
    ArrayCodec { inner }
}

/// Element kind allowed in a [`SetCodec`].
pub trait SetElement: Eq + hash::Hash + Sized {
    /// Tag of the wire set holding this kind.
    const SET_TAG: WireTag;

    /// Text form stored in the wire set.
    fn to_text(&self) -> String;

    /// Parse the text form back.
    fn from_text(text: &str) -> Result<Self, ReadError>;
}

macro_rules! impl_number_set_element {
    ($($kind:ty),* $(,)?) => {
        $(
            impl SetElement for $kind {
                const SET_TAG: WireTag = WireTag::Ns;

                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn from_text(text: &str) -> Result<Self, ReadError> {
                    <$kind as Number>::parse_number(text).map_err(ReadError::TypeCoercion)
                }
            }
        )*
    };
}

impl_number_set_element!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, Decimal,
);

impl SetElement for String {
    const SET_TAG: WireTag = WireTag::Ss;

    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_text(text: &str) -> Result<Self, ReadError> {
        Ok(text.to_string())
    }
}

/// Codec between `HashSet<T>` and `NS`/`SS`.
///
/// The store rejects empty sets, so the empty set is written as `NULL` and
/// `NULL` reads back as the empty set. An absent attribute also defaults to
/// the empty set.
pub struct SetCodec<T>(marker::PhantomData<fn() -> T>);

impl<T> Clone for SetCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SetCodec<T> {}

impl<T> fmt::Debug for SetCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SetCodec")
    }
}

impl<T: SetElement> Codec for SetCodec<T> {
    type Value = collections::HashSet<T>;

    fn read(&self, value: &WireValue) -> Result<Self::Value, ReadError> {
        match (T::SET_TAG, value) {
            (_, WireValue::Null) => Ok(collections::HashSet::new()),
            (WireTag::Ns, WireValue::NumberSet(items)) | (WireTag::Ss, WireValue::StringSet(items)) => {
                items.iter().map(|item| T::from_text(item)).collect()
            }
            (tag, other) => Err(ReadError::no_property_of_type(tag, other)),
        }
    }

    fn write(&self, value: &Self::Value) -> WireValue {
        if value.is_empty() {
            return WireValue::Null;
        }
        let items = value.iter().map(SetElement::to_text).collect();
        match T::SET_TAG {
            WireTag::Ns => WireValue::NumberSet(items),
            _ => WireValue::StringSet(items),
        }
    }

    fn default_value(&self) -> Option<Self::Value> {
        Some(collections::HashSet::new())
    }
}

/// Codec for a set of numbers or strings.
pub fn set<T: SetElement>() -> SetCodec<T> {
    SetCodec(marker::PhantomData)
}

/// Floating-point kind allowed in a [`FloatSetCodec`].
pub trait FloatElement: Number {}

impl FloatElement for f32 {}

impl FloatElement for f64 {}

/// Codec between a `Vec` of floats and `NS`.
///
/// Floats are not `Eq + Hash`, so the set is carried as a `Vec`. Equal numbers
/// collapse on write and elements read back in the store's order. Empty sets
/// follow [`SetCodec`]: written as `NULL`, read from `NULL` or absence.
pub struct FloatSetCodec<F>(marker::PhantomData<fn() -> F>);

impl<F> Clone for FloatSetCodec<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for FloatSetCodec<F> {}

impl<F> fmt::Debug for FloatSetCodec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FloatSetCodec")
    }
}

impl<F: FloatElement> Codec for FloatSetCodec<F> {
    type Value = Vec<F>;

    fn read(&self, value: &WireValue) -> Result<Vec<F>, ReadError> {
        match value {
            WireValue::Null => Ok(Vec::new()),
            WireValue::NumberSet(items) => items
                .iter()
                .map(|item| F::parse_number(item).map_err(ReadError::TypeCoercion))
                .collect(),
            other => Err(ReadError::no_property_of_type(WireTag::Ns, other)),
        }
    }

    fn write(&self, value: &Vec<F>) -> WireValue {
        if value.is_empty() {
            return WireValue::Null;
        }
        WireValue::NumberSet(value.iter().map(ToString::to_string).collect())
    }

    fn default_value(&self) -> Option<Vec<F>> {
        Some(Vec::new())
    }
}

/// Codec for a set of `f32` or `f64` numbers.
///
/// ```rust
/// use dynamodb_codec::codec::{self, Codec};
/// use dynamodb_codec::wire::WireValue;
///
/// let codec = codec::float_set::<f64>();
/// assert_eq!(codec.write(&vec![]), WireValue::Null);
/// assert_eq!(codec.read(&codec.write(&vec![1.5, 1.5])), Ok(vec![1.5]));
/// ```
pub fn float_set<F: FloatElement>() -> FloatSetCodec<F> {
    FloatSetCodec(marker::PhantomData)
}

/// Codec between `HashMap<String, V>` and `M`.
///
/// Entries are read in key order and the first failing entry fails the whole
/// map, so the reported error does not depend on hash order.
#[derive(Clone, Debug)]
pub struct MapCodec<C> {
    inner: C,
}

impl<C: Codec> Codec for MapCodec<C> {
    type Value = collections::HashMap<String, C::Value>;

    fn read(&self, value: &WireValue) -> Result<Self::Value, ReadError> {
        match value {
            WireValue::Map(fields) => {
                let mut entries: Vec<_> = fields.iter().collect();
                entries.sort_by(|(left, _), (right, _)| left.cmp(right));
                let mut map = collections::HashMap::with_capacity(entries.len());
                for (name, value) in entries {
                    map.insert(name.clone(), self.inner.read(value)?);
                }
                Ok(map)
            }
            other => Err(ReadError::no_property_of_type(WireTag::M, other)),
        }
    }

    fn write(&self, value: &Self::Value) -> WireValue {
        WireValue::Map(
            value
                .iter()
                .map(|(name, value)| (name.clone(), self.inner.write(value)))
                .collect(),
        )
    }
}

/// Codec for a string-keyed map of `inner` values.
pub fn map<C: Codec>(inner: C) -> MapCodec<C> {
    MapCodec { inner }
}

/// Codec between `Option<T>` and either `NULL` or the inner encoding.
///
/// Defaults to `None`, so optional record fields may be absent on the wire.
#[derive(Clone, Debug)]
pub struct OptionCodec<C> {
    inner: C,
}

impl<C: Codec> Codec for OptionCodec<C> {
    type Value = Option<C::Value>;

    fn read(&self, value: &WireValue) -> Result<Self::Value, ReadError> {
        match value {
            WireValue::Null => Ok(None),
            value => self.inner.read(value).map(Some),
        }
    }

    fn write(&self, value: &Self::Value) -> WireValue {
        match value {
            Some(value) => self.inner.write(value),
            None => WireValue::Null,
        }
    }

    fn default_value(&self) -> Option<Self::Value> {
        Some(None)
    }
}

/// Codec for an optional `inner` value.
pub fn option<C: Codec>(inner: C) -> OptionCodec<C> {
    OptionCodec { inner }
}

impl<T: DefaultCodec> DefaultCodec for Vec<T> {
    type Codec = SeqCodec<T::Codec, Vec<T>>;

    fn codec() -> Self::Codec {
        seq(T::codec())
    }
}

impl<T: DefaultCodec> DefaultCodec for collections::VecDeque<T> {
    type Codec = SeqCodec<T::Codec, collections::VecDeque<T>>;

    fn codec() -> Self::Codec {
        seq(T::codec())
    }
}

impl<T: DefaultCodec, const N: usize> DefaultCodec for [T; N] {
    type Codec = ArrayCodec<T::Codec, N>;

    fn codec() -> Self::Codec {
        array(T::codec())
    }
}

impl<T: SetElement> DefaultCodec for collections::HashSet<T> {
    type Codec = SetCodec<T>;

    fn codec() -> Self::Codec {
        set()
    }
}

impl<V: DefaultCodec> DefaultCodec for collections::HashMap<String, V> {
    type Codec = MapCodec<V::Codec>;

    fn codec() -> Self::Codec {
        map(V::codec())
    }
}

impl<T: DefaultCodec> DefaultCodec for Option<T> {
    type Codec = OptionCodec<T::Codec>;

    fn codec() -> Self::Codec {
        option(T::codec())
    }
}
