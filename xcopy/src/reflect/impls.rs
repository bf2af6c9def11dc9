//! `Reflect` for standard library types.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use indexmap::IndexMap;

use super::{Reflect, decode_error};
use crate::{
    error::XCopyResult,
    ty::Type,
    value::{Data, MapKey, Value},
};

/// Strips `any` layers so typed decoding sees the concrete payload.
pub(super) fn concrete(value: Value) -> Value {
    match value.into_parts() {
        (_, Data::Any(Some(inner))) => concrete(*inner),
        (ty, data) => Value::new_unchecked(ty, data),
    }
}

impl Reflect for bool {
    fn reflect_type() -> Type {
        Type::bool()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match concrete(value).into_data() {
            Data::Bool(b) => Ok(b),
            other => Err(decode_error::<Self>(&other)),
        }
    }
}

macro_rules! reflect_int {
    ($($rust:ty => $ctor:ident, $variant:ident, $wide:ty;)*) => {
        $(
            impl Reflect for $rust {
                fn reflect_type() -> Type {
                    Type::$ctor()
                }

                fn to_value(&self) -> Value {
                    Value::new_unchecked(Type::$ctor(), Data::$variant(<$wide>::try_from(*self).unwrap_or_default()))
                }

                fn from_value(value: Value) -> XCopyResult<Self> {
                    match concrete(value).into_data() {
                        Data::$variant(n) => Self::try_from(n).map_err(|_| decode_error::<Self>(&Data::$variant(n))),
                        other => Err(decode_error::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

reflect_int! {
    i8 => i8, Int, i64;
    i16 => i16, Int, i64;
    i32 => i32, Int, i64;
    i64 => i64, Int, i64;
    isize => i64, Int, i64;
    u8 => u8, Uint, u64;
    u16 => u16, Uint, u64;
    u32 => u32, Uint, u64;
    u64 => u64, Uint, u64;
    usize => u64, Uint, u64;
}

impl Reflect for f32 {
    fn reflect_type() -> Type {
        Type::f32()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match concrete(value).into_data() {
            // stored widened from f32, so narrowing is exact
            Data::Float(n) => Ok(n as Self),
            other => Err(decode_error::<Self>(&other)),
        }
    }
}

impl Reflect for f64 {
    fn reflect_type() -> Type {
        Type::f64()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match concrete(value).into_data() {
            Data::Float(n) => Ok(n),
            other => Err(decode_error::<Self>(&other)),
        }
    }
}

impl Reflect for String {
    fn reflect_type() -> Type {
        Type::string()
    }

    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match concrete(value).into_data() {
            Data::Str(s) => Ok(s),
            other => Err(decode_error::<Self>(&other)),
        }
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect_type() -> Type {
        Type::option(T::reflect_type())
    }

    fn to_value(&self) -> Value {
        let ty = Self::reflect_type();
        match self {
            Some(inner) => Value::new_unchecked(ty, Data::Option(Some(Box::new(inner.to_value())))),
            None => Value::zero(&ty),
        }
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match concrete(value).into_data() {
            Data::Option(inner) => inner.map(|boxed| T::from_value(*boxed)).transpose(),
            Data::Any(None) => Ok(None),
            other => Err(decode_error::<Self>(&other)),
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn reflect_type() -> Type {
        T::reflect_type()
    }

    fn to_value(&self) -> Value {
        T::to_value(self)
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        T::from_value(value).map(Self::new)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect_type() -> Type {
        Type::seq(T::reflect_type())
    }

    fn to_value(&self) -> Value {
        Value::new_unchecked(Self::reflect_type(), Data::Seq(self.iter().map(T::to_value).collect()))
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match concrete(value).into_data() {
            Data::Seq(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(decode_error::<Self>(&other)),
        }
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect_type() -> Type {
        Type::array(T::reflect_type(), N)
    }

    fn to_value(&self) -> Value {
        Value::new_unchecked(Self::reflect_type(), Data::Seq(self.iter().map(T::to_value).collect()))
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match concrete(value).into_data() {
            Data::Seq(items) => {
                let decoded = items.into_iter().map(T::from_value).collect::<XCopyResult<Vec<T>>>()?;
                let found = Data::Seq(Vec::new());
                decoded.try_into().map_err(|_| decode_error::<Self>(&found))
            }
            other => Err(decode_error::<Self>(&other)),
        }
    }
}

fn map_value<'a, K, V>(ty: Type, entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: Reflect + 'a,
    V: Reflect + 'a,
{
    let entries: IndexMap<MapKey, Value> = entries
        .map(|(k, v)| (MapKey::from(k.to_value()), v.to_value()))
        .collect();
    Value::new_unchecked(ty, Data::Map(entries))
}

fn map_entries<K, V, C>(value: Value) -> XCopyResult<C>
where
    K: Reflect,
    V: Reflect,
    C: Reflect + FromIterator<(K, V)>,
{
    match concrete(value).into_data() {
        Data::Map(entries) => entries
            .into_iter()
            .map(|(k, v)| -> XCopyResult<(K, V)> {
                Ok((K::from_value(k.into_value())?, V::from_value(v)?))
            })
            .collect(),
        other => Err(decode_error::<C>(&other)),
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + Eq + Hash,
    V: Reflect,
    S: BuildHasher + Default,
{
    fn reflect_type() -> Type {
        Type::map(K::reflect_type(), V::reflect_type())
    }

    fn to_value(&self) -> Value {
        map_value(Self::reflect_type(), self.iter())
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        map_entries::<K, V, Self>(value)
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Ord,
    V: Reflect,
{
    fn reflect_type() -> Type {
        Type::map(K::reflect_type(), V::reflect_type())
    }

    fn to_value(&self) -> Value {
        map_value(Self::reflect_type(), self.iter())
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        map_entries::<K, V, Self>(value)
    }
}

impl<K, V, S> Reflect for IndexMap<K, V, S>
where
    K: Reflect + Eq + Hash,
    V: Reflect,
    S: BuildHasher + Default,
{
    fn reflect_type() -> Type {
        Type::map(K::reflect_type(), V::reflect_type())
    }

    fn to_value(&self) -> Value {
        map_value(Self::reflect_type(), self.iter())
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        map_entries::<K, V, Self>(value)
    }
}

/// A [`Value`] reflects as the `any` slot holding it.
impl Reflect for Value {
    fn reflect_type() -> Type {
        Type::any()
    }

    fn to_value(&self) -> Value {
        Self::any(self.clone())
    }

    fn from_value(value: Value) -> XCopyResult<Self> {
        match value.into_parts() {
            (_, Data::Any(Some(inner))) => Ok(*inner),
            (_, Data::Any(None)) => Ok(Self::nil()),
            (ty, data) => Ok(Self::new_unchecked(ty, data)),
        }
    }
}
