//! Dynamic values paired with their [`Type`].

#[cfg(feature = "serde_json")]
mod json;
mod key;

use indexmap::IndexMap;

pub use key::MapKey;

use crate::{
    error::{XCopyError, XCopyErrorKind, XCopyResult},
    ty::{ScalarKind, Shape, Type, TypeKind},
};

/// Payload of a [`Value`].
///
/// The variant must agree with the value's type: integers use [`Data::Int`]
/// or [`Data::Uint`] by signedness, arrays use [`Data::Seq`] with exactly the
/// declared number of elements, and struct payloads list one value per
/// declared field.
#[derive(Clone, Debug, PartialEq)]
pub enum Data {
    /// `bool` payload.
    Bool(bool),
    /// Signed integer payload.
    Int(i64),
    /// Unsigned integer payload.
    Uint(u64),
    /// Floating point payload.
    Float(f64),
    /// String payload.
    Str(String),
    /// Contents of an `any` slot; `None` is nil.
    Any(Option<Box<Value>>),
    /// Field values in declaration order.
    Struct(Vec<Value>),
    /// Mapping entries in insertion order.
    Map(IndexMap<MapKey, Value>),
    /// Sequence or array elements.
    Seq(Vec<Value>),
    /// Optional layer; `None` is absent.
    Option(Option<Box<Value>>),
}

/// A typed dynamic value.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    ty: Type,
    data: Data,
}

impl Value {
    /// Builds a value after checking that `data` agrees with `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::Decode`] when the payload does not match the
    /// type, including element or field values of the wrong type.
    pub fn new(ty: Type, data: Data) -> XCopyResult<Self> {
        if conforms(&ty, &data) {
            Ok(Self { ty, data })
        } else {
            Err(XCopyError::unrooted(XCopyErrorKind::Decode {
                found: data_label(&data).to_owned(),
                expected: ty.to_string(),
            }))
        }
    }

    /// Builds a value without checking the payload against the type.
    ///
    /// Inconsistent values are never unsafe, but the engine reports them as
    /// mismatches when it meets them.
    #[must_use]
    pub const fn new_unchecked(ty: Type, data: Data) -> Self {
        Self { ty, data }
    }

    /// The zero value of `ty`: `false`, `0`, empty strings and collections,
    /// absent options, nil `any`, and structs of zeroed fields.
    #[must_use]
    pub fn zero(ty: &Type) -> Self {
        let data = match ty.kind() {
            TypeKind::Scalar(kind) => zero_scalar(*kind),
            TypeKind::Struct(fields) => {
                Data::Struct(fields.iter().map(|f| Self::zero(f.ty())).collect())
            }
            TypeKind::Map { .. } => Data::Map(IndexMap::new()),
            TypeKind::Seq(_) => Data::Seq(Vec::new()),
            TypeKind::Array { elem, len } => {
                Data::Seq((0..*len).map(|_| Self::zero(elem)).collect())
            }
            TypeKind::Option(_) => Data::Option(None),
        };
        Self {
            ty: ty.clone(),
            data,
        }
    }

    /// A nil `any` value.
    #[must_use]
    pub fn nil() -> Self {
        Self::zero(&Type::any())
    }

    /// Boxes `inner` into an `any` slot.
    ///
    /// A value that is already `any`-typed is returned unchanged.
    #[must_use]
    pub fn any(inner: Self) -> Self {
        Self::any_of(&Type::any(), inner)
    }

    /// Boxes `inner` into the `any`-kinded type `ty`.
    pub(crate) fn any_of(ty: &Type, inner: Self) -> Self {
        let data = if inner.ty.is_any() {
            inner.data
        } else {
            Data::Any(Some(Box::new(inner)))
        };
        Self {
            ty: ty.clone(),
            data,
        }
    }

    /// Wraps `inner` in one optional layer typed `option<inner type>`.
    #[must_use]
    pub fn some(inner: Self) -> Self {
        let ty = Type::option(inner.ty.clone());
        Self::option_of(&ty, inner)
    }

    pub(crate) fn option_of(ty: &Type, inner: Self) -> Self {
        Self {
            ty: ty.clone(),
            data: Data::Option(Some(Box::new(inner))),
        }
    }

    /// An absent `option<inner>` value.
    #[must_use]
    pub fn none(inner: Type) -> Self {
        Self::zero(&Type::option(inner))
    }

    /// An empty mapping.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self::zero(&Type::map(key, value))
    }

    /// A growable sequence of `elem`.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::Decode`] when an item is not of type `elem`.
    pub fn seq(elem: Type, items: Vec<Self>) -> XCopyResult<Self> {
        Self::new(Type::seq(elem), Data::Seq(items))
    }

    /// Declared type.
    #[must_use]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Raw payload.
    #[must_use]
    pub const fn data(&self) -> &Data {
        &self.data
    }

    pub(crate) const fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Consumes the value, returning its payload.
    #[must_use]
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Consumes the value, returning its type and payload.
    #[must_use]
    pub fn into_parts(self) -> (Type, Data) {
        (self.ty, self.data)
    }

    /// Shape of the payload after resolving optional and `any` layers.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.resolve().map_or(Shape::Scalar, |v| v.ty.shape())
    }

    /// Follows optional and `any` layers to the concrete value.
    ///
    /// Returns `None` when any layer on the way is absent or nil.
    #[must_use]
    pub fn resolve(&self) -> Option<&Self> {
        match &self.data {
            Data::Option(inner) | Data::Any(inner) => inner.as_deref().and_then(Self::resolve),
            _ => Some(self),
        }
    }

    /// Whether [`Value::resolve`] finds nothing.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.resolve().is_none()
    }

    /// Contents of an `any` slot when they are of type `ty`.
    pub(crate) fn any_inner_of(&self, ty: &Type) -> Option<&Self> {
        match &self.data {
            Data::Any(Some(inner)) if inner.ty == *ty => Some(inner),
            _ => None,
        }
    }

    /// Walks optional layers, filling absent ones with zero values.
    pub(crate) fn materialize(&mut self) -> &mut Self {
        let Some(inner_ty) = self.ty.option_inner().cloned() else {
            return self;
        };
        match self.data {
            Data::Option(ref mut slot) => slot
                .get_or_insert_with(|| Box::new(Self::zero(&inner_ty)))
                .materialize(),
            _ => self,
        }
    }

    /// The boolean behind any optional layers.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.resolve()?.data {
            Data::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The signed integer behind any optional layers.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.resolve()?.data {
            Data::Int(n) => Some(n),
            Data::Uint(n) => i64::try_from(n).ok(),
            _ => None,
        }
    }

    /// The unsigned integer behind any optional layers.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self.resolve()?.data {
            Data::Uint(n) => Some(n),
            Data::Int(n) => u64::try_from(n).ok(),
            _ => None,
        }
    }

    /// The float behind any optional layers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.resolve()?.data {
            Data::Float(n) => Some(n),
            _ => None,
        }
    }

    /// The string behind any optional layers.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.resolve()?.data {
            Data::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Value of the struct field declared as `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        let resolved = self.resolve()?;
        let fields = resolved.ty.struct_fields()?;
        let position = fields.iter().position(|f| f.name() == name)?;
        match &resolved.data {
            Data::Struct(values) => values.get(position),
            _ => None,
        }
    }

    /// Replaces the struct field declared as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::FieldMissing`] when the struct has no such
    /// field and [`XCopyErrorKind::TypeMismatch`] when `value` is not of the
    /// declared field type.
    pub fn set_field(&mut self, name: &str, value: Self) -> XCopyResult<()> {
        let target = self.materialize();
        let ty = target.ty.clone();
        let missing = || {
            XCopyError::unrooted(XCopyErrorKind::FieldMissing {
                field: name.to_owned(),
                target: ty.to_string(),
            })
        };
        let fields = ty.struct_fields().ok_or_else(missing)?;
        let position = fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(missing)?;
        let declared = fields.get(position).map(|f| f.ty()).ok_or_else(missing)?;
        if *declared != value.ty {
            return Err(XCopyError::unrooted(XCopyErrorKind::TypeMismatch {
                found: value.ty.to_string(),
                expected: declared.to_string(),
            }));
        }
        match &mut target.data {
            Data::Struct(values) => {
                let slot = values.get_mut(position).ok_or_else(missing)?;
                *slot = value;
                Ok(())
            }
            _ => Err(missing()),
        }
    }

    /// Builder-style variant of [`Value::set_field`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Value::set_field`].
    pub fn with_field(mut self, name: &str, value: impl Into<Self>) -> XCopyResult<Self> {
        self.set_field(name, value.into())?;
        Ok(self)
    }

    /// Entry stored under `key` in a mapping.
    #[must_use]
    pub fn get(&self, key: &Self) -> Option<&Self> {
        match &self.resolve()?.data {
            Data::Map(entries) => entries.get(&MapKey::from(key.clone())),
            _ => None,
        }
    }

    /// Inserts an entry into a mapping, returning the displaced value.
    ///
    /// Values bound for an `any`-valued mapping are boxed first.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::TypeMismatch`] when `self` is not a mapping
    /// or the key or value is not of the declared type.
    pub fn insert(&mut self, key: Self, value: Self) -> XCopyResult<Option<Self>> {
        let target = self.materialize();
        let mismatch = |found: &Type, expected: &Type| {
            XCopyError::unrooted(XCopyErrorKind::TypeMismatch {
                found: found.to_string(),
                expected: expected.to_string(),
            })
        };
        let Some((key_ty, value_ty)) = target.ty.map_types() else {
            return Err(mismatch(&key.ty, &target.ty));
        };
        if key.ty != *key_ty {
            return Err(mismatch(&key.ty, key_ty));
        }
        let value = if value_ty.is_any() {
            Self::any_of(value_ty, value)
        } else {
            value
        };
        if value.ty != *value_ty {
            return Err(mismatch(&value.ty, value_ty));
        }
        match &mut target.data {
            Data::Map(entries) => Ok(entries.insert(MapKey::from(key), value)),
            _ => Err(mismatch(&value.ty, &target.ty)),
        }
    }

    /// Builder-style variant of [`Value::insert`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Value::insert`].
    pub fn with_entry(mut self, key: impl Into<Self>, value: impl Into<Self>) -> XCopyResult<Self> {
        self.insert(key.into(), value.into())?;
        Ok(self)
    }

    /// Element at `index` of a sequence or array.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Self> {
        match &self.resolve()?.data {
            Data::Seq(items) => items.get(index),
            _ => None,
        }
    }

    /// Number of entries, elements or fields.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.resolve().map(|v| &v.data) {
            Some(Data::Map(entries)) => entries.len(),
            Some(Data::Seq(items) | Data::Struct(items)) => items.len(),
            _ => 0,
        }
    }

    /// Whether [`Value::len`] is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a struct value from field values in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::Decode`] when the count or a field type does
    /// not match the declaration.
    pub fn from_struct_fields(ty: Type, fields: Vec<Self>) -> XCopyResult<Self> {
        Self::new(ty, Data::Struct(fields))
    }

    /// Consumes a struct value, returning its field values in declaration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::Decode`] when the value is not a struct.
    pub fn into_struct_fields(self) -> XCopyResult<Vec<Self>> {
        match self.data {
            Data::Struct(fields) => Ok(fields),
            other => Err(XCopyError::unrooted(XCopyErrorKind::Decode {
                found: data_label(&other).to_owned(),
                expected: self.ty.to_string(),
            })),
        }
    }
}

const fn zero_scalar(kind: ScalarKind) -> Data {
    match kind {
        ScalarKind::Bool => Data::Bool(false),
        ScalarKind::I8 | ScalarKind::I16 | ScalarKind::I32 | ScalarKind::I64 => Data::Int(0),
        ScalarKind::U8 | ScalarKind::U16 | ScalarKind::U32 | ScalarKind::U64 => Data::Uint(0),
        ScalarKind::F32 | ScalarKind::F64 => Data::Float(0.0),
        ScalarKind::String => Data::Str(String::new()),
        ScalarKind::Any => Data::Any(None),
    }
}

pub(crate) const fn data_label(data: &Data) -> &'static str {
    match data {
        Data::Bool(_) => "bool",
        Data::Int(_) => "signed integer",
        Data::Uint(_) => "unsigned integer",
        Data::Float(_) => "float",
        Data::Str(_) => "string",
        Data::Any(_) => "any",
        Data::Struct(_) => "struct",
        Data::Map(_) => "mapping",
        Data::Seq(_) => "sequence",
        Data::Option(_) => "option",
    }
}

fn conforms(ty: &Type, data: &Data) -> bool {
    match (ty.kind(), data) {
        (TypeKind::Scalar(ScalarKind::Bool), Data::Bool(_))
        | (TypeKind::Scalar(ScalarKind::String), Data::Str(_))
        | (TypeKind::Scalar(ScalarKind::Any), Data::Any(_)) => true,
        (TypeKind::Scalar(kind), Data::Int(_)) => kind.is_signed(),
        (TypeKind::Scalar(kind), Data::Uint(_)) => kind.is_unsigned(),
        (TypeKind::Scalar(kind), Data::Float(_)) => kind.is_float(),
        (TypeKind::Struct(fields), Data::Struct(values)) => {
            fields.len() == values.len()
                && fields.iter().zip(values).all(|(f, v)| *f.ty() == v.ty)
        }
        (TypeKind::Map { key, value }, Data::Map(entries)) => entries
            .iter()
            .all(|(k, v)| k.value().ty == *key && v.ty == *value),
        (TypeKind::Seq(elem), Data::Seq(items)) => items.iter().all(|v| v.ty == *elem),
        (TypeKind::Array { elem, len }, Data::Seq(items)) => {
            items.len() == *len && items.iter().all(|v| v.ty == *elem)
        }
        (TypeKind::Option(inner), Data::Option(value)) => {
            value.as_deref().is_none_or(|v| v.ty == *inner)
        }
        _ => false,
    }
}

macro_rules! scalar_from {
    ($($rust:ty => $ctor:ident, $variant:ident, $conv:expr;)*) => {
        $(
            impl From<$rust> for Value {
                fn from(value: $rust) -> Self {
                    Self {
                        ty: Type::$ctor(),
                        data: Data::$variant($conv(value)),
                    }
                }
            }
        )*
    };
}

scalar_from! {
    bool => bool, Bool, std::convert::identity;
    i8 => i8, Int, i64::from;
    i16 => i16, Int, i64::from;
    i32 => i32, Int, i64::from;
    i64 => i64, Int, std::convert::identity;
    u8 => u8, Uint, u64::from;
    u16 => u16, Uint, u64::from;
    u32 => u32, Uint, u64::from;
    u64 => u64, Uint, std::convert::identity;
    f32 => f32, Float, f64::from;
    f64 => f64, Float, std::convert::identity;
    String => string, Str, std::convert::identity;
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

#[cfg(test)]
mod tests;
