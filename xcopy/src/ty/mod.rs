//! Runtime type descriptors.
//!
//! Rust has no runtime reflection, so every value handled by the copy engine
//! carries a [`Type`] describing its structure. Descriptors are cheap to clone
//! (`Arc`-backed) and compare structurally, with an optional nominal name so
//! that two distinct types with the same layout can be told apart.

use std::{fmt, sync::Arc};

/// Structural classification used to pick a copy strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Shape {
    /// Named fields in declaration order.
    Struct,
    /// Unique keys mapped to values.
    Mapping,
    /// Index-addressed elements, growable or fixed length.
    Sequence,
    /// Booleans, numbers, strings and the opaque `any` slot.
    Scalar,
}

impl Shape {
    /// Whether values of this shape are built from sub-fields.
    #[must_use]
    pub const fn has_fields(self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Struct => "struct",
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// Scalar kinds understood by the converter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// UTF-8 string.
    String,
    /// Opaque slot able to hold a value of any type.
    Any,
}

impl ScalarKind {
    /// Lower-case name used when rendering types.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Any => "any",
        }
    }

    /// Whether the kind is a signed integer.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Whether the kind is an unsigned integer.
    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Whether the kind is a floating point number.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Structure of a [`Type`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeKind {
    /// A scalar leaf.
    Scalar(ScalarKind),
    /// A struct with ordered fields.
    Struct(Vec<FieldDef>),
    /// A mapping from `key` to `value`.
    Map {
        /// Key type; keys are compared by value.
        key: Type,
        /// Value type.
        value: Type,
    },
    /// A growable sequence.
    Seq(Type),
    /// A fixed-length sequence.
    Array {
        /// Element type.
        elem: Type,
        /// Number of elements.
        len: usize,
    },
    /// One layer of optional indirection.
    Option(Type),
}

#[derive(Debug, Eq, PartialEq)]
struct TypeDef {
    name: Option<String>,
    kind: TypeKind,
}

/// Shared, immutable type descriptor.
#[derive(Clone)]
pub struct Type(Arc<TypeDef>);

impl Type {
    fn from_kind(kind: TypeKind) -> Self {
        Self(Arc::new(TypeDef { name: None, kind }))
    }

    /// A scalar type of the given kind.
    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::from_kind(TypeKind::Scalar(kind))
    }

    /// `bool`.
    #[must_use]
    pub fn bool() -> Self {
        Self::scalar(ScalarKind::Bool)
    }

    /// `i8`.
    #[must_use]
    pub fn i8() -> Self {
        Self::scalar(ScalarKind::I8)
    }

    /// `i16`.
    #[must_use]
    pub fn i16() -> Self {
        Self::scalar(ScalarKind::I16)
    }

    /// `i32`.
    #[must_use]
    pub fn i32() -> Self {
        Self::scalar(ScalarKind::I32)
    }

    /// `i64`.
    #[must_use]
    pub fn i64() -> Self {
        Self::scalar(ScalarKind::I64)
    }

    /// `u8`.
    #[must_use]
    pub fn u8() -> Self {
        Self::scalar(ScalarKind::U8)
    }

    /// `u16`.
    #[must_use]
    pub fn u16() -> Self {
        Self::scalar(ScalarKind::U16)
    }

    /// `u32`.
    #[must_use]
    pub fn u32() -> Self {
        Self::scalar(ScalarKind::U32)
    }

    /// `u64`.
    #[must_use]
    pub fn u64() -> Self {
        Self::scalar(ScalarKind::U64)
    }

    /// `f32`.
    #[must_use]
    pub fn f32() -> Self {
        Self::scalar(ScalarKind::F32)
    }

    /// `f64`.
    #[must_use]
    pub fn f64() -> Self {
        Self::scalar(ScalarKind::F64)
    }

    /// UTF-8 string.
    #[must_use]
    pub fn string() -> Self {
        Self::scalar(ScalarKind::String)
    }

    /// The universal `any` slot.
    #[must_use]
    pub fn any() -> Self {
        Self::scalar(ScalarKind::Any)
    }

    /// Mapping from `key` to `value`.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::from_kind(TypeKind::Map { key, value })
    }

    /// Growable sequence of `elem`.
    #[must_use]
    pub fn seq(elem: Self) -> Self {
        Self::from_kind(TypeKind::Seq(elem))
    }

    /// Fixed-length sequence of `len` elements.
    #[must_use]
    pub fn array(elem: Self, len: usize) -> Self {
        Self::from_kind(TypeKind::Array { elem, len })
    }

    /// Optional indirection to `inner`.
    #[must_use]
    pub fn option(inner: Self) -> Self {
        Self::from_kind(TypeKind::Option(inner))
    }

    /// Starts building a named struct type.
    ///
    /// # Examples
    ///
    /// ```
    /// use xcopy::{FieldDef, Type};
    ///
    /// let point = Type::structure("Point")
    ///     .field(FieldDef::new("X", Type::i64()))
    ///     .field(FieldDef::new("Y", Type::i64()))
    ///     .finish();
    /// assert_eq!(point.struct_fields().map(<[FieldDef]>::len), Some(2));
    /// ```
    #[must_use]
    pub fn structure(name: impl Into<String>) -> StructBuilder {
        StructBuilder {
            name: Some(name.into()),
            fields: Vec::new(),
        }
    }

    /// Starts building an anonymous struct type.
    #[must_use]
    pub const fn anonymous_struct() -> StructBuilder {
        StructBuilder {
            name: None,
            fields: Vec::new(),
        }
    }

    /// Gives `ty` a nominal name, keeping its structure.
    ///
    /// Two named types are equal only when both name and structure match.
    #[must_use]
    pub fn named(name: impl Into<String>, ty: &Self) -> Self {
        Self(Arc::new(TypeDef {
            name: Some(name.into()),
            kind: ty.0.kind.clone(),
        }))
    }

    /// Nominal name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Structure of the type.
    #[must_use]
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// Strips every optional layer.
    #[must_use]
    pub fn resolve(&self) -> &Self {
        match self.kind() {
            TypeKind::Option(inner) => inner.resolve(),
            _ => self,
        }
    }

    /// Shape after resolving optional layers.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self.resolve().kind() {
            TypeKind::Scalar(_) => Shape::Scalar,
            TypeKind::Struct(_) => Shape::Struct,
            TypeKind::Map { .. } => Shape::Mapping,
            TypeKind::Seq(_) | TypeKind::Array { .. } => Shape::Sequence,
            // resolve() never stops on an option layer
            TypeKind::Option(_) => Shape::Scalar,
        }
    }

    /// Scalar kind when this type is a scalar.
    #[must_use]
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.kind() {
            TypeKind::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether the type is the `any` slot.
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self.scalar_kind(), Some(ScalarKind::Any))
    }

    /// Whether the type is an optional layer.
    #[must_use]
    pub fn is_option(&self) -> bool {
        matches!(self.kind(), TypeKind::Option(_))
    }

    /// Inner type of an optional layer.
    #[must_use]
    pub fn option_inner(&self) -> Option<&Self> {
        match self.kind() {
            TypeKind::Option(inner) => Some(inner),
            _ => None,
        }
    }

    /// Fields of a struct type.
    #[must_use]
    pub fn struct_fields(&self) -> Option<&[FieldDef]> {
        match self.kind() {
            TypeKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Element type of a sequence or array.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self.kind() {
            TypeKind::Seq(elem) | TypeKind::Array { elem, .. } => Some(elem),
            _ => None,
        }
    }

    /// Fixed length of an array type.
    #[must_use]
    pub fn fixed_len(&self) -> Option<usize> {
        match self.kind() {
            TypeKind::Array { len, .. } => Some(*len),
            _ => None,
        }
    }

    /// Key and value types of a mapping.
    #[must_use]
    pub fn map_types(&self) -> Option<(&Self, &Self)> {
        match self.kind() {
            TypeKind::Map { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        match self.kind() {
            TypeKind::Scalar(kind) => f.write_str(kind.name()),
            TypeKind::Struct(fields) => {
                f.write_str("struct {")?;
                for (i, field) in fields.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{}: {}", field.name(), field.ty())?;
                }
                f.write_str(" }")
            }
            TypeKind::Map { key, value } => write!(f, "map<{key}, {value}>"),
            TypeKind::Seq(elem) => write!(f, "seq<{elem}>"),
            TypeKind::Array { elem, len } => write!(f, "[{elem}; {len}]"),
            TypeKind::Option(inner) => write!(f, "option<{inner}>"),
        }
    }
}

/// A struct field declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDef {
    name: String,
    ty: Type,
    exported: bool,
    tags: Vec<(String, String)>,
}

impl FieldDef {
    /// An exported field with no tags.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            exported: true,
            tags: Vec::new(),
        }
    }

    /// Marks the field as unexported; the engine neither reads nor writes it.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Attaches a tag directive, replacing any previous value for `tag`.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        let tag = tag.into();
        let value = value.into();
        match self.tags.iter_mut().find(|(name, _)| *name == tag) {
            Some(entry) => entry.1 = value,
            None => self.tags.push((tag, value)),
        }
        self
    }

    /// Declared field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared field type.
    #[must_use]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Whether the engine may read and write this field.
    #[must_use]
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Raw tag value stored under `tag`.
    #[must_use]
    pub fn tag(&self, tag: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, value)| value.as_str())
    }
}

/// Builder returned by [`Type::structure`].
#[derive(Debug)]
#[must_use = "call `finish` to obtain the struct type"]
pub struct StructBuilder {
    name: Option<String>,
    fields: Vec<FieldDef>,
}

impl StructBuilder {
    /// Appends a field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Finalises the struct type.
    #[must_use]
    pub fn finish(self) -> Type {
        Type(Arc::new(TypeDef {
            name: self.name,
            kind: TypeKind::Struct(self.fields),
        }))
    }
}

#[cfg(test)]
mod tests;
