//! Error enums and the path-carrying wrapper.

use std::fmt;

use thiserror::Error;

use crate::{context::FieldPath, convert::ConvertError, ty::Shape};

/// Why a destination could not be written.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotSettable {
    /// A shared struct under overwrite without permission to duplicate.
    #[error("struct is not settable and duplicating is not allowed")]
    Struct,
    /// A matching struct field that is not exported.
    #[error("struct field is not exported and cannot be set")]
    StructField,
    /// A shared mapping under overwrite without permission to duplicate.
    #[error("mapping is not settable and duplicating is not allowed")]
    Mapping,
    /// A shared sequence under overwrite without permission to duplicate.
    #[error("sequence is not settable and duplicating is not allowed")]
    Sequence,
    /// A shared primitive under overwrite with duplication denied.
    #[error("primitive is not settable and duplicating is denied")]
    Primitive,
    /// As [`NotSettable::Primitive`], where the existing value is nil.
    #[error("primitive is not settable and the destination value is nil")]
    PrimitiveDestinationNil,
    /// As [`NotSettable::Primitive`], where the converted source is nil.
    ///
    /// Nil sources never reach the converter, so this needs a custom
    /// [`Converter`](crate::Converter) that maps a present value to nil.
    #[error("primitive is not settable and the source value is nil")]
    PrimitiveSourceNil,
}

/// Cause of an [`XCopyError`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum XCopyErrorKind {
    /// Source and destination shapes cannot be combined.
    #[error("cannot copy a {from} value into {target}")]
    UnsupportedShape {
        /// Shape of the resolved source.
        from: Shape,
        /// Rendered destination type.
        target: String,
    },

    /// An existing value does not have the destination type.
    #[error("existing value of type {found} does not match destination type {expected}")]
    TypeMismatch {
        /// Rendered type of the existing value.
        found: String,
        /// Rendered destination type.
        expected: String,
    },

    /// The destination cannot be written.
    #[error(transparent)]
    NotSettable(#[from] NotSettable),

    /// No destination field matches a source field.
    #[error("field {field} is missing on {target}")]
    FieldMissing {
        /// Name looked up on the destination.
        field: String,
        /// Rendered destination struct type.
        target: String,
    },

    /// A scalar or key could not be converted.
    #[error(transparent)]
    Conversion(#[from] ConvertError),

    /// A merge was requested without any source.
    #[error("merge requires at least one source")]
    MergeArity,

    /// A primitive destination was addressed with a field identifier.
    #[error("cannot set field {field} on primitive {target}")]
    IndexedPrimitive {
        /// Rendered field identifier.
        field: String,
        /// Rendered destination type.
        target: String,
    },

    /// A write addressed a position past the end of a fixed-length array, or
    /// one a growable sequence cannot be extended to reach.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Declared array length.
        len: usize,
    },

    /// A dynamic value could not be decoded into a Rust type.
    #[error("cannot decode {found} as {expected}")]
    Decode {
        /// Description of the value found.
        found: String,
        /// Rendered expected type.
        expected: String,
    },
}

/// An error raised during a copy, with the field path where it happened.
///
/// Renders as the cause alone at the root, or as `cause [A.B.C]` when the
/// failure happened below it.
#[derive(Clone, Debug, PartialEq)]
pub struct XCopyError {
    pub(super) kind: XCopyErrorKind,
    pub(super) path: FieldPath,
}

impl fmt::Display for XCopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} [{}]", self.kind, self.path)
        }
    }
}

impl std::error::Error for XCopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
