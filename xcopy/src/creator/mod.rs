//! Destination builders, one per shape.
//!
//! A creator owns the destination of a single copy step. It is optionally
//! seeded with an existing value, receives field writes from the engine and
//! finally hands back the built value. Storage is allocated lazily, on the
//! first write that needs it.

mod mapping;
mod primitive;
mod sequence;
mod structure;

use crate::{
    config::CopyFlags,
    context::{Context, FieldId},
    engine::Engine,
    error::{NotSettable, XCopyError, XCopyErrorKind, XCopyResult},
    ty::{Shape, Type},
    value::Value,
};

/// Existing destination value handed to a creator.
pub(crate) enum Existing<'d> {
    /// Owned by the caller and writable in place.
    Mutable(&'d mut Value),
    /// Readable only; writing requires a duplicate.
    Shared(&'d Value),
}

impl Existing<'_> {
    fn value(&self) -> &Value {
        match self {
            Self::Mutable(value) => value,
            Self::Shared(value) => value,
        }
    }
}

/// Outcome of a copy step.
#[derive(Debug)]
pub(crate) enum Built {
    /// A freshly built or duplicated value.
    Value(Value),
    /// The existing value was updated where it lives.
    InPlace,
}

impl Built {
    pub(crate) fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::InPlace => None,
        }
    }

    /// Moves a built value into `slot`; in-place results are already there.
    pub(crate) fn store(self, slot: &mut Value) {
        if let Self::Value(value) = self {
            *slot = value;
        }
    }
}

/// How a creator reacts to a shared existing value under overwrite.
#[derive(Clone, Copy, Debug)]
pub(crate) enum SeedPolicy {
    /// Duplicate only with `ALLOW_DUPLICATING_IF_NOT_SETTABLE`, else fail
    /// with the given cause.
    Composite(NotSettable),
    /// Duplicate unless `DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE`, else
    /// bind read-only and fail on the first write.
    Primitive,
}

/// Destination storage of a creator.
pub(crate) enum Slot<'d> {
    /// Nothing allocated yet.
    Empty,
    /// A value owned by the creator.
    Owned(Value),
    /// The caller's value, written in place.
    InPlace(&'d mut Value),
    /// A shared value that must not be written.
    ReadOnly(&'d Value),
}

impl<'d> Slot<'d> {
    pub(crate) fn seed(
        ty: &Type,
        existing: Existing<'d>,
        flags: CopyFlags,
        policy: SeedPolicy,
        ctx: &Context,
    ) -> XCopyResult<Self> {
        let current = existing.value();
        if current.ty() != ty {
            return Err(XCopyError::at(
                XCopyErrorKind::TypeMismatch {
                    found: current.ty().to_string(),
                    expected: ty.to_string(),
                },
                ctx,
            ));
        }
        if !flags.contains(CopyFlags::OVERWRITE_EXISTING) {
            return Ok(Self::Owned(current.clone()));
        }
        match (existing, policy) {
            (Existing::Mutable(value), _) => Ok(Self::InPlace(value)),
            (Existing::Shared(value), SeedPolicy::Composite(cause)) => {
                if flags.contains(CopyFlags::ALLOW_DUPLICATING_IF_NOT_SETTABLE) || value.is_nil() {
                    Ok(Self::Owned(value.clone()))
                } else {
                    Err(XCopyError::not_settable(cause, ctx))
                }
            }
            (Existing::Shared(value), SeedPolicy::Primitive) => {
                if flags.contains(CopyFlags::DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE) {
                    Ok(Self::ReadOnly(value))
                } else {
                    Ok(Self::Owned(value.clone()))
                }
            }
        }
    }

    /// Writable destination, allocating the zero value of `ty` and filling
    /// absent optional layers on first use.
    pub(crate) fn target(&mut self, ty: &Type) -> Option<&mut Value> {
        if matches!(self, Self::Empty) {
            *self = Self::Owned(Value::zero(ty));
        }
        match self {
            Self::Owned(value) => Some(value.materialize()),
            Self::InPlace(value) => Some(value.materialize()),
            Self::Empty | Self::ReadOnly(_) => None,
        }
    }

    pub(crate) fn finish(self, ty: &Type) -> Built {
        match self {
            Self::Empty => Built::Value(Value::zero(ty)),
            Self::Owned(value) => Built::Value(value),
            Self::InPlace(_) => Built::InPlace,
            Self::ReadOnly(value) => Built::Value(value.clone()),
        }
    }
}

/// Builds a destination value of one shape.
pub(crate) trait Creator<'d> {
    /// Destination type, possibly optional.
    fn ty(&self) -> &Type;

    /// Destination shape after resolving optional layers.
    fn shape(&self) -> Shape;

    /// Starts from `existing` instead of an empty destination.
    fn seed(&mut self, engine: &Engine<'_>, ctx: &Context, existing: Existing<'d>) -> XCopyResult<()>;

    /// Assigns `source` wholesale when no field-by-field walk is needed.
    fn try_set_whole(&mut self, engine: &Engine<'_>, ctx: &Context, source: &Value) -> XCopyResult<bool> {
        let _ = (engine, ctx, source);
        Ok(false)
    }

    /// Writes `source` under `field`, or as the whole value when `field` is
    /// `None`.
    fn set_field(
        &mut self,
        engine: &Engine<'_>,
        ctx: &mut Context,
        field: Option<&FieldId>,
        source: &Value,
    ) -> XCopyResult<()>;

    /// Hands back the result.
    fn finish(self: Box<Self>) -> Built;
}

/// Picks the creator matching the shape of `ty`.
pub(crate) fn creator_for<'d>(ty: &Type) -> Box<dyn Creator<'d> + 'd> {
    match ty.shape() {
        Shape::Struct => Box::new(structure::StructCreator::new(ty)),
        Shape::Mapping => Box::new(mapping::MapCreator::new(ty)),
        Shape::Sequence => Box::new(sequence::SeqCreator::new(ty)),
        Shape::Scalar => Box::new(primitive::PrimitiveCreator::new(ty)),
    }
}

/// Error for a field identifier the destination cannot address.
fn field_required(ty: &Type, ctx: &Context) -> XCopyError {
    XCopyError::at(
        XCopyErrorKind::UnsupportedShape {
            from: Shape::Scalar,
            target: ty.to_string(),
        },
        ctx,
    )
}
