//! Scalar destinations, including `any` slots.

use super::{Built, Creator, Existing, SeedPolicy, Slot};
use crate::{
    context::{Context, FieldId},
    engine::Engine,
    error::{NotSettable, XCopyError, XCopyErrorKind, XCopyResult},
    result_ext::XCopyResultExt,
    ty::{Shape, Type},
    value::Value,
};

pub(super) struct PrimitiveCreator<'d> {
    ty: Type,
    slot: Slot<'d>,
}

impl PrimitiveCreator<'_> {
    pub(super) fn new(ty: &Type) -> Self {
        Self {
            ty: ty.clone(),
            slot: Slot::Empty,
        }
    }

    fn assign(&mut self, ctx: &Context, value: Value) -> XCopyResult<()> {
        if matches!(self.slot, Slot::Empty) {
            self.slot = Slot::Owned(value);
            return Ok(());
        }
        match &mut self.slot {
            Slot::Owned(current) => *current = value,
            Slot::InPlace(current) => **current = value,
            Slot::ReadOnly(current) => {
                let cause = if current.is_nil() {
                    NotSettable::PrimitiveDestinationNil
                } else if value.is_nil() {
                    NotSettable::PrimitiveSourceNil
                } else {
                    NotSettable::Primitive
                };
                return Err(XCopyError::not_settable(cause, ctx));
            }
            Slot::Empty => {}
        }
        Ok(())
    }
}

impl<'d> Creator<'d> for PrimitiveCreator<'d> {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn shape(&self) -> Shape {
        Shape::Scalar
    }

    fn seed(&mut self, engine: &Engine<'_>, ctx: &Context, existing: Existing<'d>) -> XCopyResult<()> {
        self.slot = Slot::seed(
            &self.ty,
            existing,
            engine.config().flags(),
            SeedPolicy::Primitive,
            ctx,
        )?;
        Ok(())
    }

    fn try_set_whole(&mut self, _engine: &Engine<'_>, ctx: &Context, source: &Value) -> XCopyResult<bool> {
        let value = if self.ty.is_any() {
            Value::any_of(&self.ty, source.clone())
        } else if *source.ty() == self.ty {
            source.clone()
        } else {
            return Ok(false);
        };
        self.assign(ctx, value)?;
        Ok(true)
    }

    fn set_field(
        &mut self,
        engine: &Engine<'_>,
        ctx: &mut Context,
        field: Option<&FieldId>,
        source: &Value,
    ) -> XCopyResult<()> {
        if let Some(field) = field {
            return Err(XCopyError::at(
                XCopyErrorKind::IndexedPrimitive {
                    field: engine.label(field),
                    target: self.ty.to_string(),
                },
                ctx,
            ));
        }
        let converted = engine.config().converter().convert(source, &self.ty).at(ctx)?;
        self.assign(ctx, converted)
    }

    fn finish(self: Box<Self>) -> Built {
        let Self { ty, slot } = *self;
        slot.finish(&ty)
    }
}
