//! Sequence and fixed-length array destinations.

use super::{Built, Creator, Existing, SeedPolicy, Slot, field_required};
use crate::{
    context::{Context, FieldId},
    engine::Engine,
    error::{NotSettable, XCopyError, XCopyErrorKind, XCopyResult},
    result_ext::XCopyResultExt,
    ty::{Shape, Type},
    value::{Data, Value},
};

pub(super) struct SeqCreator<'d> {
    ty: Type,
    slot: Slot<'d>,
}

impl SeqCreator<'_> {
    pub(super) fn new(ty: &Type) -> Self {
        Self {
            ty: ty.clone(),
            slot: Slot::Empty,
        }
    }

    fn index_of(engine: &Engine<'_>, ctx: &Context, field: &FieldId) -> XCopyResult<usize> {
        if let FieldId::Index(index) = field {
            return Ok(*index);
        }
        let converted = engine
            .config()
            .converter()
            .convert(&field.to_value(), &Type::u64())
            .at(ctx)?;
        converted
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                XCopyError::at(
                    XCopyErrorKind::IndexOutOfBounds {
                        index: usize::MAX,
                        len: 0,
                    },
                    ctx,
                )
            })
    }
}

impl<'d> Creator<'d> for SeqCreator<'d> {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn seed(&mut self, engine: &Engine<'_>, ctx: &Context, existing: Existing<'d>) -> XCopyResult<()> {
        self.slot = Slot::seed(
            &self.ty,
            existing,
            engine.config().flags(),
            SeedPolicy::Composite(NotSettable::Sequence),
            ctx,
        )?;
        Ok(())
    }

    fn set_field(
        &mut self,
        engine: &Engine<'_>,
        ctx: &mut Context,
        field: Option<&FieldId>,
        source: &Value,
    ) -> XCopyResult<()> {
        let Some(field) = field else {
            return Err(field_required(&self.ty, ctx));
        };
        let index = Self::index_of(engine, ctx, field)?;
        let resolved = self.ty.resolve().clone();
        let Some(elem_ty) = resolved.element() else {
            return Err(field_required(&self.ty, ctx));
        };
        let fixed_len = resolved.fixed_len();

        let Some(target) = self.slot.target(&self.ty) else {
            return Err(XCopyError::not_settable(NotSettable::Sequence, ctx));
        };
        let Data::Seq(items) = target.data_mut() else {
            return Err(field_required(&self.ty, ctx));
        };
        if index >= items.len() {
            if let Some(len) = fixed_len {
                return Err(XCopyError::at(
                    XCopyErrorKind::IndexOutOfBounds { index, len },
                    ctx,
                ));
            }
            let len = items.len();
            let out_of_bounds =
                || XCopyError::at(XCopyErrorKind::IndexOutOfBounds { index, len }, ctx);
            let wanted = index.checked_add(1).ok_or_else(out_of_bounds)?;
            items
                .try_reserve(wanted - len)
                .map_err(|_| out_of_bounds())?;
            items.resize_with(wanted, || Value::zero(elem_ty));
        }
        let Some(slot) = items.get_mut(index) else {
            return Err(field_required(&self.ty, ctx));
        };
        let built = engine.copy_value(ctx, source, elem_ty, Some(Existing::Mutable(&mut *slot)))?;
        built.store(slot);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Built {
        let Self { ty, slot } = *self;
        slot.finish(&ty)
    }
}
