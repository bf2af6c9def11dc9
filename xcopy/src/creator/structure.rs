//! Struct destinations.

use super::{Built, Creator, Existing, SeedPolicy, Slot, field_required};
use crate::{
    config::CopyFlags,
    context::{Context, FieldId},
    engine::Engine,
    error::{NotSettable, XCopyError, XCopyErrorKind, XCopyResult},
    tag,
    ty::{Shape, Type},
    value::{Data, Value},
};

pub(super) struct StructCreator<'d> {
    ty: Type,
    slot: Slot<'d>,
}

impl StructCreator<'_> {
    pub(super) fn new(ty: &Type) -> Self {
        Self {
            ty: ty.clone(),
            slot: Slot::Empty,
        }
    }
}

impl<'d> Creator<'d> for StructCreator<'d> {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn shape(&self) -> Shape {
        Shape::Struct
    }

    fn seed(&mut self, engine: &Engine<'_>, ctx: &Context, existing: Existing<'d>) -> XCopyResult<()> {
        self.slot = Slot::seed(
            &self.ty,
            existing,
            engine.config().flags(),
            SeedPolicy::Composite(NotSettable::Struct),
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
        let name = engine.field_name(field, ctx)?;
        let resolved = self.ty.resolve().clone();
        let defs = resolved.struct_fields().unwrap_or_default();
        let tag_name = engine.config().struct_tag_name();
        let found = defs
            .iter()
            .enumerate()
            .find(|(_, def)| tag::effective_name(def, tag_name) == Some(name.as_str()));
        let Some((position, def)) = found else {
            if engine.config().has_flags(CopyFlags::ERROR_IF_STRUCT_FIELD_MISSING) {
                return Err(XCopyError::at(
                    XCopyErrorKind::FieldMissing {
                        field: name,
                        target: resolved.to_string(),
                    },
                    ctx,
                ));
            }
            tracing::trace!(field = %name, target = %resolved, "no matching destination field");
            return Ok(());
        };
        if !def.is_exported() {
            return Err(XCopyError::not_settable(NotSettable::StructField, ctx));
        }

        let Some(target) = self.slot.target(&self.ty) else {
            return Err(XCopyError::not_settable(NotSettable::Struct, ctx));
        };
        let Data::Struct(values) = target.data_mut() else {
            return Err(field_required(&self.ty, ctx));
        };
        let Some(slot) = values.get_mut(position) else {
            return Err(field_required(&self.ty, ctx));
        };
        let built = engine.copy_value(ctx, source, def.ty(), Some(Existing::Mutable(&mut *slot)))?;
        built.store(slot);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Built {
        let Self { ty, slot } = *self;
        slot.finish(&ty)
    }
}
