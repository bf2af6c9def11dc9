//! Mapping destinations.

use super::{Built, Creator, Existing, SeedPolicy, Slot, field_required};
use crate::{
    config::CopyFlags,
    context::{Context, FieldId},
    engine::Engine,
    error::{NotSettable, XCopyError, XCopyResult},
    result_ext::XCopyResultExt,
    ty::{Shape, Type},
    value::{Data, MapKey, Value},
};

pub(super) struct MapCreator<'d> {
    ty: Type,
    slot: Slot<'d>,
}

impl MapCreator<'_> {
    pub(super) fn new(ty: &Type) -> Self {
        Self {
            ty: ty.clone(),
            slot: Slot::Empty,
        }
    }
}

impl<'d> Creator<'d> for MapCreator<'d> {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn seed(&mut self, engine: &Engine<'_>, ctx: &Context, existing: Existing<'d>) -> XCopyResult<()> {
        self.slot = Slot::seed(
            &self.ty,
            existing,
            engine.config().flags(),
            SeedPolicy::Composite(NotSettable::Mapping),
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
        let resolved = self.ty.resolve().clone();
        let Some((key_ty, value_ty)) = resolved.map_types() else {
            return Err(field_required(&self.ty, ctx));
        };
        let key = engine
            .config()
            .converter()
            .convert(&field.to_value(), key_ty)
            .at(ctx)?;

        // `any`-valued mappings receive nested composites as mappings of
        // their own type.
        let widened = value_ty.is_any()
            && !engine
                .config()
                .has_flags(CopyFlags::DISABLE_MAP_OF_ANY_TARGET_RECURSION)
            && source.shape().has_fields();
        let entry_ty = if widened { &resolved } else { value_ty };

        let Some(target) = self.slot.target(&self.ty) else {
            return Err(XCopyError::not_settable(NotSettable::Mapping, ctx));
        };
        let Data::Map(entries) = target.data_mut() else {
            return Err(field_required(&self.ty, ctx));
        };
        let key = MapKey::from(key);
        let existing = entries.get(&key).and_then(|current| {
            if widened {
                current.any_inner_of(entry_ty)
            } else {
                Some(current)
            }
        });
        let built = engine.copy_value(ctx, source, entry_ty, existing.map(Existing::Shared))?;
        if let Some(value) = built.into_value() {
            let value = if widened {
                Value::any_of(value_ty, value)
            } else {
                value
            };
            entries.insert(key, value);
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Built {
        let Self { ty, slot } = *self;
        slot.finish(&ty)
    }
}
