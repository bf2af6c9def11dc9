//! Source walk driving the creators.

use crate::{
    callback::Callback,
    config::Config,
    context::{Context, FieldId, UNKNOWN_SEGMENT},
    creator::{self, Built, Creator, Existing},
    error::{XCopyError, XCopyErrorKind, XCopyResult},
    result_ext::XCopyResultExt,
    tag,
    ty::{Shape, Type},
    value::{Data, Value},
};

/// One copy run bound to a configuration.
pub(crate) struct Engine<'c> {
    config: &'c Config,
}

impl<'c> Engine<'c> {
    pub(crate) const fn new(config: &'c Config) -> Self {
        Self { config }
    }

    pub(crate) const fn config(&self) -> &'c Config {
        self.config
    }

    /// Rendering of `id` used in paths and field-map lookups.
    pub(crate) fn label(&self, id: &FieldId) -> String {
        match id {
            FieldId::Name(name) => name.clone(),
            FieldId::Index(index) => index.to_string(),
            FieldId::Key(key) => self
                .config
                .converter()
                .to_string(key)
                .unwrap_or_else(|_| UNKNOWN_SEGMENT.to_owned()),
        }
    }

    /// Name addressed by `id` on a struct destination.
    pub(crate) fn field_name(&self, id: &FieldId, ctx: &Context) -> XCopyResult<String> {
        match id {
            FieldId::Name(name) => Ok(name.clone()),
            FieldId::Index(index) => Ok(index.to_string()),
            FieldId::Key(key) => self.config.converter().to_string(key).at(ctx),
        }
    }

    fn notify(&self, hook: impl FnOnce(&dyn Callback)) {
        if let Some(callback) = self.config.callback() {
            hook(callback);
        }
    }

    /// Copies `source` into a destination of type `dest`, starting from
    /// `existing` when given.
    pub(crate) fn copy_value<'d>(
        &self,
        ctx: &mut Context,
        source: &Value,
        dest: &Type,
        existing: Option<Existing<'d>>,
    ) -> XCopyResult<Built> {
        let building_new = existing.is_none();
        if building_new {
            self.notify(|cb| cb.begin_new(ctx, source, dest));
        }
        let result = self.build(ctx, source, dest, existing);
        if building_new {
            self.notify(|cb| cb.end_new(ctx, source, dest));
        }
        result
    }

    fn build<'d>(
        &self,
        ctx: &mut Context,
        source: &Value,
        dest: &Type,
        existing: Option<Existing<'d>>,
    ) -> XCopyResult<Built> {
        let mut creator = creator::creator_for(dest);
        tracing::trace!(
            path = %ctx.path(),
            dest = %dest,
            shape = %creator.shape(),
            "copying value"
        );
        if let Some(existing) = existing {
            creator.seed(self, ctx, existing)?;
        }
        let Some(resolved) = source.resolve() else {
            return Ok(creator.finish());
        };

        match (resolved.ty().shape(), creator.shape()) {
            (_, Shape::Scalar) => self.write_scalar(ctx, resolved, creator.as_mut())?,
            (Shape::Scalar, _) => {
                return Err(XCopyError::at(
                    XCopyErrorKind::UnsupportedShape {
                        from: Shape::Scalar,
                        target: dest.to_string(),
                    },
                    ctx,
                ));
            }
            (Shape::Struct, _) => self.walk_struct(ctx, resolved, creator.as_mut())?,
            (Shape::Mapping, _) => self.walk_map(ctx, resolved, creator.as_mut())?,
            (Shape::Sequence, _) => self.walk_seq(ctx, resolved, creator.as_mut())?,
        }
        Ok(creator.finish())
    }

    fn write_scalar<'d>(
        &self,
        ctx: &mut Context,
        source: &Value,
        creator: &mut (dyn Creator<'d> + 'd),
    ) -> XCopyResult<()> {
        let dest = creator.ty().clone();
        self.notify(|cb| cb.before_set_value(ctx, source, &dest));
        let result = self.assign_scalar(ctx, source, &dest, creator);
        self.notify(|cb| cb.after_set_value(ctx, source, &dest));
        result
    }

    fn assign_scalar<'d>(
        &self,
        ctx: &mut Context,
        source: &Value,
        dest: &Type,
        creator: &mut (dyn Creator<'d> + 'd),
    ) -> XCopyResult<()> {
        if creator.try_set_whole(self, ctx, source)? {
            return Ok(());
        }
        let from = source.ty().shape();
        if from.has_fields() && !dest.resolve().is_any() {
            return Err(XCopyError::at(
                XCopyErrorKind::UnsupportedShape {
                    from,
                    target: dest.to_string(),
                },
                ctx,
            ));
        }
        creator.set_field(self, ctx, None, source)
    }

    fn walk_struct<'d>(
        &self,
        ctx: &mut Context,
        source: &Value,
        creator: &mut (dyn Creator<'d> + 'd),
    ) -> XCopyResult<()> {
        let (Some(defs), Data::Struct(values)) = (source.ty().struct_fields(), source.data()) else {
            return Ok(());
        };
        let tag_name = self.config.struct_tag_name();
        for (def, value) in defs.iter().zip(values) {
            if !def.is_exported() {
                continue;
            }
            let Some(name) = tag::effective_name(def, tag_name) else {
                continue;
            };
            let name = self
                .config
                .field_map()
                .renamed(&ctx.path_appending(name))
                .unwrap_or(name);
            if name.is_empty() {
                continue;
            }
            self.write_field(ctx, creator, FieldId::Name(name.to_owned()), value)?;
        }
        Ok(())
    }

    fn walk_map<'d>(
        &self,
        ctx: &mut Context,
        source: &Value,
        creator: &mut (dyn Creator<'d> + 'd),
    ) -> XCopyResult<()> {
        let Data::Map(entries) = source.data() else {
            return Ok(());
        };
        for (key, value) in entries {
            let id = FieldId::Key(key.value().clone());
            let id = self.apply_field_map(ctx, id);
            self.write_field(ctx, creator, id, value)?;
        }
        Ok(())
    }

    fn walk_seq<'d>(
        &self,
        ctx: &mut Context,
        source: &Value,
        creator: &mut (dyn Creator<'d> + 'd),
    ) -> XCopyResult<()> {
        let Data::Seq(items) = source.data() else {
            return Ok(());
        };
        for (index, value) in items.iter().enumerate() {
            let id = self.apply_field_map(ctx, FieldId::Index(index));
            self.write_field(ctx, creator, id, value)?;
        }
        Ok(())
    }

    fn apply_field_map(&self, ctx: &Context, id: FieldId) -> FieldId {
        if self.config.field_map().is_empty() {
            return id;
        }
        let path = ctx.path_appending(&self.label(&id));
        match self.config.field_map().renamed(&path) {
            Some(name) => FieldId::Name(name.to_owned()),
            None => id,
        }
    }

    fn write_field<'d>(
        &self,
        ctx: &mut Context,
        creator: &mut (dyn Creator<'d> + 'd),
        id: FieldId,
        value: &Value,
    ) -> XCopyResult<()> {
        let label = self.label(&id);
        ctx.push(id.clone(), label);
        self.notify(|cb| cb.push_field(ctx, &id, value, creator.ty()));
        let result = creator.set_field(self, ctx, Some(&id), value);
        ctx.pop();
        self.notify(|cb| cb.pop_field(ctx, &id, value, creator.ty()));
        result
    }
}
