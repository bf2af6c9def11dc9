//! Public copy operations.

use crate::{
    config::{Config, CopyFlags},
    context::Context,
    creator::Existing,
    engine::Engine,
    error::XCopyResult,
    ty::Type,
    value::Value,
};

impl Config {
    /// Builds a new value of type `dest` from `source`.
    ///
    /// Absent sources produce the zero value of `dest`.
    ///
    /// # Errors
    ///
    /// Fails when shapes cannot be combined, a scalar cannot be converted, or
    /// a field is missing under
    /// [`CopyFlags::ERROR_IF_STRUCT_FIELD_MISSING`].
    ///
    /// # Examples
    ///
    /// ```
    /// use xcopy::{Config, Type, Value};
    ///
    /// let source = Value::seq(Type::i64(), vec![Value::from(7_i64)]).expect("valid sequence");
    /// let copied = Config::default()
    ///     .copy_to_new(&source, &Type::map(Type::string(), Type::string()))
    ///     .expect("sequence into mapping");
    /// assert_eq!(copied.get(&Value::from("0")).and_then(Value::as_str), Some("7"));
    /// ```
    pub fn copy_to_new(&self, source: &Value, dest: &Type) -> XCopyResult<Value> {
        tracing::debug!(dest = %dest, "copy to new value");
        let mut ctx = Context::new();
        let built = Engine::new(self).copy_value(&mut ctx, source, dest, None)?;
        Ok(built.into_value().unwrap_or_else(|| Value::zero(dest)))
    }

    /// Copies `source` over a duplicate of `existing`, returning the result.
    ///
    /// `existing` is never modified. With
    /// [`CopyFlags::OVERWRITE_EXISTING`] set, shared composites inside it can
    /// only be written when [`CopyFlags::ALLOW_DUPLICATING_IF_NOT_SETTABLE`]
    /// is also set; use [`Config::copy_to_existing`] to write in place.
    ///
    /// # Errors
    ///
    /// As [`Config::copy_to_new`], plus the not-settable failures described
    /// above.
    pub fn copy_using_existing(&self, source: &Value, existing: &Value) -> XCopyResult<Value> {
        let dest = existing.ty().clone();
        tracing::debug!(dest = %dest, "copy using existing value");
        let mut ctx = Context::new();
        let built =
            Engine::new(self).copy_value(&mut ctx, source, &dest, Some(Existing::Shared(existing)))?;
        Ok(built.into_value().unwrap_or_else(|| existing.clone()))
    }

    /// Copies `source` into `existing` in place.
    ///
    /// [`CopyFlags::OVERWRITE_EXISTING`] is forced on. Entries and fields
    /// absent from `source` are kept.
    ///
    /// # Errors
    ///
    /// As [`Config::copy_using_existing`]. On failure `existing` may hold a
    /// partial update.
    pub fn copy_to_existing(&self, source: &Value, existing: &mut Value) -> XCopyResult<()> {
        let config = self.with_added_flags(CopyFlags::OVERWRITE_EXISTING);
        let dest = existing.ty().clone();
        tracing::debug!(dest = %dest, "copy to existing value");
        let mut ctx = Context::new();
        let built = Engine::new(&config).copy_value(
            &mut ctx,
            source,
            &dest,
            Some(Existing::Mutable(&mut *existing)),
        )?;
        built.store(existing);
        Ok(())
    }

    /// Alias of [`Config::copy_to_existing`].
    ///
    /// # Errors
    ///
    /// As [`Config::copy_to_existing`].
    pub fn copy(&self, source: &Value, dest: &mut Value) -> XCopyResult<()> {
        self.copy_to_existing(source, dest)
    }
}
