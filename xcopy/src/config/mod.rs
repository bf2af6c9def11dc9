//! Immutable copy configuration.
//!
//! A [`Config`] bundles the behaviour flags, the struct tag name, the field
//! map, the converter and an optional callback. Configurations never change
//! once built; [`Config::with_added_flags`] and [`Config::to_builder`] derive
//! new ones.

mod field_map;
mod flags;
mod options;

use std::{fmt, sync::Arc};

pub use field_map::{FieldMap, FieldMapEntry};
pub use flags::CopyFlags;
pub use options::{CopyFlag, CopyOptions};

use crate::{
    callback::Callback,
    convert::{ConvertOptions, Converter, ScalarConverter},
};

/// Tag name consulted on struct fields when none is configured.
pub const DEFAULT_STRUCT_TAG: &str = "xcopy";

/// Settings shared by every copy operation.
#[derive(Clone)]
pub struct Config {
    flags: CopyFlags,
    struct_tag_name: String,
    field_map: FieldMap,
    converter: Arc<dyn Converter>,
    callback: Option<Arc<dyn Callback>>,
}

impl Config {
    /// Starts building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Starts building a configuration from this one.
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder {
            config: self.clone(),
        }
    }

    /// A copy of this configuration with `flags` added.
    #[must_use]
    pub fn with_added_flags(&self, flags: CopyFlags) -> Self {
        let mut config = self.clone();
        config.flags |= flags;
        config
    }

    /// Behaviour flags.
    #[must_use]
    pub const fn flags(&self) -> CopyFlags {
        self.flags
    }

    /// Whether every flag in `flags` is set.
    #[must_use]
    pub const fn has_flags(&self, flags: CopyFlags) -> bool {
        self.flags.contains(flags)
    }

    /// Tag name consulted on struct fields.
    #[must_use]
    pub fn struct_tag_name(&self) -> &str {
        &self.struct_tag_name
    }

    /// Path-keyed renames.
    #[must_use]
    pub const fn field_map(&self) -> &FieldMap {
        &self.field_map
    }

    /// Scalar converter.
    #[must_use]
    pub fn converter(&self) -> &dyn Converter {
        self.converter.as_ref()
    }

    /// Observation hooks, if any.
    #[must_use]
    pub fn callback(&self) -> Option<&dyn Callback> {
        self.callback.as_deref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flags: CopyFlags::NONE,
            struct_tag_name: DEFAULT_STRUCT_TAG.to_owned(),
            field_map: FieldMap::new(),
            converter: Arc::new(ScalarConverter::default()),
            callback: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("flags", &self.flags)
            .field("struct_tag_name", &self.struct_tag_name)
            .field("field_map_len", &self.field_map.len())
            .field("converter", &self.converter)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Builder returned by [`Config::builder`].
#[derive(Debug, Default)]
#[must_use = "call `build` to obtain the configuration"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Replaces the flags.
    pub fn flags(mut self, flags: CopyFlags) -> Self {
        self.config.flags = flags;
        self
    }

    /// Adds to the flags.
    pub fn add_flags(mut self, flags: CopyFlags) -> Self {
        self.config.flags |= flags;
        self
    }

    /// Sets the tag name consulted on struct fields.
    pub fn struct_tag_name(mut self, name: impl Into<String>) -> Self {
        self.config.struct_tag_name = name.into();
        self
    }

    /// Replaces the field map.
    pub fn field_map(mut self, field_map: FieldMap) -> Self {
        self.config.field_map = field_map;
        self
    }

    /// Adds a rename of the field reached at `path`.
    pub fn rename_field(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.config.field_map.rename(path, name);
        self
    }

    /// Replaces the converter.
    pub fn converter(mut self, converter: impl Converter + 'static) -> Self {
        self.config.converter = Arc::new(converter);
        self
    }

    /// Uses a [`ScalarConverter`] tuned by `options`.
    pub fn convert_options(self, options: ConvertOptions) -> Self {
        self.converter(ScalarConverter::new(options))
    }

    /// Installs observation hooks.
    pub fn callback(mut self, callback: Arc<dyn Callback>) -> Self {
        self.config.callback = Some(callback);
        self
    }

    /// Finalises the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests;
