//! Serialisable description of a [`Config`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Config, CopyFlags, FieldMap, FieldMapEntry};
use crate::convert::ConvertOptions;

/// A single behaviour flag, spelled in `snake_case` for configuration files.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CopyFlag {
    /// [`CopyFlags::OVERWRITE_EXISTING`]
    OverwriteExisting,
    /// [`CopyFlags::ALLOW_DUPLICATING_IF_NOT_SETTABLE`]
    AllowDuplicatingIfNotSettable,
    /// [`CopyFlags::DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE`]
    DenyDuplicatingPrimitiveIfNotSettable,
    /// [`CopyFlags::ERROR_IF_STRUCT_FIELD_MISSING`]
    ErrorIfStructFieldMissing,
    /// [`CopyFlags::DISABLE_MAP_OF_ANY_TARGET_RECURSION`]
    DisableMapOfAnyTargetRecursion,
}

impl From<CopyFlag> for CopyFlags {
    fn from(flag: CopyFlag) -> Self {
        match flag {
            CopyFlag::OverwriteExisting => Self::OVERWRITE_EXISTING,
            CopyFlag::AllowDuplicatingIfNotSettable => Self::ALLOW_DUPLICATING_IF_NOT_SETTABLE,
            CopyFlag::DenyDuplicatingPrimitiveIfNotSettable => {
                Self::DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE
            }
            CopyFlag::ErrorIfStructFieldMissing => Self::ERROR_IF_STRUCT_FIELD_MISSING,
            CopyFlag::DisableMapOfAnyTargetRecursion => Self::DISABLE_MAP_OF_ANY_TARGET_RECURSION,
        }
    }
}

/// Plain-data form of a [`Config`], loadable from JSON or TOML.
///
/// Field-map values may be `null` to register a path without renaming it.
///
/// ```
/// use xcopy::{Config, CopyFlags, CopyOptions};
///
/// let options: CopyOptions = serde_json::from_str(
///     r#"{"flags": ["overwrite_existing"], "field_map": {"XValue2": "Value2"}}"#,
/// )
/// .expect("valid options");
/// let config = Config::from_options(&options);
/// assert!(config.has_flags(CopyFlags::OVERWRITE_EXISTING));
/// assert_eq!(config.field_map().renamed("XValue2"), Some("Value2"));
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CopyOptions {
    /// Flags to enable.
    pub flags: Vec<CopyFlag>,
    /// Tag name override; the default tag is used when absent.
    pub struct_tag_name: Option<String>,
    /// Renames keyed by dotted source path.
    pub field_map: BTreeMap<String, Option<String>>,
    /// Options for the default converter.
    pub conversion: ConvertOptions,
}

impl Config {
    /// Builds a configuration from its plain-data form.
    #[must_use]
    pub fn from_options(options: &CopyOptions) -> Self {
        let flags = options
            .flags
            .iter()
            .fold(CopyFlags::NONE, |acc, flag| acc | CopyFlags::from(*flag));
        let mut field_map = FieldMap::new();
        for (path, name) in &options.field_map {
            let entry = name
                .as_ref()
                .map_or_else(FieldMapEntry::new, FieldMapEntry::renamed);
            field_map.insert(path.clone(), entry);
        }
        let mut builder = Self::builder()
            .flags(flags)
            .field_map(field_map)
            .convert_options(options.conversion);
        if let Some(tag) = &options.struct_tag_name {
            builder = builder.struct_tag_name(tag.clone());
        }
        builder.build()
    }
}

impl From<&CopyOptions> for Config {
    fn from(options: &CopyOptions) -> Self {
        Self::from_options(options)
    }
}
