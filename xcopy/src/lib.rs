//! Recursive deep copy and type coercion between dynamically described
//! values.
//!
//! Every value handled by the engine is a [`Value`] paired with a [`Type`]
//! descriptor. A copy walks the source and builds a destination of any
//! compatible shape: structs, mappings and sequences convert freely into one
//! another, scalars convert between kinds, and optional layers are followed
//! transparently. Rust types join in through the [`Reflect`] trait, usually
//! derived.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use xcopy::Reflect;
//!
//! #[derive(Debug, PartialEq, Reflect)]
//! struct Settings {
//!     #[xcopy(rename = "listen_port")]
//!     port: u16,
//!     host: Option<String>,
//! }
//!
//! let mut raw = HashMap::new();
//! raw.insert("listen_port".to_owned(), "8080".to_owned());
//!
//! let settings: Settings = xcopy::convert(&raw).expect("string port converts");
//! assert_eq!(settings, Settings { port: 8080, host: None });
//! ```

extern crate self as xcopy;

mod callback;
mod config;
mod context;
mod convert;
mod copy;
mod creator;
mod engine;
mod error;
mod merge;
mod reflect;
mod result_ext;
mod tag;
mod ty;
mod value;

pub use callback::{Callback, RecordingCallback, TraceEvent, TracingCallback};
pub use config::{
    Config, ConfigBuilder, CopyFlag, CopyFlags, CopyOptions, DEFAULT_STRUCT_TAG, FieldMap,
    FieldMapEntry,
};
pub use context::{Context, FieldId, FieldPath, UNKNOWN_SEGMENT};
pub use convert::{ConvertError, ConvertOptions, Converter, ScalarConverter};
pub use error::{NotSettable, XCopyError, XCopyErrorKind, XCopyResult};
pub use reflect::{Reflect, __private};
pub use result_ext::XCopyResultExt;
pub use ty::{FieldDef, ScalarKind, Shape, StructBuilder, Type, TypeKind};
pub use value::{Data, MapKey, Value};
pub use xcopy_macros::Reflect;

/// [`Config::copy_to_new`] with the default configuration.
///
/// # Errors
///
/// As [`Config::copy_to_new`].
pub fn copy_to_new(source: &Value, dest: &Type) -> XCopyResult<Value> {
    Config::default().copy_to_new(source, dest)
}

/// [`Config::copy_using_existing`] with the default configuration.
///
/// # Errors
///
/// As [`Config::copy_using_existing`].
pub fn copy_using_existing(source: &Value, existing: &Value) -> XCopyResult<Value> {
    Config::default().copy_using_existing(source, existing)
}

/// [`Config::copy_to_existing`] with the default configuration.
///
/// # Errors
///
/// As [`Config::copy_to_existing`].
pub fn copy_to_existing(source: &Value, existing: &mut Value) -> XCopyResult<()> {
    Config::default().copy_to_existing(source, existing)
}

/// [`Config::copy`] with the default configuration.
///
/// # Errors
///
/// As [`Config::copy`].
pub fn copy(source: &Value, dest: &mut Value) -> XCopyResult<()> {
    Config::default().copy(source, dest)
}

/// [`Config::merge_to_new`] with the default configuration.
///
/// # Errors
///
/// As [`Config::merge_to_new`].
pub fn merge_to_new<'s, I>(dest: &Type, sources: I) -> XCopyResult<Value>
where
    I: IntoIterator<Item = &'s Value>,
{
    Config::default().merge_to_new(dest, sources)
}

/// [`Config::convert`] with the default configuration.
///
/// # Errors
///
/// As [`Config::convert`].
pub fn convert<T: Reflect, S: Reflect>(source: &S) -> XCopyResult<T> {
    Config::default().convert(source)
}

/// [`Config::update`] with the default configuration.
///
/// # Errors
///
/// As [`Config::update`].
pub fn update<T: Reflect, S: Reflect>(source: &S, dest: &mut T) -> XCopyResult<()> {
    Config::default().update(source, dest)
}
