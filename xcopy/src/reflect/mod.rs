//! Bridging Rust types to dynamic values.
//!
//! [`Reflect`] describes a Rust type as a [`Type`] and moves values in and
//! out of [`Value`]. Structs usually derive it with `#[derive(Reflect)]`.

mod impls;

use crate::{
    config::Config,
    error::{XCopyError, XCopyErrorKind, XCopyResult},
    ty::Type,
    value::{Data, Value, data_label},
};

/// A Rust type the copy engine can read and build.
pub trait Reflect: Sized {
    /// Descriptor of the type.
    fn reflect_type() -> Type;

    /// Dynamic form of `self`.
    fn to_value(&self) -> Value;

    /// Rebuilds a Rust value from its dynamic form.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::Decode`] when the payload does not fit.
    fn from_value(value: Value) -> XCopyResult<Self>;
}

/// Decode failure for a `data` payload read as `T`.
pub(crate) fn decode_error<T: Reflect>(data: &Data) -> XCopyError {
    XCopyError::unrooted(XCopyErrorKind::Decode {
        found: data_label(data).to_owned(),
        expected: T::reflect_type().to_string(),
    })
}

impl Config {
    /// Builds a `T` from any reflectable source.
    ///
    /// # Errors
    ///
    /// As [`Config::copy_to_new`], plus decode failures.
    pub fn convert<T: Reflect, S: Reflect>(&self, source: &S) -> XCopyResult<T> {
        let value = self.copy_to_new(&source.to_value(), &T::reflect_type())?;
        T::from_value(value)
    }

    /// Copies `source` over `dest`, keeping fields and entries that `source`
    /// does not mention.
    ///
    /// `dest` is left unchanged when the copy fails.
    ///
    /// # Errors
    ///
    /// As [`Config::copy_to_existing`], plus decode failures.
    pub fn update<T: Reflect, S: Reflect>(&self, source: &S, dest: &mut T) -> XCopyResult<()> {
        let mut value = dest.to_value();
        self.copy_to_existing(&source.to_value(), &mut value)?;
        *dest = T::from_value(value)?;
        Ok(())
    }

    /// Merges dynamic layers into a `T`; later layers win.
    ///
    /// # Errors
    ///
    /// As [`Config::merge_to_new`], plus decode failures.
    pub fn merge<'s, T, I>(&self, sources: I) -> XCopyResult<T>
    where
        T: Reflect,
        I: IntoIterator<Item = &'s Value>,
    {
        T::from_value(self.merge_to_new(&T::reflect_type(), sources)?)
    }
}

/// Support code for `#[derive(Reflect)]`.
#[doc(hidden)]
pub mod __private {
    pub use std::sync::OnceLock;

    use crate::{
        error::{XCopyError, XCopyErrorKind, XCopyResult},
        value::Value,
    };

    /// Field values of a struct value, looking through `any` layers.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::Decode`] when the value is not a struct.
    pub fn struct_fields(value: Value) -> XCopyResult<Vec<Value>> {
        super::impls::concrete(value).into_struct_fields()
    }

    /// Next field value produced by a struct decode.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::Decode`] when the fields ran out.
    pub fn next_field(
        fields: &mut impl Iterator<Item = Value>,
        owner: &str,
        field: &str,
    ) -> XCopyResult<Value> {
        fields.next().ok_or_else(|| {
            XCopyError::unrooted(XCopyErrorKind::Decode {
                found: format!("no value for field {field}"),
                expected: owner.to_owned(),
            })
        })
    }
}
