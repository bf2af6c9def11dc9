//! Extensions for attaching the current field path to foreign errors.
//!
//! Conversion failures surface deep inside the walk as bare
//! [`ConvertError`](crate::ConvertError)s. [`XCopyResultExt::at`] wraps them
//! in an [`XCopyError`] that remembers where the walk was.
//!
//! # Examples
//!
//! ```
//! use xcopy::{Context, Converter, ScalarConverter, Type, Value, XCopyResult, XCopyResultExt};
//!
//! fn parse(ctx: &Context) -> XCopyResult<Value> {
//!     ScalarConverter::default()
//!         .convert(&Value::from("12"), &Type::i64())
//!         .at(ctx)
//! }
//!
//! assert_eq!(parse(&Context::new()).map(|v| v.as_i64()), Ok(Some(12)));
//! ```

use crate::{
    context::Context,
    error::{XCopyError, XCopyErrorKind, XCopyResult},
};

/// Maps any `Result<T, E>` with `E: Into<XCopyErrorKind>` into an
/// [`XCopyResult`] positioned at a [`Context`].
pub trait XCopyResultExt<T> {
    /// Attaches the current path of `ctx` to the error.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into [`XCopyError`].
    fn at(self, ctx: &Context) -> XCopyResult<T>;
}

impl<T, E> XCopyResultExt<T> for Result<T, E>
where
    E: Into<XCopyErrorKind>,
{
    fn at(self, ctx: &Context) -> XCopyResult<T> {
        self.map_err(|e| XCopyError::at(e, ctx))
    }
}
