//! Constructors and accessors for `XCopyError`.

use super::{NotSettable, XCopyError, XCopyErrorKind};
use crate::context::{Context, FieldPath};

impl XCopyError {
    /// Builds an error raised at `path`.
    #[must_use]
    pub const fn new(kind: XCopyErrorKind, path: FieldPath) -> Self {
        Self { kind, path }
    }

    /// Builds an error raised at the current position of `ctx`.
    #[must_use]
    pub fn at(kind: impl Into<XCopyErrorKind>, ctx: &Context) -> Self {
        Self::new(kind.into(), ctx.path())
    }

    /// Builds an error raised outside any copy, such as while decoding.
    #[must_use]
    pub fn unrooted(kind: impl Into<XCopyErrorKind>) -> Self {
        Self::new(kind.into(), FieldPath::default())
    }

    pub(crate) fn not_settable(cause: NotSettable, ctx: &Context) -> Self {
        Self::at(cause, ctx)
    }

    /// Cause of the failure.
    #[must_use]
    pub const fn kind(&self) -> &XCopyErrorKind {
        &self.kind
    }

    /// Path where the failure happened, root first.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Consumes the error, returning its cause.
    #[must_use]
    pub fn into_kind(self) -> XCopyErrorKind {
        self.kind
    }
}

impl From<XCopyErrorKind> for XCopyError {
    fn from(kind: XCopyErrorKind) -> Self {
        Self::unrooted(kind)
    }
}
