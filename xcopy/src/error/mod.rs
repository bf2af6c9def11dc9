//! Error types produced by the copy engine.

mod constructors;
mod types;

pub use types::{NotSettable, XCopyError, XCopyErrorKind};

/// Result alias used throughout the crate.
pub type XCopyResult<T> = Result<T, XCopyError>;

#[cfg(test)]
mod tests;
