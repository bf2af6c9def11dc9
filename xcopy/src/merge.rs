//! Folding several sources into one value.

use crate::{
    config::Config,
    error::{XCopyError, XCopyErrorKind, XCopyResult},
    ty::Type,
    value::Value,
};

impl Config {
    /// Builds a value of type `dest` from the first source, then copies every
    /// later source over it in place.
    ///
    /// Later sources win where they overlap; entries only present in earlier
    /// sources survive.
    ///
    /// # Errors
    ///
    /// Returns [`XCopyErrorKind::MergeArity`] when `sources` is empty, and
    /// otherwise the first copy failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use xcopy::{Config, Type, Value};
    ///
    /// let ty = Type::map(Type::string(), Type::string());
    /// let first = Value::map(Type::string(), Type::string())
    ///     .with_entry("a", "1")
    ///     .and_then(|m| m.with_entry("b", "1"))
    ///     .expect("first layer");
    /// let second = Value::map(Type::string(), Type::string())
    ///     .with_entry("b", "2")
    ///     .expect("second layer");
    ///
    /// let merged = Config::default().merge_to_new(&ty, [&first, &second]).expect("merge");
    /// assert_eq!(merged.get(&Value::from("a")).and_then(Value::as_str), Some("1"));
    /// assert_eq!(merged.get(&Value::from("b")).and_then(Value::as_str), Some("2"));
    /// ```
    pub fn merge_to_new<'s, I>(&self, dest: &Type, sources: I) -> XCopyResult<Value>
    where
        I: IntoIterator<Item = &'s Value>,
    {
        let mut sources = sources.into_iter();
        let Some(first) = sources.next() else {
            return Err(XCopyError::unrooted(XCopyErrorKind::MergeArity));
        };
        let mut merged = self.copy_to_new(first, dest)?;
        for (layer, source) in sources.enumerate() {
            tracing::debug!(layer = layer + 1, dest = %dest, "merging layer");
            self.copy_to_existing(source, &mut merged)?;
        }
        Ok(merged)
    }
}
