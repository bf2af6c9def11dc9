//! Struct tag directives.
//!
//! A tag value is a comma-separated list whose first segment names the
//! target field. `-` or an empty first segment excludes the field.

use crate::ty::FieldDef;

/// Name under which `field` takes part in a copy, or `None` when excluded.
///
/// Unexported fields are treated as excluded by the caller, not here.
pub(crate) fn effective_name<'a>(field: &'a FieldDef, tag_name: &str) -> Option<&'a str> {
    let Some(tag) = field.tag(tag_name) else {
        return Some(field.name());
    };
    match tag.split(',').next().map(str::trim) {
        None | Some("" | "-") => None,
        Some(name) => Some(name),
    }
}
