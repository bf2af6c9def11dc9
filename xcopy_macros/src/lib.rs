//! Procedural macros for `xcopy`.
//!
//! `#[derive(Reflect)]` describes a struct with named fields as an
//! `xcopy::Type` and converts its values to and from `xcopy::Value`.
//!
//! Field attributes:
//!
//! - `#[xcopy(rename = "name")]` copies the field under another name.
//! - `#[xcopy(skip)]` leaves the field out of every copy.
//! - `#[xcopy(private)]` hides the field from the engine entirely.
//! - `#[xcopy(tag(json = "value"))]` attaches arbitrary tag directives, read
//!   when a configuration selects that tag name.
//!
//! Struct attributes:
//!
//! - `#[xcopy(name = "Name")]` overrides the nominal type name.
//! - `#[xcopy(crate = "path")]` points generated code at a renamed
//!   dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `xcopy::Reflect`.
#[proc_macro_derive(Reflect, attributes(xcopy))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
