//! Prefix used for runtime paths in generated `Reflect` impls.
//!
//! Crates that depend on `xcopy` under another name pass
//! `#[xcopy(crate = "...")]`; every `Type`, `Value` and `__private` path the
//! derive emits is rooted at the returned tokens.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the runtime crate, `xcopy` unless overridden.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(resolve(None).to_string(), "xcopy");
///
/// let renamed: syn::Path = syn::parse_quote!(vendored::xcopy);
/// assert_eq!(resolve(Some(&renamed)).to_string(), "vendored :: xcopy");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { xcopy }, |path| quote! { #path })
}
