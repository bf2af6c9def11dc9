//! Parsing utilities for the `Reflect` derive macro.

use syn::{Attribute, Token, parenthesized};

mod input;
mod literals;
#[cfg(test)]
mod tests;

pub(crate) use input::parse_input;
use literals::lit_str;

/// Everything expansion needs from the annotated struct.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub fields: Vec<ParsedField>,
    pub struct_attrs: StructAttrs,
}

/// One named field with its attributes.
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Nominal type name; defaults to the struct identifier.
    pub name: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Reflect)]`.
///
/// `rename` and `skip` both become the `xcopy` tag directive, so they are
/// mutually exclusive. `tag(...)` entries are emitted verbatim.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    pub private: bool,
    pub tags: Vec<(String, String)>,
}

impl FieldAttrs {
    /// Tag directives in emission order; `rename` and `skip` come last so
    /// they win over an explicit `tag(xcopy = ...)`.
    pub(crate) fn directives(&self) -> Vec<(String, String)> {
        let mut tags = self.tags.clone();
        if let Some(name) = &self.rename {
            tags.push(("xcopy".to_owned(), name.clone()));
        }
        if self.skip {
            tags.push(("xcopy".to_owned(), "-".to_owned()));
        }
        tags
    }
}

/// Iterate all `#[xcopy(...)]` attributes once and apply a callback.
fn parse_xcopy<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("xcopy")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[xcopy(...)]` metadata applied to a struct.
///
/// Recognises `name` and `crate`. Unknown keys are ignored so callers keep
/// compiling when new attributes appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_xcopy(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => {
                out.name = Some(lit_str(meta, "name")?.value());
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

fn parse_tag_list(meta: &syn::meta::ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    meta.parse_nested_meta(|nested| {
        let Some(ident) = nested.path.get_ident().map(ToString::to_string) else {
            return Err(nested.error("tag names must be identifiers"));
        };
        let value = lit_str(&nested, &ident)?.value();
        out.tags.push((ident, value));
        Ok(())
    })
}

/// Parses field-level `#[xcopy(...)]` attributes.
///
/// Recognised keys are `rename`, `skip`, `private` and `tag(...)`. Unknown
/// keys are ignored, matching [`parse_struct_attrs`].
pub(crate) fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_xcopy(&field.attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename") => {
                out.rename = Some(lit_str(meta, "rename")?.value());
                Ok(())
            }
            Some("skip") => {
                out.skip = true;
                Ok(())
            }
            Some("private") => {
                out.private = true;
                Ok(())
            }
            Some("tag") => parse_tag_list(meta, &mut out),
            _ => discard_unknown(meta),
        }
    })?;
    if out.skip && out.rename.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` and `rename` cannot be combined",
        ));
    }
    Ok(out)
}
