//! Input parsing for the `Reflect` derive macro.
//!
//! Gathers the struct identifier, its fields, and all attribute metadata in
//! one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{ParsedField, ParsedInput, parse_field_attrs, parse_struct_attrs};

/// Gathers information from the user-provided struct.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ParsedInput, syn::Error> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect cannot be derived for generic structs",
        ));
    }
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Reflect requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Reflect can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Reflect requires named fields"));
        };
        fields.push(ParsedField {
            ident: field_ident,
            ty: field.ty.clone(),
            attrs: parse_field_attrs(field)?,
        });
    }
    Ok(ParsedInput {
        ident,
        fields,
        struct_attrs,
    })
}
