//! Code generation for `#[derive(Reflect)]`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{ParsedField, ParsedInput};

/// Name a field is declared under, without any raw identifier prefix.
pub(crate) fn field_name(field: &ParsedField) -> String {
    let name = field.ident.to_string();
    name.strip_prefix("r#").map_or_else(|| name.clone(), str::to_owned)
}

fn field_def(field: &ParsedField, krate: &TokenStream) -> TokenStream {
    let name = field_name(field);
    let ty = &field.ty;
    let tags = field.attrs.directives().into_iter().map(|(tag, value)| {
        quote! { .with_tag(#tag, #value) }
    });
    let private = field.attrs.private.then(|| quote! { .private() });
    quote! {
        #krate::FieldDef::new(#name, <#ty as #krate::Reflect>::reflect_type())
            #(#tags)*
            #private
    }
}

/// Generates the `Reflect` implementation for the parsed struct.
pub(crate) fn reflect_impl(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let type_name = input
        .struct_attrs
        .name
        .clone()
        .unwrap_or_else(|| ident.to_string());
    let defs = input.fields.iter().map(|field| field_def(field, krate));
    let to_values = input.fields.iter().map(|field| {
        let member = &field.ident;
        quote! { #krate::Reflect::to_value(&self.#member) }
    });
    let decodes = input.fields.iter().map(|field| {
        let member = &field.ident;
        let name = field_name(field);
        let ty = &field.ty;
        quote! {
            #member: <#ty as #krate::Reflect>::from_value(
                #krate::__private::next_field(&mut fields, #type_name, #name)?,
            )?
        }
    });

    quote! {
        impl #krate::Reflect for #ident {
            fn reflect_type() -> #krate::Type {
                static TYPE: #krate::__private::OnceLock<#krate::Type> =
                    #krate::__private::OnceLock::new();
                TYPE.get_or_init(|| {
                    #krate::Type::structure(#type_name)
                        #(.field(#defs))*
                        .finish()
                })
                .clone()
            }

            fn to_value(&self) -> #krate::Value {
                #krate::Value::new_unchecked(
                    <Self as #krate::Reflect>::reflect_type(),
                    #krate::Data::Struct(::std::vec![#(#to_values),*]),
                )
            }

            fn from_value(value: #krate::Value) -> #krate::XCopyResult<Self> {
                let mut fields = #krate::__private::struct_fields(value)?.into_iter();
                ::std::result::Result::Ok(Self {
                    #(#decodes,)*
                })
            }
        }
    }
}
