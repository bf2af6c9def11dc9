//! Unit tests for derive attribute parsing.

use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::{FieldAttrs, parse_field_attrs, parse_struct_attrs};

fn first_field(input: &DeriveInput) -> &syn::Field {
    let syn::Data::Struct(data) = &input.data else {
        panic!("expected a struct");
    };
    data.fields.iter().next().expect("one field")
}

#[rstest]
fn parses_every_field_attribute() {
    let input: DeriveInput = parse_quote! {
        struct S {
            #[xcopy(rename = "Port", private)]
            #[xcopy(tag(json = "port,omitempty", env = "PORT"))]
            port: u16,
        }
    };
    let attrs = parse_field_attrs(first_field(&input)).expect("attributes parse");
    assert_eq!(
        attrs,
        FieldAttrs {
            rename: Some("Port".to_owned()),
            skip: false,
            private: true,
            tags: vec![
                ("json".to_owned(), "port,omitempty".to_owned()),
                ("env".to_owned(), "PORT".to_owned()),
            ],
        }
    );
}

#[rstest]
fn rename_overrides_explicit_xcopy_tag() {
    let attrs = FieldAttrs {
        rename: Some("b".to_owned()),
        tags: vec![("xcopy".to_owned(), "a".to_owned())],
        ..FieldAttrs::default()
    };
    assert_eq!(
        attrs.directives().last(),
        Some(&("xcopy".to_owned(), "b".to_owned()))
    );
}

#[rstest]
fn ignores_unknown_keys_and_foreign_attributes() {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "camelCase")]
        #[xcopy(future = "x", later(a = "b"))]
        struct S {
            #[xcopy(unknown = 1)]
            #[doc = "docs"]
            port: u16,
        }
    };
    let struct_attrs = parse_struct_attrs(&input.attrs).expect("struct attributes parse");
    assert!(struct_attrs.name.is_none());
    assert!(struct_attrs.crate_path.is_none());
    let attrs = parse_field_attrs(first_field(&input)).expect("field attributes parse");
    assert_eq!(attrs, FieldAttrs::default());
}

#[rstest]
fn rejects_invalid_crate_path() {
    let input: DeriveInput = parse_quote! {
        #[xcopy(crate = "not a path")]
        struct S { port: u16 }
    };
    assert!(parse_struct_attrs(&input.attrs).is_err());
}
