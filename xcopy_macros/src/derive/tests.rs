//! Expansion tests for `#[derive(Reflect)]`.

use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::expand;

fn expanded(input: &DeriveInput) -> String {
    expand(input).expect("derive expands").to_string()
}

#[rstest]
fn implements_reflect_for_the_struct() {
    let input: DeriveInput = parse_quote! {
        struct Settings {
            port: u16,
            host: Option<String>,
        }
    };
    let out = expanded(&input);
    assert!(out.contains("impl xcopy :: Reflect for Settings"));
    assert!(out.contains("Type :: structure (\"Settings\")"));
    assert!(out.contains("FieldDef :: new (\"port\""));
    assert!(out.contains("next_field (& mut fields , \"Settings\" , \"host\")"));
}

#[rstest]
#[case::rename(quote::quote!(#[xcopy(rename = "listen_port")]), ". with_tag (\"xcopy\" , \"listen_port\")")]
#[case::skip(quote::quote!(#[xcopy(skip)]), ". with_tag (\"xcopy\" , \"-\")")]
#[case::private(quote::quote!(#[xcopy(private)]), ". private ()")]
#[case::custom_tag(quote::quote!(#[xcopy(tag(json = "p"))]), ". with_tag (\"json\" , \"p\")")]
fn field_attributes_become_type_metadata(
    #[case] attr: proc_macro2::TokenStream,
    #[case] expected: &str,
) {
    let input: DeriveInput = parse_quote! {
        struct Settings {
            #attr
            port: u16,
        }
    };
    assert!(expanded(&input).contains(expected));
}

#[rstest]
fn struct_attributes_override_name_and_crate() {
    let input: DeriveInput = parse_quote! {
        #[xcopy(name = "Server", crate = "deps::copier")]
        struct Settings {
            port: u16,
        }
    };
    let out = expanded(&input);
    assert!(out.contains("impl deps :: copier :: Reflect for Settings"));
    assert!(out.contains("structure (\"Server\")"));
}

#[rstest]
fn raw_identifiers_lose_their_prefix() {
    let input: DeriveInput = parse_quote! {
        struct Settings {
            r#type: String,
        }
    };
    assert!(expanded(&input).contains("FieldDef :: new (\"type\""));
}

#[rstest]
#[case::tuple(parse_quote! { struct Pair(u8, u8); }, "named fields")]
#[case::enumeration(parse_quote! { enum Mode { A, B } }, "only be derived for structs")]
#[case::generic(parse_quote! { struct Wrap<T> { inner: T } }, "generic")]
#[case::rename_and_skip(
    parse_quote! { struct S { #[xcopy(rename = "x", skip)] a: u8 } },
    "cannot be combined"
)]
#[case::non_string_rename(
    parse_quote! { struct S { #[xcopy(rename = 3)] a: u8 } },
    "rename must be a string"
)]
fn rejects_unsupported_input(#[case] input: DeriveInput, #[case] message: &str) {
    let Err(err) = expand(&input) else {
        panic!("expected expansion to fail");
    };
    assert!(
        err.to_string().contains(message),
        "unexpected error: {err}"
    );
}
