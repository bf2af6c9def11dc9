//! Unit tests for type descriptors.

use rstest::rstest;

use super::{FieldDef, Shape, Type};

#[rstest]
#[case::scalar(Type::i64(), Shape::Scalar)]
#[case::any(Type::any(), Shape::Scalar)]
#[case::map(Type::map(Type::string(), Type::any()), Shape::Mapping)]
#[case::seq(Type::seq(Type::string()), Shape::Sequence)]
#[case::array(Type::array(Type::u8(), 4), Shape::Sequence)]
#[case::nested_option(
    Type::option(Type::option(Type::seq(Type::i64()))),
    Shape::Sequence
)]
#[case::structure(Type::anonymous_struct().finish(), Shape::Struct)]
fn shape_resolves_through_options(#[case] ty: Type, #[case] expected: Shape) {
    assert_eq!(ty.shape(), expected);
}

#[test]
fn named_types_differ_from_their_structure() {
    let first = Type::named("Celsius", &Type::i64());
    let second = Type::named("Fahrenheit", &Type::i64());
    assert_ne!(first, second);
    assert_ne!(first, Type::i64());
    assert_eq!(first, Type::named("Celsius", &Type::i64()));
}

#[test]
fn structurally_equal_types_compare_equal() {
    let build = || {
        Type::structure("Person")
            .field(FieldDef::new("Name", Type::string()))
            .field(FieldDef::new("Age", Type::option(Type::u32())))
            .finish()
    };
    assert_eq!(build(), build());
}

#[test]
fn with_tag_replaces_previous_value() {
    let field = FieldDef::new("Value1", Type::string())
        .with_tag("xcopy", "first")
        .with_tag("json", "value")
        .with_tag("xcopy", "second");
    assert_eq!(field.tag("xcopy"), Some("second"));
    assert_eq!(field.tag("json"), Some("value"));
    assert_eq!(field.tag("yaml"), None);
}

#[rstest]
#[case(Type::map(Type::string(), Type::any()), "map<string, any>")]
#[case(Type::array(Type::i32(), 3), "[i32; 3]")]
#[case(Type::option(Type::seq(Type::f64())), "option<seq<f64>>")]
#[case(Type::named("Id", &Type::u64()), "Id")]
fn display_renders_structure(#[case] ty: Type, #[case] expected: &str) {
    assert_eq!(ty.to_string(), expected);
}
