//! Tests for error rendering and path attachment.

use rstest::rstest;

use super::{NotSettable, XCopyError, XCopyErrorKind};
use crate::{
    context::{Context, FieldId, FieldPath},
    convert::{ConvertError, Converter, ScalarConverter},
    result_ext::XCopyResultExt,
    ty::{Shape, Type},
    value::Value,
};

#[test]
fn root_errors_render_without_a_path() {
    let err = XCopyError::unrooted(XCopyErrorKind::MergeArity);
    assert_eq!(err.to_string(), "merge requires at least one source");
}

#[test]
fn nested_errors_render_their_path() {
    let mut ctx = Context::new();
    ctx.push(FieldId::Name("Outer".into()), "Outer");
    ctx.push(FieldId::Name("Inner".into()), "Inner");
    let err = XCopyError::at(
        XCopyErrorKind::UnsupportedShape {
            from: Shape::Struct,
            target: "i64".into(),
        },
        &ctx,
    );
    assert_eq!(
        err.to_string(),
        "cannot copy a struct value into i64 [Outer.Inner]"
    );
    assert_eq!(err.path(), &FieldPath::new(["Outer", "Inner"]));
}

#[rstest]
#[case(NotSettable::Struct, "struct is not settable and duplicating is not allowed")]
#[case(
    NotSettable::PrimitiveDestinationNil,
    "primitive is not settable and the destination value is nil"
)]
#[case(
    NotSettable::PrimitiveSourceNil,
    "primitive is not settable and the source value is nil"
)]
fn not_settable_causes_are_distinct(#[case] cause: NotSettable, #[case] expected: &str) {
    assert_eq!(XCopyError::unrooted(cause).to_string(), expected);
}

#[test]
fn conversion_failures_keep_their_source() {
    let mut ctx = Context::new();
    ctx.push(FieldId::Index(3), "3");
    let err = ScalarConverter::default()
        .convert(&Value::from("x"), &Type::u8())
        .at(&ctx)
        .expect_err("not a number");
    assert!(matches!(err.kind(), XCopyErrorKind::Conversion(ConvertError { .. })));
    assert!(err.to_string().ends_with(" [3]"));
    assert!(std::error::Error::source(&err).is_none());
}
