//! Copies that start from an existing destination value.

mod common;

use common::{string_map, test_struct_value};
use rstest::rstest;
use xcopy::{
    Config, ConvertError, Converter, CopyFlags, Data, FieldDef, NotSettable, ScalarConverter, Type,
    TypeKind, Value, XCopyErrorKind,
};

fn nested_map(key: &str, entries: &[(&str, &str)]) -> Value {
    Value::map(Type::string(), Type::map(Type::string(), Type::string()))
        .with_entry(key, string_map(entries))
        .expect("nested string mapping")
}

fn config(flags: CopyFlags) -> Config {
    Config::builder().flags(flags).build()
}

/// Converts blank strings into absent options and defers everything else.
#[derive(Debug)]
struct BlankAsNone;

impl Converter for BlankAsNone {
    fn convert(&self, value: &Value, target: &Type) -> Result<Value, ConvertError> {
        if matches!(target.kind(), TypeKind::Option(_)) && value.as_str() == Some("") {
            return Ok(Value::zero(target));
        }
        ScalarConverter::default().convert(value, target)
    }
}

fn optional_ints(pairs: &[(&str, &str)]) -> Value {
    Config::builder()
        .converter(BlankAsNone)
        .build()
        .copy_to_new(
            &string_map(pairs),
            &Type::map(Type::string(), Type::option(Type::i32())),
        )
        .expect("optional ints")
}

#[rstest]
fn copy_using_existing_leaves_the_original_alone() {
    let existing = string_map(&[("a", "old"), ("keep", "k")]);
    let source = string_map(&[("a", "new")]);
    let copied = xcopy::copy_using_existing(&source, &existing).expect("duplicates existing");
    assert_eq!(copied.get(&Value::from("a")).and_then(Value::as_str), Some("new"));
    assert_eq!(copied.get(&Value::from("keep")).and_then(Value::as_str), Some("k"));
    assert_eq!(existing, string_map(&[("a", "old"), ("keep", "k")]));
}

#[rstest]
fn copy_to_existing_updates_in_place() {
    let mut existing = string_map(&[("a", "old"), ("keep", "k")]);
    xcopy::copy_to_existing(&string_map(&[("a", "new"), ("b", "added")]), &mut existing)
        .expect("writes in place");
    assert_eq!(existing.len(), 3);
    assert_eq!(existing.get(&Value::from("a")).and_then(Value::as_str), Some("new"));
    assert_eq!(existing.get(&Value::from("keep")).and_then(Value::as_str), Some("k"));
    assert_eq!(existing.get(&Value::from("b")).and_then(Value::as_str), Some("added"));
}

#[rstest]
fn copy_to_existing_keeps_unmentioned_struct_fields() {
    let mut existing = test_struct_value("keep", 1);
    xcopy::copy(&string_map(&[("Value2", "9")]), &mut existing).expect("struct fields settable");
    assert_eq!(existing.field("Value1").and_then(Value::as_str), Some("keep"));
    assert_eq!(existing.field("Value2").and_then(Value::as_i64), Some(9));
}

#[rstest]
fn copy_to_existing_grows_sequences() {
    let mut existing = Value::seq(Type::string(), vec![Value::from("a")]).expect("seq");
    let source = Value::seq(Type::string(), vec![Value::from("x"), Value::from("y")])
        .expect("seq");
    xcopy::copy_to_existing(&source, &mut existing).expect("sequence grows");
    assert_eq!(existing.len(), 2);
    assert_eq!(existing.index(0).and_then(Value::as_str), Some("x"));
}

#[rstest]
fn shared_existing_needs_duplication_under_overwrite() {
    let existing = string_map(&[("a", "old")]);
    let source = string_map(&[("a", "new")]);
    let err = config(CopyFlags::OVERWRITE_EXISTING)
        .copy_using_existing(&source, &existing)
        .expect_err("existing mapping is shared");
    assert!(matches!(
        err.kind(),
        XCopyErrorKind::NotSettable(NotSettable::Mapping)
    ));

    let copied = config(CopyFlags::OVERWRITE_EXISTING | CopyFlags::ALLOW_DUPLICATING_IF_NOT_SETTABLE)
        .copy_using_existing(&source, &existing)
        .expect("duplication allowed");
    assert_eq!(copied.get(&Value::from("a")).and_then(Value::as_str), Some("new"));
    assert_eq!(existing.get(&Value::from("a")).and_then(Value::as_str), Some("old"));
}

#[rstest]
fn nested_mapping_entries_are_not_settable_in_place() {
    let mut existing = nested_map("inner", &[("x", "1")]);
    let source = nested_map("inner", &[("y", "2")]);
    let err = xcopy::copy_to_existing(&source, &mut existing).expect_err("entry is shared");
    assert!(matches!(
        err.kind(),
        XCopyErrorKind::NotSettable(NotSettable::Mapping)
    ));
    assert_eq!(err.path().to_string(), "inner");
}

#[rstest]
fn nested_mapping_entries_merge_when_duplication_is_allowed() {
    let mut existing = nested_map("inner", &[("x", "1")]);
    let source = nested_map("inner", &[("y", "2")]);
    config(CopyFlags::ALLOW_DUPLICATING_IF_NOT_SETTABLE)
        .copy_to_existing(&source, &mut existing)
        .expect("entry duplicated");
    let inner = existing.get(&Value::from("inner")).expect("inner entry");
    assert_eq!(inner.get(&Value::from("x")).and_then(Value::as_str), Some("1"));
    assert_eq!(inner.get(&Value::from("y")).and_then(Value::as_str), Some("2"));
}

#[rstest]
fn denied_primitive_duplication_fails_on_shared_entries() {
    let mut existing = string_map(&[("a", "old")]);
    let err = config(CopyFlags::DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE)
        .copy_to_existing(&string_map(&[("a", "new")]), &mut existing)
        .expect_err("entry is read-only");
    assert!(matches!(
        err.kind(),
        XCopyErrorKind::NotSettable(NotSettable::Primitive)
    ));
    assert_eq!(err.path().to_string(), "a");
}

#[rstest]
fn denied_primitive_duplication_still_adds_new_entries() {
    let mut existing = string_map(&[("a", "old")]);
    config(CopyFlags::DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE)
        .copy_to_existing(&string_map(&[("b", "new")]), &mut existing)
        .expect("fresh entries need no duplication");
    assert_eq!(existing.len(), 2);
}

#[rstest]
fn existing_field_of_the_wrong_type_is_a_mismatch() {
    let ty = Type::structure("S")
        .field(FieldDef::new("A", Type::i64()))
        .finish();
    let existing = Value::new_unchecked(ty, Data::Struct(vec![Value::from("x")]));
    let err = xcopy::copy_using_existing(&string_map(&[("A", "5")]), &existing)
        .expect_err("field holds a string");
    let XCopyErrorKind::TypeMismatch { found, expected } = err.kind() else {
        panic!("expected a type mismatch, got {err}");
    };
    assert_eq!((found.as_str(), expected.as_str()), ("string", "i64"));
    assert_eq!(err.path().to_string(), "A");
}

#[rstest]
#[case::source_converts_to_nil(&[("a", "1")], "", NotSettable::PrimitiveSourceNil)]
#[case::destination_is_nil(&[("a", "")], "1", NotSettable::PrimitiveDestinationNil)]
fn read_only_optional_entries_report_nil_sides(
    #[case] existing: &[(&str, &str)],
    #[case] incoming: &str,
    #[case] cause: NotSettable,
) {
    let mut existing = optional_ints(existing);
    let err = Config::builder()
        .converter(BlankAsNone)
        .flags(CopyFlags::DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE)
        .build()
        .copy_to_existing(&string_map(&[("a", incoming)]), &mut existing)
        .expect_err("entry is read-only");
    assert_eq!(err.kind(), &XCopyErrorKind::NotSettable(cause));
    assert_eq!(err.path().to_string(), "a");
}
