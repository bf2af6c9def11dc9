//! Unit tests for dynamic values.

use rstest::rstest;

use super::{Data, MapKey, Value};
use crate::{
    error::XCopyErrorKind,
    ty::{FieldDef, Shape, Type},
};

fn person() -> Type {
    Type::structure("Person")
        .field(FieldDef::new("Name", Type::string()))
        .field(FieldDef::new("Age", Type::option(Type::u32())))
        .finish()
}

#[rstest]
#[case::bool(Type::bool(), Data::Bool(false))]
#[case::signed(Type::i16(), Data::Int(0))]
#[case::unsigned(Type::u64(), Data::Uint(0))]
#[case::float(Type::f32(), Data::Float(0.0))]
#[case::string(Type::string(), Data::Str(String::new()))]
#[case::any(Type::any(), Data::Any(None))]
#[case::option(Type::option(Type::i64()), Data::Option(None))]
fn zero_values(#[case] ty: Type, #[case] expected: Data) {
    assert_eq!(Value::zero(&ty).data(), &expected);
}

#[test]
fn zero_array_has_declared_length() {
    let value = Value::zero(&Type::array(Type::string(), 3));
    assert_eq!(value.len(), 3);
    assert_eq!(value.index(2).and_then(Value::as_str), Some(""));
}

#[test]
fn resolve_walks_option_and_any_layers() {
    let nested = Value::some(Value::some(Value::any(Value::some(Value::from(5_i64)))));
    assert_eq!(nested.as_i64(), Some(5));
    assert_eq!(nested.shape(), Shape::Scalar);

    let absent = Value::some(Value::none(Type::i64()));
    assert!(absent.is_nil());
    assert!(Value::nil().is_nil());
}

#[test]
fn new_rejects_mismatched_payloads() {
    let err = Value::new(Type::i64(), Data::Uint(3)).expect_err("unsigned payload for i64");
    assert!(matches!(err.kind(), XCopyErrorKind::Decode { .. }));

    let err = Value::new(Type::array(Type::i64(), 2), Data::Seq(vec![Value::from(1_i64)]))
        .expect_err("short array");
    assert!(matches!(err.kind(), XCopyErrorKind::Decode { .. }));
}

#[test]
fn set_field_materializes_optional_structs() {
    let mut value = Value::none(person());
    value
        .set_field("Name", Value::from("Ada"))
        .expect("set existing field");
    assert_eq!(value.field("Name").and_then(Value::as_str), Some("Ada"));
    assert!(value.field("Age").is_some_and(Value::is_nil));
}

#[test]
fn set_field_checks_declared_type() {
    let mut value = Value::zero(&person());
    let err = value
        .set_field("Name", Value::from(3_i64))
        .expect_err("wrong field type");
    assert!(matches!(err.kind(), XCopyErrorKind::TypeMismatch { .. }));

    let err = value
        .set_field("Nickname", Value::from("x"))
        .expect_err("unknown field");
    assert!(matches!(err.kind(), XCopyErrorKind::FieldMissing { .. }));
}

#[test]
fn map_insert_and_get() {
    let mut map = Value::map(Type::string(), Type::i64());
    map.insert(Value::from("a"), Value::from(1_i64))
        .expect("insert first");
    let displaced = map
        .insert(Value::from("a"), Value::from(2_i64))
        .expect("insert again");
    assert_eq!(displaced.and_then(|v| v.as_i64()), Some(1));
    assert_eq!(map.get(&Value::from("a")).and_then(Value::as_i64), Some(2));
    assert_eq!(map.len(), 1);

    let err = map
        .insert(Value::from(1_i64), Value::from(1_i64))
        .expect_err("wrong key type");
    assert!(matches!(err.kind(), XCopyErrorKind::TypeMismatch { .. }));
}

#[test]
fn map_equality_ignores_insertion_order() {
    let forward = Value::map(Type::string(), Type::bool())
        .with_entry("a", true)
        .and_then(|m| m.with_entry("b", false))
        .expect("build forward");
    let backward = Value::map(Type::string(), Type::bool())
        .with_entry("b", false)
        .and_then(|m| m.with_entry("a", true))
        .expect("build backward");
    assert_eq!(forward, backward);
}

#[test]
fn float_keys_compare_by_bits() {
    let nan = MapKey::from(Value::from(f64::NAN));
    assert_eq!(nan, nan.clone());
    assert_ne!(MapKey::from(Value::from(1.0_f64)), MapKey::from(Value::from(1.0_f32)));
}

#[cfg(feature = "serde_json")]
#[test]
fn json_bridge_preserves_structure() {
    let json = serde_json::json!({"a": [1, "two", null], "b": {"c": 1.5}});
    let value = Value::from_json(&json);
    assert_eq!(value.ty(), &Type::map(Type::string(), Type::any()));
    assert_eq!(value.to_json(), json);
}
