//! Shared fixtures for integration tests.

#![allow(dead_code, reason = "each test binary uses a subset of the fixtures")]

use rstest::fixture;
use xcopy::{FieldDef, Type, Value};

/// `TestStruct` with a renamed, a plain, an optional and a private field.
#[fixture]
pub fn test_struct() -> Type {
    Type::structure("TestStruct")
        .field(FieldDef::new("Value1", Type::string()).with_tag("xcopy", "New_value1"))
        .field(FieldDef::new("Value2", Type::i32()))
        .field(FieldDef::new("Value3", Type::option(Type::string())))
        .field(FieldDef::new("hidden", Type::string()).private())
        .finish()
}

/// `InnerStruct { Leaf: i32 }`.
#[fixture]
pub fn inner_struct() -> Type {
    Type::structure("InnerStruct")
        .field(FieldDef::new("Leaf", Type::i32()))
        .finish()
}

/// `OuterStruct { Name: string, Inner: InnerStruct }`.
#[fixture]
pub fn outer_struct() -> Type {
    Type::structure("OuterStruct")
        .field(FieldDef::new("Name", Type::string()))
        .field(FieldDef::new("Inner", inner_struct()))
        .finish()
}

/// `map<string, string>` built from `pairs`.
pub fn string_map(pairs: &[(&str, &str)]) -> Value {
    pairs
        .iter()
        .try_fold(Value::map(Type::string(), Type::string()), |map, (k, v)| {
            map.with_entry(*k, *v)
        })
        .expect("string entries fit a string mapping")
}

/// A populated `TestStruct` value.
pub fn test_struct_value(value1: &str, value2: i32) -> Value {
    Value::zero(&test_struct())
        .with_field("Value1", value1)
        .and_then(|v| v.with_field("Value2", value2))
        .expect("fields match the declaration")
}

/// A populated `OuterStruct` value.
pub fn outer_value(name: &str, leaf: i32) -> Value {
    let inner = Value::zero(&inner_struct())
        .with_field("Leaf", leaf)
        .expect("leaf is i32");
    Value::zero(&outer_struct())
        .with_field("Name", name)
        .and_then(|v| v.with_field("Inner", inner))
        .expect("fields match the declaration")
}
