//! Hashable wrapper used for mapping keys.

use std::hash::{Hash, Hasher};

use super::{Data, Value};

/// A [`Value`] usable as a mapping key.
///
/// Keys compare by type and payload. Floats compare by bit pattern so that
/// every key is equal to itself.
#[derive(Clone, Debug)]
pub struct MapKey(Value);

impl MapKey {
    /// The wrapped value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.0
    }

    /// Unwraps the key.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for MapKey {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        key_eq(&self.0, &other.0)
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn key_eq(left: &Value, right: &Value) -> bool {
    if left.ty() != right.ty() {
        return false;
    }
    match (left.data(), right.data()) {
        (Data::Float(a), Data::Float(b)) => a.to_bits() == b.to_bits(),
        (Data::Any(a), Data::Any(b)) | (Data::Option(a), Data::Option(b)) => {
            match (a.as_deref(), b.as_deref()) {
                (Some(a), Some(b)) => key_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        (Data::Struct(a), Data::Struct(b)) | (Data::Seq(a), Data::Seq(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| key_eq(x, y))
        }
        (Data::Map(a), Data::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|other| key_eq(v, other)))
        }
        (a, b) => a == b,
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    let data = value.data();
    std::mem::discriminant(data).hash(state);
    match data {
        Data::Bool(b) => b.hash(state),
        Data::Int(n) => n.hash(state),
        Data::Uint(n) => n.hash(state),
        Data::Float(n) => n.to_bits().hash(state),
        Data::Str(s) => s.hash(state),
        Data::Any(inner) | Data::Option(inner) => {
            if let Some(inner) = inner {
                hash_value(inner, state);
            }
        }
        Data::Struct(items) | Data::Seq(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        // entry order does not take part in equality
        Data::Map(entries) => entries.len().hash(state),
    }
}
