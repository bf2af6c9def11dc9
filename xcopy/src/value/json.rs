//! Conversion between [`Value`] and `serde_json::Value`.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value as Json};

use super::{Data, MapKey, Value};
use crate::ty::Type;

impl Value {
    /// Builds a dynamic value from JSON.
    ///
    /// Objects become `map<string, any>`, arrays become `seq<any>`, and
    /// `null` becomes a nil `any`. Numbers map to `i64` when they fit, then
    /// `u64`, then `f64`.
    #[must_use]
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Self::nil(),
            Json::Bool(b) => Self::from(*b),
            Json::Number(n) => from_number(n),
            Json::String(s) => Self::from(s.as_str()),
            Json::Array(items) => Self::new_unchecked(
                Type::seq(Type::any()),
                Data::Seq(items.iter().map(|j| Self::any(Self::from_json(j))).collect()),
            ),
            Json::Object(fields) => {
                let entries: IndexMap<MapKey, Self> = fields
                    .iter()
                    .map(|(k, v)| (MapKey::from(Self::from(k.as_str())), Self::any(Self::from_json(v))))
                    .collect();
                Self::new_unchecked(Type::map(Type::string(), Type::any()), Data::Map(entries))
            }
        }
    }

    /// Renders the value as JSON.
    ///
    /// Struct values become objects keyed by declared field name, mapping
    /// keys are rendered as strings, and absent or nil values become `null`.
    /// Non-finite floats also become `null`.
    #[must_use]
    pub fn to_json(&self) -> Json {
        let Some(value) = self.resolve() else {
            return Json::Null;
        };
        match value.data() {
            Data::Bool(b) => Json::Bool(*b),
            Data::Int(n) => Json::from(*n),
            Data::Uint(n) => Json::from(*n),
            Data::Float(n) => Number::from_f64(*n).map_or(Json::Null, Json::Number),
            Data::Str(s) => Json::String(s.clone()),
            Data::Struct(items) => {
                let names = value.ty().struct_fields().unwrap_or_default();
                let object: Map<String, Json> = names
                    .iter()
                    .zip(items)
                    .map(|(def, item)| (def.name().to_owned(), item.to_json()))
                    .collect();
                Json::Object(object)
            }
            Data::Map(entries) => {
                let object: Map<String, Json> = entries
                    .iter()
                    .map(|(k, v)| (json_key(k.value()), v.to_json()))
                    .collect();
                Json::Object(object)
            }
            Data::Seq(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            // resolve() never stops on these layers
            Data::Any(_) | Data::Option(_) => Json::Null,
        }
    }
}

fn from_number(number: &Number) -> Value {
    if let Some(n) = number.as_i64() {
        Value::from(n)
    } else if let Some(n) = number.as_u64() {
        Value::from(n)
    } else {
        Value::from(number.as_f64().unwrap_or(f64::NAN))
    }
}

fn json_key(key: &Value) -> String {
    match key.to_json() {
        Json::String(s) => s,
        other => other.to_string(),
    }
}
