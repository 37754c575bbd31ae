use std::convert::TryFrom;

use serde_json::json;

use super::{Getter, NumberType, Value};

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(NumberType::Integer(i64::from(n)))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(NumberType::Integer(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(i) => Value::Number(NumberType::Integer(i)),
            Err(_) => Value::Number(NumberType::Float(n as f64)),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(NumberType::Float(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Getter> for Value {
    fn from(getter: Getter) -> Self {
        Value::Function(getter)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::from(i),
            toml::Value::Float(f) => Value::from(f),
            toml::Value::Boolean(b) => Value::Boolean(b),
            toml::Value::Datetime(d) => Value::String(d.to_string()),
            toml::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => {
                Value::object(table.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

/// Objects nested deeper than this are rendered as `null`; host globals are
/// free to refer back to themselves.
const JSON_DEPTH_LIMIT: usize = 16;

impl Value {
    /// Render the value for display. Functions and elements have no JSON
    /// form and are described instead.
    pub fn to_json(&self) -> serde_json::Value {
        self.to_json_at(0)
    }

    fn to_json_at(&self, depth: usize) -> serde_json::Value {
        if depth > JSON_DEPTH_LIMIT {
            return serde_json::Value::Null;
        }
        match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => json!(b),
            Value::Number(NumberType::Integer(i)) => json!(i),
            Value::Number(NumberType::Float(f)) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => json!(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(|v| v.to_json_at(depth + 1)).collect())
            }
            Value::Object(o) => {
                let map = o
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_at(depth + 1)))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(map)
            }
            Value::Function(_) => json!("[function]"),
            Value::Element(e) => {
                let mut desc = json!({ "tag": e.tag_name() });
                if let Some(id) = e.attribute("id") {
                    desc["id"] = json!(id);
                }
                desc
            }
        }
    }
}
