//! Dynamic values exchanged between sources, the host and callers.
//!
//! Getters are untyped: they receive positional [`Value`] arguments and
//! return a [`Value`]. `Undefined` and `Null` are both "no value" for the
//! resolver (see [`Value::exists`]).

mod convert;
mod function;

use std::cell::RefCell;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::host::Element;

pub use function::Getter;

/// Shared, mutable property bag. Two `Value::Object`s are equal only when
/// they point at the same bag.
pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;

#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(NumberType),
    String(String),
    Array(Vec<Value>),
    Object(ObjectRef),
    Function(Getter),
    Element(Element),
}

impl Value {
    /// Build an object value from key/value pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<IndexMap<_, _>>();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    /// An object value with no properties.
    pub fn empty_object() -> Value {
        Value::Object(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Wrap a closure as a callable value.
    pub fn function<F>(f: F) -> Value
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Function(Getter::new(f))
    }

    /// False for `Undefined` and `Null`, true for everything else.
    pub fn exists(&self) -> bool {
        !matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Value::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Turn the value into a positional argument list. Arrays are taken as
    /// the list itself, `Undefined` becomes the empty list and any other
    /// value becomes a one-element list.
    pub fn into_arguments(self) -> Vec<Value> {
        match self {
            Value::Array(items) => items,
            Value::Undefined => Vec::new(),
            other => vec![other],
        }
    }

    /// Read a property of an object value. Non-objects have no properties.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(o) => o.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Set a property on an object value. Returns `false` when the value is
    /// not an object.
    pub fn set(&self, key: impl Into<String>, value: Value) -> bool {
        match self {
            Value::Object(o) => {
                o.borrow_mut().insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Walk `segments` through nested objects. Any missing key or
    /// non-object on the way gives `None`.
    pub fn get_nested<S: AsRef<str>>(&self, segments: &[S]) -> Option<Value> {
        let mut current = self.clone();
        for segment in segments {
            current = current.get(segment.as_ref())?;
        }
        Some(current)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Element(_) => "element",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                let parts = items.iter().map(|v| v.to_string()).collect::<Vec<_>>();
                write!(f, "{}", parts.join(","))
            }
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Function(_) => write!(f, "[function]"),
            Value::Element(e) => write!(f, "[element {}]", e.tag_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Value::Undefined"),
            Value::Null => write!(f, "Value::Null"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::Number(n) => write!(f, "Value::Number({:?})", n),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Array(items) => f.debug_tuple("Value::Array").field(items).finish(),
            Value::Object(o) => match o.try_borrow() {
                Ok(map) => write!(f, "Value::Object({:?})", map.keys().collect::<Vec<_>>()),
                Err(_) => write!(f, "Value::Object(...)"),
            },
            Value::Function(g) => write!(f, "Value::Function({:?})", g),
            Value::Element(e) => write!(f, "Value::Element(<{}> {})", e.tag_name(), e.key()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Element(a), Value::Element(b)) => a.key() == b.key(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum NumberType {
    Integer(i64),
    Float(f64),
}

impl NumberType {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumberType::Integer(i) => *i as f64,
            NumberType::Float(f) => *f,
        }
    }
}

impl PartialEq for NumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumberType::Integer(a), NumberType::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumberType::Integer(i) => write!(f, "{}", i),
            NumberType::Float(nf) if nf.is_nan() => write!(f, "NaN"),
            NumberType::Float(nf) if nf.is_infinite() => {
                write!(f, "{}Infinity", if *nf > 0.0 { "" } else { "-" })
            }
            NumberType::Float(nf) => write!(f, "{}", nf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists() {
        assert!(!Value::Undefined.exists());
        assert!(!Value::Null.exists());
        assert!(Value::Boolean(false).exists());
        assert!(Value::from("").exists());
        assert!(Value::from(0).exists());
    }

    #[test]
    fn test_into_arguments() {
        assert_eq!(Value::Undefined.into_arguments(), Vec::<Value>::new());
        assert_eq!(Value::Null.into_arguments(), vec![Value::Null]);
        assert_eq!(Value::from("aaa").into_arguments(), vec![Value::from("aaa")]);
        assert_eq!(
            Value::from(vec![Value::from("aaa"), Value::from("bbb")]).into_arguments(),
            vec![Value::from("aaa"), Value::from("bbb")]
        );
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let a = Value::object(vec![("x", Value::from(1))]);
        let b = Value::object(vec![("x", Value::from(1))]);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_nested() {
        let inner = Value::object(vec![("bbb", Value::from("ccc"))]);
        let root = Value::object(vec![("aaa", inner)]);
        assert_eq!(root.get_nested(&["aaa", "bbb"]), Some(Value::from("ccc")));
        assert_eq!(root.get_nested(&["aaa", "xxx"]), None);
        assert_eq!(root.get_nested(&["aaa", "bbb", "ccc"]), None);
        assert_eq!(root.get_nested::<&str>(&[]), Some(root.clone()));
    }

    #[test]
    fn test_number_display() {
        assert_eq!(NumberType::Integer(3).to_string(), "3");
        assert_eq!(NumberType::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(NumberType::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(NumberType::Integer(2), NumberType::Float(2.0));
    }
}
