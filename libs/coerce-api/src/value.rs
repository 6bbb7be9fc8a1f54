use std::fmt;
use std::sync::Arc;

use crate::class::{Class, Primitive};
use crate::error::ConvertError;

/// Dynamically typed runtime value.
///
/// Strategy by type:
/// - Scalars: stored unboxed, reported with their boxed class
/// - `Str`: owned UTF-8
/// - `Array`: remembers its element class, length fixed at construction
/// - `List`, `Set`: recursive; `Set` keeps insertion order and no duplicates
/// - `Object`: instance of a user-declared class
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Array { element: Class, items: Vec<Value> },
    List(Vec<Value>),
    Set(Vec<Value>),
    Object(Object),
}

/// Instance of a `Class::Named` class.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub class: Arc<str>,
    /// Ordered `(name, value)` pairs.
    pub fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new(class: impl Into<Arc<str>>) -> Self {
        Self {
            class: class.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Build a set, dropping later duplicates.
    pub fn set_from(items: impl IntoIterator<Item = Value>) -> Self {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Runtime class.
    pub fn class(&self) -> Class {
        match self {
            Value::Null => Class::Null,
            Value::Bool(_) => Class::Boxed(Primitive::Bool),
            Value::Char(_) => Class::Boxed(Primitive::Char),
            Value::Byte(_) => Class::Boxed(Primitive::Byte),
            Value::Short(_) => Class::Boxed(Primitive::Short),
            Value::Int(_) => Class::Boxed(Primitive::Int),
            Value::Long(_) => Class::Boxed(Primitive::Long),
            Value::Float(_) => Class::Boxed(Primitive::Float),
            Value::Double(_) => Class::Boxed(Primitive::Double),
            Value::Str(_) => Class::String,
            Value::Array { element, .. } => Class::array_of(element.clone()),
            Value::List(_) => Class::List,
            Value::Set(_) => Class::Set,
            Value::Object(o) => Class::Named(o.class.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Items of an array, list or set. `None` for everything else.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } | Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Map a JSON document onto a value.
    ///
    /// Integers become `Int` when they fit, else `Long`; other numbers
    /// `Double`; arrays `List`. JSON objects have no class and are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ConvertError> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i32::try_from(i).map(Value::Int).unwrap_or(Value::Long(i)))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Double(f))
                } else {
                    Err(ConvertError::InvalidRequest(format!("number out of range: {n}")))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            serde_json::Value::Object(_) => Err(ConvertError::InvalidRequest(
                "JSON objects carry no class and cannot be used as source values".into(),
            )),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Canonical textual rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::Array { items, .. } | Value::List(items) | Value::Set(items) => {
                write_items(f, items)
            }
            Value::Object(o) => {
                write!(f, "{}{{", o.class)?;
                for (i, (name, value)) in o.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}
