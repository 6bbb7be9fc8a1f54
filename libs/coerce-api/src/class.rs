use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Primitive kinds. Each has an unboxed form (`Class::Primitive`) and a boxed
/// form (`Class::Boxed`); runtime values always carry the boxed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Bool,
        Primitive::Char,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    /// Unboxed name (`int`).
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "boolean",
            Primitive::Char => "char",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// Boxed name (`Integer`).
    pub fn boxed_name(self) -> &'static str {
        match self {
            Primitive::Bool => "Boolean",
            Primitive::Char => "Character",
            Primitive::Byte => "Byte",
            Primitive::Short => "Short",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Bool | Primitive::Char)
    }

    /// Value an absent (null) source takes when the destination is unboxed.
    pub fn default_value(self) -> Value {
        match self {
            Primitive::Bool => Value::Bool(false),
            Primitive::Char => Value::Char('\0'),
            Primitive::Byte => Value::Byte(0),
            Primitive::Short => Value::Short(0),
            Primitive::Int => Value::Int(0),
            Primitive::Long => Value::Long(0),
            Primitive::Float => Value::Float(0.0),
            Primitive::Double => Value::Double(0.0),
        }
    }

    /// Standard text-to-primitive parsing (`FromStr` of the matching Rust type).
    ///
    /// `char` accepts exactly one character.
    pub fn parse(self, text: &str) -> Result<Value, String> {
        match self {
            Primitive::Bool => text.parse().map(Value::Bool).map_err(|e| e.to_string()),
            Primitive::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(format!("expected a single character, got {text:?}")),
                }
            }
            Primitive::Byte => text.parse().map(Value::Byte).map_err(|e| e.to_string()),
            Primitive::Short => text.parse().map(Value::Short).map_err(|e| e.to_string()),
            Primitive::Int => text.parse().map(Value::Int).map_err(|e| e.to_string()),
            Primitive::Long => text.parse().map(Value::Long).map_err(|e| e.to_string()),
            Primitive::Float => text.parse().map(Value::Float).map_err(|e| e.to_string()),
            Primitive::Double => text.parse().map(Value::Double).map_err(|e| e.to_string()),
        }
    }

    fn from_name(name: &str) -> Option<(Self, bool)> {
        Self::ALL.into_iter().find_map(|p| {
            if p.name() == name {
                Some((p, false))
            } else if p.boxed_name() == name {
                Some((p, true))
            } else {
                None
            }
        })
    }
}

/// A concrete class: the runtime class of a value, or a destination class.
///
/// `Null` is the class of the null value only; it never appears as a
/// destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    Null,
    Object,
    Number,
    String,
    Primitive(Primitive),
    Boxed(Primitive),
    Array(Box<Class>),
    Collection,
    List,
    Set,
    Queue,
    /// User-declared class. Hierarchy lives in the engine's type catalog.
    Named(Arc<str>),
}

impl Class {
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Class::Named(name.into())
    }

    pub fn array_of(element: Class) -> Self {
        Class::Array(Box::new(element))
    }

    /// Resolve a single class name (`int`, `Integer`, `List`, `Circle`).
    ///
    /// Unknown identifiers become `Named`.
    pub fn from_name(name: &str) -> Self {
        if let Some((p, boxed)) = Primitive::from_name(name) {
            return if boxed { Class::Boxed(p) } else { Class::Primitive(p) };
        }
        match name {
            "Object" => Class::Object,
            "Number" => Class::Number,
            "String" => Class::String,
            "Collection" => Class::Collection,
            "List" => Class::List,
            "Set" => Class::Set,
            "Queue" => Class::Queue,
            other => Class::named(other),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Class::Primitive(_))
    }

    /// Primitive kind of a primitive or boxed class.
    pub fn primitive_kind(&self) -> Option<Primitive> {
        match self {
            Class::Primitive(p) | Class::Boxed(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.primitive_kind().is_some_and(Primitive::is_numeric)
    }

    /// Array and collection classes: sources whose items can be iterated.
    pub fn is_iterable(&self) -> bool {
        matches!(
            self,
            Class::Array(_) | Class::Collection | Class::List | Class::Set | Class::Queue
        )
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Null => f.write_str("null"),
            Class::Object => f.write_str("Object"),
            Class::Number => f.write_str("Number"),
            Class::String => f.write_str("String"),
            Class::Primitive(p) => f.write_str(p.name()),
            Class::Boxed(p) => f.write_str(p.boxed_name()),
            Class::Array(element) => write!(f, "{element}[]"),
            Class::Collection => f.write_str("Collection"),
            Class::List => f.write_str("List"),
            Class::Set => f.write_str("Set"),
            Class::Queue => f.write_str("Queue"),
            Class::Named(name) => f.write_str(name),
        }
    }
}
