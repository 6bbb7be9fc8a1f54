use std::collections::BTreeSet;

use crate::class::{Class, Primitive};
use crate::error::ConvertError;
use crate::types::TypeDesc;
use crate::value::Value;

/// Rust types a converted `Value` can be extracted into.
///
/// `dest_type()` is the descriptor the dispatcher converts to before
/// `from_value` unpacks the result.
pub trait FromValue: Sized {
    fn dest_type() -> TypeDesc;

    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

fn unexpected<T: FromValue>(value: &Value) -> Result<T, ConvertError> {
    Err(ConvertError::mismatch(
        &value.class(),
        &T::dest_type(),
        "converted value has the wrong shape",
    ))
}

impl FromValue for Value {
    fn dest_type() -> TypeDesc {
        TypeDesc::Scalar(Class::Object)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        Ok(value)
    }
}

macro_rules! impl_from_value_primitive {
    ($ty:ty, $prim:ident, $variant:ident) => {
        impl FromValue for $ty {
            fn dest_type() -> TypeDesc {
                TypeDesc::Scalar(Class::Primitive(Primitive::$prim))
            }

            fn from_value(value: Value) -> Result<Self, ConvertError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => unexpected::<Self>(&other),
                }
            }
        }
    };
}

impl_from_value_primitive!(bool, Bool, Bool);
impl_from_value_primitive!(char, Char, Char);
impl_from_value_primitive!(i8, Byte, Byte);
impl_from_value_primitive!(i16, Short, Short);
impl_from_value_primitive!(i32, Int, Int);
impl_from_value_primitive!(i64, Long, Long);
impl_from_value_primitive!(f32, Float, Float);
impl_from_value_primitive!(f64, Double, Double);

impl FromValue for String {
    fn dest_type() -> TypeDesc {
        TypeDesc::Scalar(Class::String)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Str(s) => Ok(s),
            other => unexpected::<Self>(&other),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn dest_type() -> TypeDesc {
        TypeDesc::list_of(T::dest_type())
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => unexpected::<Self>(&other),
        }
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn dest_type() -> TypeDesc {
        TypeDesc::set_of(T::dest_type())
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Set(items) => items.into_iter().map(T::from_value).collect(),
            other => unexpected::<Self>(&other),
        }
    }
}
