use coerce_api::{Class, ConversionRequest, ConvertError, ConverterHandler, Primitive, Value};

/// Primitive and boxed destinations.
///
/// Numeric sources are cast: widening is exact, narrowing fails when the
/// value is out of range or not whole. Everything else is parsed from the
/// source's text. The capability check is optimistic: any `String` source is
/// accepted for any primitive kind, so `"5.1"` → `int` passes here and fails
/// in `convert`. A null source gives an unboxed destination its default value.
#[derive(Debug, Default)]
pub struct PrimitiveHandler;

impl ConverterHandler for PrimitiveHandler {
    fn name(&self) -> &str {
        super::PRIMITIVE
    }

    fn can_handle(&self, request: &ConversionRequest<'_>) -> bool {
        let Some(dest) = request.dest().scalar_class() else {
            return false;
        };
        let Some(kind) = dest.primitive_kind() else {
            return false;
        };
        let src = request.source_class();
        match src {
            Class::String => true,
            Class::Null => dest.is_primitive(),
            _ if src.primitive_kind() == Some(kind) => true,
            _ => kind.is_numeric() && src.is_numeric(),
        }
    }

    fn convert(&self, request: &ConversionRequest<'_>) -> Result<Value, ConvertError> {
        let value = request.require_source()?;
        let dest = request.dest();
        let Some(kind) = dest.scalar_class().and_then(Class::primitive_kind) else {
            return Err(ConvertError::mismatch(
                request.source_class(),
                dest,
                "destination is not a primitive kind",
            ));
        };
        if value.is_null() {
            return Ok(kind.default_value());
        }
        let converted = match Number::of(value) {
            Some(number) if kind.is_numeric() => number.cast(kind),
            _ => kind.parse(&value.to_string()),
        };
        converted.map_err(|detail| ConvertError::mismatch(request.source_class(), dest, detail))
    }
}

/// A numeric source, held at the widest width of its family.
#[derive(Debug, Clone, Copy)]
enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        let number = match *value {
            Value::Byte(v) => Number::Integer(v.into()),
            Value::Short(v) => Number::Integer(v.into()),
            Value::Int(v) => Number::Integer(v.into()),
            Value::Long(v) => Number::Integer(v),
            Value::Float(v) => Number::Real(v.into()),
            Value::Double(v) => Number::Real(v),
            _ => return None,
        };
        Some(number)
    }

    fn real(self) -> f64 {
        match self {
            Number::Integer(v) => v as f64,
            Number::Real(v) => v,
        }
    }

    fn whole(self) -> Result<i64, String> {
        // 2^63; `i64::MAX as f64` rounds up to it.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        match self {
            Number::Integer(v) => Ok(v),
            Number::Real(v) if v.fract() == 0.0 && (-LIMIT..LIMIT).contains(&v) => Ok(v as i64),
            Number::Real(v) => Err(format!("{v} is not a whole number in range")),
        }
    }

    fn cast(self, kind: Primitive) -> Result<Value, String> {
        let out_of_range = |shown: &dyn std::fmt::Display| {
            format!("{shown} is out of range for {}", kind.name())
        };
        match kind {
            Primitive::Double => Ok(Value::Double(self.real())),
            Primitive::Float => {
                let v = self.real();
                let narrowed = v as f32;
                if v.is_finite() && narrowed.is_infinite() {
                    return Err(out_of_range(&v));
                }
                Ok(Value::Float(narrowed))
            }
            Primitive::Long => self.whole().map(Value::Long),
            Primitive::Int => {
                let v = self.whole()?;
                i32::try_from(v).map(Value::Int).map_err(|_| out_of_range(&v))
            }
            Primitive::Short => {
                let v = self.whole()?;
                i16::try_from(v).map(Value::Short).map_err(|_| out_of_range(&v))
            }
            Primitive::Byte => {
                let v = self.whole()?;
                i8::try_from(v).map(Value::Byte).map_err(|_| out_of_range(&v))
            }
            Primitive::Bool | Primitive::Char => Err(format!("{} is not numeric", kind.name())),
        }
    }
}
