use coerce_api::{Class, ConversionRequest, ConvertError, ConverterHandler, Value};

/// Any value becomes its canonical text when the destination is `String`.
#[derive(Debug, Default)]
pub struct StringHandler;

impl ConverterHandler for StringHandler {
    fn name(&self) -> &str {
        super::STRING
    }

    fn can_handle(&self, request: &ConversionRequest<'_>) -> bool {
        request.dest().scalar_class() == Some(&Class::String)
    }

    fn convert(&self, request: &ConversionRequest<'_>) -> Result<Value, ConvertError> {
        Ok(Value::Str(request.require_source()?.to_string()))
    }
}
