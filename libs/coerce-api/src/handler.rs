use crate::error::ConvertError;
use crate::request::ConversionRequest;
use crate::value::Value;

/// Single-strategy conversion handler.
///
/// Solves one category of conversion (cast, string rendering, parsing,
/// construction). The dispatcher owns an ordered list of handlers and asks
/// each in turn; the first whose `can_handle` returns `true` converts.
///
/// - `can_handle` is a coarse compatibility check: pure, never fails, says
///   `false` when the handler simply does not apply.
/// - `convert` is only called after `can_handle` returned `true` for the same
///   request, and may still fail (`"5.1"` passes the check for `int`).
pub trait ConverterHandler: Send + Sync {
    /// Stable name used in configuration and logs.
    fn name(&self) -> &str;

    fn can_handle(&self, request: &ConversionRequest<'_>) -> bool;

    fn convert(&self, request: &ConversionRequest<'_>) -> Result<Value, ConvertError>;
}
