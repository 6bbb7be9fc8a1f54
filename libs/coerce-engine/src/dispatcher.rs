use std::sync::Arc;

use coerce_api::{
    Class, ConversionRequest, ConvertError, ConverterHandler, FromValue, TypeDesc, Value,
};

use crate::multi::MultiElementConverter;
use crate::registry::HandlerRegistry;

/// Public conversion contract over an ordered handler registry.
///
/// Every overload normalizes to a `ConversionRequest`. Handlers are asked in
/// registration order and the first accepting one converts (first match, not
/// best match). Array and sequence destinations that no handler claims go to
/// the `MultiElementConverter`, which dispatches each element back here.
///
/// Queries (`can_convert*`) never fail and never convert. Executions
/// (`convert*`) propagate handler failures unchanged; nothing is retried.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    multi: MultiElementConverter,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            multi: MultiElementConverter,
        }
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    fn accepting_handler(
        &self,
        request: &ConversionRequest<'_>,
    ) -> Option<Arc<dyn ConverterHandler>> {
        let snapshot = self.registry.snapshot();
        let found = snapshot.iter().find(|h| h.can_handle(request)).cloned();
        if found.is_none() {
            tracing::trace!(
                src = %request.source_class(),
                dest = %request.dest(),
                "no handler accepts request"
            );
        }
        found
    }

    // ═══════════════════════════════════════════════════════════════
    //  Capability queries
    // ═══════════════════════════════════════════════════════════════

    pub fn can_convert(&self, request: &ConversionRequest<'_>) -> bool {
        if self.accepting_handler(request).is_some() {
            return true;
        }
        request.dest().is_multi_element() && self.multi.can_convert(self, request)
    }

    pub fn can_convert_class_to_type(&self, src: &Class, dest: &TypeDesc) -> bool {
        self.can_convert(&ConversionRequest::from_class_to_type(src.clone(), dest.clone()))
    }

    pub fn can_convert_class(&self, src: &Class, dest: &Class) -> bool {
        self.can_convert(&ConversionRequest::from_class(src.clone(), dest.clone()))
    }

    /// `true` does not promise that converting this particular value will
    /// succeed: `"5.1"` can in general become an `int`, but parsing it fails.
    pub fn can_convert_value_to_type(&self, src: &Value, dest: &TypeDesc) -> bool {
        self.can_convert(&ConversionRequest::from_value_to_type(src, dest.clone()))
    }

    pub fn can_convert_value(&self, src: &Value, dest: &Class) -> bool {
        self.can_convert(&ConversionRequest::from_value(src, dest.clone()))
    }

    // ═══════════════════════════════════════════════════════════════
    //  Conversions
    // ═══════════════════════════════════════════════════════════════

    /// Convert the request's source value.
    ///
    /// `Ok(None)` when nothing can convert it (best effort).
    /// `Err` when a handler accepted and failed, when an element of a
    /// multi-element conversion failed, or when the request has no value.
    pub fn convert(&self, request: &ConversionRequest<'_>) -> Result<Option<Value>, ConvertError> {
        request.require_source()?;

        if let Some(handler) = self.accepting_handler(request) {
            tracing::debug!(
                handler = handler.name(),
                src = %request.source_class(),
                dest = %request.dest(),
                "dispatching conversion"
            );
            return handler.convert(request).map(Some);
        }

        if request.dest().is_multi_element() {
            tracing::debug!(
                src = %request.source_class(),
                dest = %request.dest(),
                "populating multi-element destination"
            );
            return self.multi.convert(self, request).map(Some);
        }

        Ok(None)
    }

    /// Like [`convert`](Self::convert) with a full destination descriptor,
    /// creating and populating arrays and collections as needed.
    pub fn convert_value_to_type(
        &self,
        src: &Value,
        dest: &TypeDesc,
    ) -> Result<Option<Value>, ConvertError> {
        self.convert(&ConversionRequest::from_value_to_type(src, dest.clone()))
    }

    /// Convert to a concrete class. Unlike the untyped overloads, an
    /// unconvertible source is a `TypeMismatch`, never an absent result.
    pub fn convert_value(&self, src: &Value, dest: &Class) -> Result<Value, ConvertError> {
        let request = ConversionRequest::from_value(src, dest.clone());
        self.convert(&request)?.ok_or_else(|| unconvertible(&request))
    }

    /// Convert and extract into a Rust type.
    pub fn convert_to<T: FromValue>(&self, src: &Value) -> Result<T, ConvertError> {
        let request = ConversionRequest::from_value_to_type(src, T::dest_type());
        let value = self
            .convert(&request)?
            .ok_or_else(|| unconvertible(&request))?;
        T::from_value(value)
    }
}

fn unconvertible(request: &ConversionRequest<'_>) -> ConvertError {
    ConvertError::mismatch(
        request.source_class(),
        request.dest(),
        "no converter accepts this conversion",
    )
}
