use std::sync::Arc;

use coerce_api::{ConversionRequest, ConvertError, ConverterHandler, Value};

use crate::catalog::TypeCatalog;

/// Cast: the source already is the destination class (or a subclass, or its
/// boxed/unboxed twin). Returns the value unchanged.
pub struct IdentityHandler {
    catalog: Arc<TypeCatalog>,
}

impl IdentityHandler {
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl ConverterHandler for IdentityHandler {
    fn name(&self) -> &str {
        super::IDENTITY
    }

    fn can_handle(&self, request: &ConversionRequest<'_>) -> bool {
        let src = request.source_class();
        // A bare destination class is a cast target even when it is a raw
        // container or array class.
        if !request.has_dest_type() {
            return self.catalog.is_assignable(&request.dest().erasure(), src);
        }
        request
            .dest()
            .scalar_class()
            .is_some_and(|dest| self.catalog.is_assignable(dest, src))
    }

    fn convert(&self, request: &ConversionRequest<'_>) -> Result<Value, ConvertError> {
        request.require_source().cloned()
    }
}
