use std::fmt;

use crate::class::Class;
use crate::types::TypeDesc;

/// Error kind for conversion errors.
///
/// "Unconvertible" is deliberately absent: it is reported as `false` from
/// capability checks and as an absent result from untyped conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A handler committed to the conversion and the transformation failed.
    TypeMismatch,
    /// Malformed request (missing source or destination).
    InvalidRequest,
}

/// Conversion error returned by every executing operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("cannot convert {from} to {to}: {detail}")]
    TypeMismatch {
        from: Class,
        to: TypeDesc,
        detail: String,
    },

    #[error("element {index}: {cause}")]
    Element {
        index: usize,
        #[source]
        cause: Box<ConvertError>,
    },

    #[error("invalid conversion request: {0}")]
    InvalidRequest(String),
}

impl ConvertError {
    pub fn mismatch(from: &Class, to: &TypeDesc, detail: impl Into<String>) -> Self {
        Self::TypeMismatch {
            from: from.clone(),
            to: to.clone(),
            detail: detail.into(),
        }
    }

    pub fn element(index: usize, cause: ConvertError) -> Self {
        Self::Element {
            index,
            cause: Box::new(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::TypeMismatch { .. } | ConvertError::Element { .. } => {
                ErrorKind::TypeMismatch
            }
            ConvertError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Index of the failing element for multi-element conversions.
    pub fn failing_index(&self) -> Option<usize> {
        match self {
            ConvertError::Element { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Add context to the error, preserving its kind.
    ///
    /// Produces: `"context: original detail"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            ConvertError::TypeMismatch { from, to, detail } => ConvertError::TypeMismatch {
                from,
                to,
                detail: format!("{ctx}: {detail}"),
            },
            ConvertError::Element { index, cause } => ConvertError::Element {
                index,
                cause: Box::new(cause.with_context(ctx)),
            },
            ConvertError::InvalidRequest(msg) => {
                ConvertError::InvalidRequest(format!("{ctx}: {msg}"))
            }
        }
    }
}
