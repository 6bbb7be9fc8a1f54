use crate::class::Class;
use crate::error::ConvertError;
use crate::types::TypeDesc;
use crate::value::Value;

/// One conversion ask: a source (value or bare class) and a destination
/// (class or full descriptor).
///
/// Immutable once built. The destination is normalized to a `TypeDesc` at
/// construction, so handlers never re-derive it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest<'a> {
    source_object: Option<&'a Value>,
    source_class: Class,
    dest_class: Option<Class>,
    dest_type: Option<TypeDesc>,
    dest: TypeDesc,
}

impl<'a> ConversionRequest<'a> {
    pub fn from_value(src: &'a Value, dest: Class) -> Self {
        Self {
            source_object: Some(src),
            source_class: src.class(),
            dest: TypeDesc::from(dest.clone()),
            dest_class: Some(dest),
            dest_type: None,
        }
    }

    pub fn from_value_to_type(src: &'a Value, dest: TypeDesc) -> Self {
        Self {
            source_object: Some(src),
            source_class: src.class(),
            dest_class: None,
            dest: dest.clone(),
            dest_type: Some(dest),
        }
    }

    pub fn from_class(src: Class, dest: Class) -> Self {
        Self {
            source_object: None,
            source_class: src,
            dest: TypeDesc::from(dest.clone()),
            dest_class: Some(dest),
            dest_type: None,
        }
    }

    pub fn from_class_to_type(src: Class, dest: TypeDesc) -> Self {
        Self {
            source_object: None,
            source_class: src,
            dest_class: None,
            dest: dest.clone(),
            dest_type: Some(dest),
        }
    }

    pub fn builder() -> RequestBuilder<'a> {
        RequestBuilder::default()
    }

    pub fn source_object(&self) -> Option<&'a Value> {
        self.source_object
    }

    /// Runtime class of the source value, or the explicitly given class.
    pub fn source_class(&self) -> &Class {
        &self.source_class
    }

    pub fn dest_class(&self) -> Option<&Class> {
        self.dest_class.as_ref()
    }

    pub fn dest_type(&self) -> Option<&TypeDesc> {
        self.dest_type.as_ref()
    }

    /// Authoritative destination: `dest_type` when given, else `dest_class`.
    pub fn dest(&self) -> &TypeDesc {
        &self.dest
    }

    pub fn has_source_object(&self) -> bool {
        self.source_object.is_some()
    }

    pub fn has_dest_type(&self) -> bool {
        self.dest_type.is_some()
    }

    /// Source value, or `InvalidRequest` for class-only requests.
    pub fn require_source(&self) -> Result<&'a Value, ConvertError> {
        self.source_object.ok_or_else(|| {
            ConvertError::InvalidRequest(format!(
                "request {} -> {} has no source value to convert",
                self.source_class, self.dest
            ))
        })
    }
}

/// Builder with every field optional; `build()` rejects incomplete requests.
#[derive(Debug, Default)]
pub struct RequestBuilder<'a> {
    source_object: Option<&'a Value>,
    source_class: Option<Class>,
    dest_class: Option<Class>,
    dest_type: Option<TypeDesc>,
}

impl<'a> RequestBuilder<'a> {
    pub fn source_object(mut self, value: &'a Value) -> Self {
        self.source_object = Some(value);
        self
    }

    /// Used only when no source object is given.
    pub fn source_class(mut self, class: Class) -> Self {
        self.source_class = Some(class);
        self
    }

    pub fn dest_class(mut self, class: Class) -> Self {
        self.dest_class = Some(class);
        self
    }

    pub fn dest_type(mut self, desc: TypeDesc) -> Self {
        self.dest_type = Some(desc);
        self
    }

    pub fn build(self) -> Result<ConversionRequest<'a>, ConvertError> {
        let source_class = match (self.source_object, self.source_class) {
            (Some(value), _) => value.class(),
            (None, Some(class)) => class,
            (None, None) => {
                return Err(ConvertError::InvalidRequest(
                    "neither a source object nor a source class was given".into(),
                ));
            }
        };
        let dest = match (&self.dest_type, &self.dest_class) {
            (Some(desc), _) => desc.clone(),
            (None, Some(class)) => TypeDesc::from(class.clone()),
            (None, None) => {
                return Err(ConvertError::InvalidRequest(
                    "neither a destination class nor a destination type was given".into(),
                ));
            }
        };
        Ok(ConversionRequest {
            source_object: self.source_object,
            source_class,
            dest_class: self.dest_class,
            dest_type: self.dest_type,
            dest,
        })
    }
}
