use coerce_api::{Class, Container, ConversionRequest, ConvertError, TypeDesc, Value};

use crate::dispatcher::Dispatcher;

/// Populates array and sequence destinations element by element.
///
/// - Non-iterable source → one-element container
/// - Array destination → array of exactly the source's length
/// - Sequence destination → default implementation of the requested
///   interface (list or set); interfaces without one are unconvertible
///
/// Each element goes through full dispatch, so nested containers work. The
/// first failing element aborts the conversion; no partial container escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiElementConverter;

/// Concrete container chosen for a multi-element destination.
enum Target<'d> {
    Array(&'d TypeDesc),
    List(&'d TypeDesc),
    Set(&'d TypeDesc),
}

impl<'d> Target<'d> {
    fn of(dest: &'d TypeDesc) -> Option<Self> {
        match dest {
            TypeDesc::Scalar(_) => None,
            TypeDesc::Array(element) => Some(Target::Array(element.as_ref())),
            TypeDesc::Sequence { element, container } => match container.default_impl()? {
                Container::Set => Some(Target::Set(element.as_ref())),
                _ => Some(Target::List(element.as_ref())),
            },
        }
    }

    fn element(&self) -> &'d TypeDesc {
        match self {
            Target::Array(e) | Target::List(e) | Target::Set(e) => *e,
        }
    }

    fn build(&self, items: Vec<Value>) -> Value {
        match self {
            Target::Array(element) => Value::Array {
                element: element.erasure(),
                items,
            },
            Target::List(_) => Value::List(items),
            Target::Set(_) => Value::set_from(items),
        }
    }
}

impl MultiElementConverter {
    pub fn can_convert(&self, dispatcher: &Dispatcher, request: &ConversionRequest<'_>) -> bool {
        let Some(target) = Target::of(request.dest()) else {
            return false;
        };
        let element = target.element();

        match request.source_object() {
            None => match request.source_class() {
                Class::Array(src_element) => {
                    dispatcher.can_convert_class_to_type(src_element, element)
                }
                // Item classes of a raw collection are unknown until there is a value.
                src if src.is_iterable() => true,
                src => dispatcher.can_convert_class_to_type(src, element),
            },
            Some(Value::Null) => true,
            Some(value) => match value.items() {
                Some(items) => {
                    items.is_empty()
                        || items
                            .iter()
                            .any(|item| dispatcher.can_convert_value_to_type(item, element))
                }
                None => dispatcher.can_convert_value_to_type(value, element),
            },
        }
    }

    pub fn convert(
        &self,
        dispatcher: &Dispatcher,
        request: &ConversionRequest<'_>,
    ) -> Result<Value, ConvertError> {
        let value = request.require_source()?;
        let dest = request.dest();
        let target = Target::of(dest).ok_or_else(|| {
            let detail = match dest {
                TypeDesc::Sequence { container, .. } => {
                    format!("{container} has no default implementation")
                }
                _ => "destination is not an array or sequence".to_string(),
            };
            ConvertError::mismatch(request.source_class(), dest, detail)
        })?;

        if value.is_null() {
            return Ok(Value::Null);
        }

        let element = target.element();
        let sources: Vec<&Value> = match value.items() {
            Some(items) => items.iter().collect(),
            None => vec![value],
        };

        let mut converted = Vec::with_capacity(sources.len());
        for (index, item) in sources.into_iter().enumerate() {
            let out = dispatcher
                .convert_value_to_type(item, element)
                .map_err(|e| ConvertError::element(index, e))?
                .ok_or_else(|| {
                    ConvertError::element(
                        index,
                        ConvertError::mismatch(
                            &item.class(),
                            element,
                            "no converter accepts this element",
                        ),
                    )
                })?;
            converted.push(out);
        }

        Ok(target.build(converted))
    }
}
