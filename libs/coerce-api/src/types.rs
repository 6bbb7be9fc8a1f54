use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::class::Class;
use crate::error::ConvertError;

/// Container interface requested by a sequence destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    Collection,
    List,
    Set,
    Queue,
    /// User-declared container class. Never has a default implementation.
    Named(Arc<str>),
}

impl Container {
    fn from_name(name: &str) -> Self {
        [
            ("collection", Container::Collection),
            ("list", Container::List),
            ("set", Container::Set),
            ("queue", Container::Queue),
        ]
        .into_iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| c)
        .unwrap_or_else(|| Container::Named(name.into()))
    }

    pub fn class(&self) -> Class {
        match self {
            Container::Collection => Class::Collection,
            Container::List => Class::List,
            Container::Set => Class::Set,
            Container::Queue => Class::Queue,
            Container::Named(name) => Class::Named(name.clone()),
        }
    }

    /// Concrete implementation instantiated for this interface.
    ///
    /// - `Set` → set
    /// - `List`, `Collection` → ordered list
    /// - everything else → none
    pub fn default_impl(&self) -> Option<Container> {
        match self {
            Container::Collection | Container::List => Some(Container::List),
            Container::Set => Some(Container::Set),
            Container::Queue | Container::Named(_) => None,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.class(), f)
    }
}

/// Shape of a destination descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescKind {
    Scalar,
    Array,
    Sequence,
}

/// Destination type descriptor.
///
/// Carries just enough structure to decide single- vs multi-element
/// conversion and to find the element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Scalar(Class),
    Array(Box<TypeDesc>),
    Sequence {
        element: Box<TypeDesc>,
        container: Container,
    },
}

impl TypeDesc {
    pub fn array_of(element: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(element))
    }

    pub fn list_of(element: TypeDesc) -> Self {
        Self::sequence_of(element, Container::List)
    }

    pub fn set_of(element: TypeDesc) -> Self {
        Self::sequence_of(element, Container::Set)
    }

    pub fn sequence_of(element: TypeDesc, container: Container) -> Self {
        TypeDesc::Sequence {
            element: Box::new(element),
            container,
        }
    }

    pub fn kind(&self) -> DescKind {
        match self {
            TypeDesc::Scalar(_) => DescKind::Scalar,
            TypeDesc::Array(_) => DescKind::Array,
            TypeDesc::Sequence { .. } => DescKind::Sequence,
        }
    }

    pub fn is_multi_element(&self) -> bool {
        self.kind() != DescKind::Scalar
    }

    /// Element descriptor of an array or sequence.
    pub fn element(&self) -> Option<&TypeDesc> {
        match self {
            TypeDesc::Scalar(_) => None,
            TypeDesc::Array(element) | TypeDesc::Sequence { element, .. } => Some(element),
        }
    }

    pub fn scalar_class(&self) -> Option<&Class> {
        match self {
            TypeDesc::Scalar(class) => Some(class),
            _ => None,
        }
    }

    /// Raw class with element information dropped from sequences.
    pub fn erasure(&self) -> Class {
        match self {
            TypeDesc::Scalar(class) => class.clone(),
            TypeDesc::Array(element) => Class::array_of(element.erasure()),
            TypeDesc::Sequence { container, .. } => container.class(),
        }
    }
}

impl From<Class> for TypeDesc {
    fn from(class: Class) -> Self {
        let any = || TypeDesc::Scalar(Class::Object);
        match class {
            Class::Array(element) => TypeDesc::array_of(TypeDesc::from(*element)),
            Class::Collection => TypeDesc::sequence_of(any(), Container::Collection),
            Class::List => TypeDesc::sequence_of(any(), Container::List),
            Class::Set => TypeDesc::sequence_of(any(), Container::Set),
            Class::Queue => TypeDesc::sequence_of(any(), Container::Queue),
            other => TypeDesc::Scalar(other),
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Scalar(class) => write!(f, "{class}"),
            TypeDesc::Array(element) => write!(f, "{element}[]"),
            TypeDesc::Sequence { element, container } => write!(f, "{container}<{element}>"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Descriptor text form: `int`, `Integer[]`, `list<set<String>>`
// ═══════════════════════════════════════════════════════════════

fn malformed(input: &str) -> ConvertError {
    ConvertError::InvalidRequest(format!("malformed type descriptor {input:?}"))
}

fn parse_desc<'a>(input: &'a str, whole: &str) -> Result<(TypeDesc, &'a str), ConvertError> {
    let input = input.trim_start();
    let end = input
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(input.len());
    let (ident, mut rest) = input.split_at(end);
    if ident.is_empty() {
        return Err(malformed(whole));
    }

    rest = rest.trim_start();
    let mut desc = if let Some(inner) = rest.strip_prefix('<') {
        let (element, after) = parse_desc(inner, whole)?;
        rest = after.trim_start().strip_prefix('>').ok_or_else(|| malformed(whole))?;
        TypeDesc::sequence_of(element, Container::from_name(ident))
    } else {
        TypeDesc::from(Class::from_name(ident))
    };

    loop {
        rest = rest.trim_start();
        match rest.strip_prefix("[]") {
            Some(after) => {
                desc = TypeDesc::array_of(desc);
                rest = after;
            }
            None => return Ok((desc, rest)),
        }
    }
}

impl FromStr for TypeDesc {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (desc, rest) = parse_desc(s, s)?;
        if !rest.trim().is_empty() {
            return Err(malformed(s));
        }
        Ok(desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Primitive;

    fn int() -> TypeDesc {
        TypeDesc::Scalar(Class::Primitive(Primitive::Int))
    }

    #[test]
    fn parses_nested_descriptors() {
        assert_eq!("int".parse::<TypeDesc>().unwrap(), int());
        assert_eq!("int[]".parse::<TypeDesc>().unwrap(), TypeDesc::array_of(int()));
        assert_eq!(
            "list< set<int> >".parse::<TypeDesc>().unwrap(),
            TypeDesc::list_of(TypeDesc::set_of(int()))
        );
        assert_eq!(
            "List<int[]>".parse::<TypeDesc>().unwrap(),
            TypeDesc::list_of(TypeDesc::array_of(int()))
        );
        assert_eq!(
            "Stack<String>".parse::<TypeDesc>().unwrap(),
            TypeDesc::sequence_of(TypeDesc::Scalar(Class::String), Container::Named("Stack".into()))
        );
        assert!("list<int".parse::<TypeDesc>().is_err());
        assert!("int]".parse::<TypeDesc>().is_err());
        assert!("".parse::<TypeDesc>().is_err());
    }

    #[test]
    fn raw_classes_normalize_to_descriptors() {
        assert_eq!(
            TypeDesc::from(Class::List),
            TypeDesc::list_of(TypeDesc::Scalar(Class::Object))
        );
        assert_eq!(
            TypeDesc::from(Class::array_of(Class::Primitive(Primitive::Int))),
            TypeDesc::array_of(int())
        );
        assert_eq!(TypeDesc::from(Class::String).kind(), DescKind::Scalar);
    }

    #[test]
    fn erasure_and_display() {
        let desc = TypeDesc::list_of(TypeDesc::array_of(int()));
        assert_eq!(desc.erasure(), Class::List);
        assert_eq!(desc.to_string(), "List<int[]>");
        assert_eq!(
            TypeDesc::array_of(int()).erasure(),
            Class::array_of(Class::Primitive(Primitive::Int))
        );
    }

    #[test]
    fn container_defaults() {
        assert_eq!(Container::Collection.default_impl(), Some(Container::List));
        assert_eq!(Container::Set.default_impl(), Some(Container::Set));
        assert_eq!(Container::Queue.default_impl(), None);
    }
}
