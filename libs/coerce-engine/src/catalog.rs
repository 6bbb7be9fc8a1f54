use std::collections::HashMap;
use std::sync::Arc;

use coerce_api::Class;

/// Class hierarchy knowledge: which class may stand in for which.
///
/// Built-in classes have fixed rules; named classes get their supertypes
/// from `declare`. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    supertypes: HashMap<Arc<str>, Vec<Class>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named class with its direct supertypes. Re-declaring
    /// replaces the previous list.
    pub fn declare(&mut self, name: impl Into<Arc<str>>, supertypes: Vec<Class>) {
        self.supertypes.insert(name.into(), supertypes);
    }

    /// Whether `declare` has been called for `name`.
    pub fn is_declared(&self, name: &str) -> bool {
        self.supertypes.contains_key(name)
    }

    pub fn supertypes(&self, name: &str) -> &[Class] {
        self.supertypes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a value of class `src` may be used where `dest` is expected,
    /// boxing and unboxing included.
    pub fn is_assignable(&self, dest: &Class, src: &Class) -> bool {
        let mut visited = Vec::new();
        self.assignable(dest, src, &mut visited)
    }

    fn assignable(&self, dest: &Class, src: &Class, visited: &mut Vec<Arc<str>>) -> bool {
        if dest == src {
            return true;
        }
        match (dest, src) {
            (Class::Null, _) => false,
            (Class::Primitive(d), Class::Boxed(s)) => d == s,
            (Class::Primitive(_), _) => false,
            (_, Class::Primitive(p)) => self.assignable(dest, &Class::Boxed(*p), visited),
            (_, Class::Null) => true,
            (Class::Object, _) => true,
            (Class::Number, s) if s.is_numeric() => true,
            (Class::Collection, Class::List | Class::Set | Class::Queue) => true,
            (Class::Array(d), Class::Array(s)) => {
                // Primitive arrays are invariant; reference arrays are covariant.
                !d.is_primitive() && !s.is_primitive() && self.assignable(d, s, visited)
            }
            (_, Class::Named(name)) => {
                if visited.contains(name) {
                    return false;
                }
                visited.push(name.clone());
                self.supertypes(name)
                    .iter()
                    .any(|sup| self.assignable(dest, sup, visited))
            }
            _ => false,
        }
    }
}
