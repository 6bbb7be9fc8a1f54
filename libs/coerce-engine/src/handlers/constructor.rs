use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use coerce_api::{Class, ConversionRequest, ConvertError, ConverterHandler, Value};

use crate::catalog::TypeCatalog;

/// Single-argument construction function. `Err` carries the failure detail.
pub type ConstructFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// One construction path into a destination class.
#[derive(Clone)]
pub struct Constructor {
    pub param: Class,
    build: ConstructFn,
}

impl Constructor {
    pub fn invoke(&self, arg: &Value) -> Result<Value, String> {
        (self.build)(arg)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("param", &self.param).finish()
    }
}

/// Per-destination constructor registry. Lookup order is registration order.
#[derive(Debug, Clone, Default)]
pub struct ConstructorTable {
    by_dest: HashMap<Class, Vec<Constructor>>,
}

impl ConstructorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, dest: Class, param: Class, build: F)
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.by_dest.entry(dest).or_default().push(Constructor {
            param,
            build: Arc::new(build),
        });
    }

    pub fn constructors(&self, dest: &Class) -> &[Constructor] {
        self.by_dest.get(dest).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First constructor of `dest` whose parameter accepts `src`.
    pub fn find(&self, catalog: &TypeCatalog, dest: &Class, src: &Class) -> Option<&Constructor> {
        self.constructors(dest)
            .iter()
            .find(|c| catalog.is_assignable(&c.param, src))
    }

    /// First constructor of `dest` taking a `String`.
    pub fn find_textual(&self, dest: &Class) -> Option<&Constructor> {
        self.constructors(dest).iter().find(|c| c.param == Class::String)
    }
}

/// What a matched constructor is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Argument {
    Source,
    Rendered,
}

/// Builds the destination through a registered single-argument constructor.
pub struct ConstructorHandler {
    catalog: Arc<TypeCatalog>,
    table: Arc<ConstructorTable>,
}

impl ConstructorHandler {
    pub fn new(catalog: Arc<TypeCatalog>, table: Arc<ConstructorTable>) -> Self {
        Self { catalog, table }
    }

    /// A constructor taking the source directly, else one taking its text.
    fn lookup(&self, request: &ConversionRequest<'_>) -> Option<(&Constructor, Argument)> {
        let dest = request.dest().scalar_class()?;
        if let Some(c) = self.table.find(&self.catalog, dest, request.source_class()) {
            return Some((c, Argument::Source));
        }
        self.table.find_textual(dest).map(|c| (c, Argument::Rendered))
    }
}

impl ConverterHandler for ConstructorHandler {
    fn name(&self) -> &str {
        super::CONSTRUCTOR
    }

    fn can_handle(&self, request: &ConversionRequest<'_>) -> bool {
        self.lookup(request).is_some()
    }

    fn convert(&self, request: &ConversionRequest<'_>) -> Result<Value, ConvertError> {
        let value = request.require_source()?;
        let (constructor, argument) = self.lookup(request).ok_or_else(|| {
            let detail = "no matching constructor";
            ConvertError::mismatch(request.source_class(), request.dest(), detail)
        })?;
        let built = match argument {
            Argument::Source => constructor.invoke(value),
            Argument::Rendered => constructor.invoke(&Value::Str(value.to_string())),
        };
        built.map_err(|detail| {
            ConvertError::mismatch(request.source_class(), request.dest(), detail)
        })
    }
}
