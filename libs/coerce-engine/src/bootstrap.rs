use std::collections::HashSet;
use std::sync::Arc;

use coerce_api::{Class, ConverterHandler, Object, TypeDesc};

use crate::catalog::TypeCatalog;
use crate::config::{EngineConfig, TypeConfig};
use crate::dispatcher::Dispatcher;
use crate::error::EngineError;
use crate::handlers::{
    self, ConstructorHandler, ConstructorTable, IdentityHandler, PrimitiveHandler, StringHandler,
};
use crate::registry::HandlerRegistry;

/// Dispatcher with the built-in handlers in default order, an empty catalog
/// and no constructors.
pub fn default_dispatcher() -> Dispatcher {
    let catalog = Arc::new(TypeCatalog::new());
    let table = Arc::new(ConstructorTable::new());
    let registry = Arc::new(HandlerRegistry::new());
    for name in handlers::DEFAULT_ORDER {
        if let Some(handler) = builtin_handler(name, &catalog, &table) {
            registry.register(handler);
        }
    }
    Dispatcher::new(registry)
}

/// Build a dispatcher from configuration.
///
/// 1. Declare named classes in the catalog.
/// 2. Add record constructors declared by those classes to `constructors`.
/// 3. Register handlers in the configured order.
pub fn build_dispatcher(
    config: &EngineConfig,
    mut constructors: ConstructorTable,
) -> Result<Dispatcher, EngineError> {
    let mut catalog = TypeCatalog::new();
    for type_cfg in &config.types {
        let type_ctx = format!("type '{}'", type_cfg.name);
        declare_type(&mut catalog, &mut constructors, type_cfg)
            .map_err(|e| e.with_context(&type_ctx))?;
    }

    let catalog = Arc::new(catalog);
    let table = Arc::new(constructors);
    let registry = Arc::new(HandlerRegistry::new());
    let mut seen = HashSet::new();
    for name in &config.handlers {
        if !seen.insert(name.as_str()) {
            return Err(EngineError::Config(format!(
                "handler '{name}' listed more than once"
            )));
        }
        let handler = builtin_handler(name, &catalog, &table).ok_or_else(|| {
            EngineError::Config(format!(
                "unknown handler '{name}' (expected one of: {})",
                handlers::DEFAULT_ORDER.join(", ")
            ))
        })?;
        registry.register(handler);
    }

    tracing::info!(
        handlers = registry.len(),
        types = config.types.len(),
        "conversion dispatcher ready"
    );
    Ok(Dispatcher::new(registry))
}

fn builtin_handler(
    name: &str,
    catalog: &Arc<TypeCatalog>,
    table: &Arc<ConstructorTable>,
) -> Option<Arc<dyn ConverterHandler>> {
    match name {
        handlers::IDENTITY => Some(Arc::new(IdentityHandler::new(catalog.clone()))),
        handlers::STRING => Some(Arc::new(StringHandler)),
        handlers::PRIMITIVE => Some(Arc::new(PrimitiveHandler)),
        handlers::CONSTRUCTOR => Some(Arc::new(ConstructorHandler::new(
            catalog.clone(),
            table.clone(),
        ))),
        _ => None,
    }
}

fn parse_class(text: &str) -> Result<Class, EngineError> {
    text.parse::<TypeDesc>()
        .map(|desc| desc.erasure())
        .map_err(|e| EngineError::Config(e.to_string()))
}

fn declare_type(
    catalog: &mut TypeCatalog,
    constructors: &mut ConstructorTable,
    type_cfg: &TypeConfig,
) -> Result<(), EngineError> {
    let class = match parse_class(&type_cfg.name)? {
        class @ Class::Named(_) => class,
        other => {
            return Err(EngineError::Config(format!(
                "built-in class {other} cannot be redeclared"
            )));
        }
    };
    if catalog.is_declared(&type_cfg.name) {
        return Err(EngineError::Config("declared more than once".into()));
    }

    let supertypes = type_cfg
        .supertypes
        .iter()
        .map(|s| parse_class(s))
        .collect::<Result<Vec<_>, _>>()?;
    catalog.declare(type_cfg.name.as_str(), supertypes);

    for param in &type_cfg.constructors {
        let param = parse_class(param)?;
        let name: Arc<str> = type_cfg.name.as_str().into();
        constructors.register(class.clone(), param, move |arg| {
            Ok(Object::new(name.clone()).with_field("value", arg.clone()).into())
        });
    }

    tracing::debug!(
        class = %type_cfg.name,
        supertypes = type_cfg.supertypes.len(),
        constructors = type_cfg.constructors.len(),
        "declared class"
    );
    Ok(())
}
