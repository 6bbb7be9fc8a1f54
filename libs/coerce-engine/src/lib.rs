pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod multi;
pub mod registry;

pub use catalog::TypeCatalog;
pub use dispatcher::Dispatcher;
pub use error::EngineError;
pub use registry::HandlerRegistry;
