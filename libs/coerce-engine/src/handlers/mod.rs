//! Built-in conversion handlers.
//!
//! Default precedence (earlier wins): identity, string, primitive,
//! constructor.

mod constructor;
mod identity;
mod primitive;
mod string;

pub use constructor::{ConstructFn, Constructor, ConstructorHandler, ConstructorTable};
pub use identity::IdentityHandler;
pub use primitive::PrimitiveHandler;
pub use string::StringHandler;

pub const IDENTITY: &str = "identity";
pub const STRING: &str = "string";
pub const PRIMITIVE: &str = "primitive";
pub const CONSTRUCTOR: &str = "constructor";

pub const DEFAULT_ORDER: [&str; 4] = [IDENTITY, STRING, PRIMITIVE, CONSTRUCTOR];
