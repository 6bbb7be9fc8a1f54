pub mod class;
pub mod error;
pub mod from_value;
pub mod handler;
pub mod request;
pub mod types;
pub mod value;

pub use class::{Class, Primitive};
pub use error::{ConvertError, ErrorKind};
pub use from_value::FromValue;
pub use handler::ConverterHandler;
pub use request::{ConversionRequest, RequestBuilder};
pub use types::{Container, DescKind, TypeDesc};
pub use value::{Object, Value};
