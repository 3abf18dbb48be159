//! Column Codec - typed values stored in ordinary columns
//!
//! This crate provides the codecs that convert between validated in-memory
//! values and the JSON-compatible primitives a column stores, along with the
//! validators and conversion functions they delegate to.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod adapter;
pub mod convert;
mod codec;
pub mod decorator;
pub mod errors;
pub mod model;
pub mod prelude;
pub mod validation;

pub use adapter::AdapterCodec;
pub use convert::{
    AdapterDump, AdapterDumpJson, AdapterValidate, AdapterValidateJson, Deserializer, ModelDump,
    ModelDumpJson, Serializer,
};
pub use decorator::{CodecOptions, StorageBacked, TypeDecorator};
pub use errors::ValidationError;
pub use model::{Model, ModelCodec, ModelValidateJson, ModelValidator};
pub use validation::{erase, Adapter, AnyValue, TypeAdapter};

pub use type_mapping::{ColumnType, Dialect, Primitive, StorageDescriptor, TypeMappingError};
