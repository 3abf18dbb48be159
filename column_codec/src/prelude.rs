//! Convenience re-exports for common column-codec usage

// Codecs and their contract
pub use crate::adapter::AdapterCodec;
pub use crate::decorator::{CodecOptions, StorageBacked, TypeDecorator};
pub use crate::model::{Model, ModelCodec};

// Validation
pub use crate::errors::ValidationError;
pub use crate::validation::{Adapter, AnyValue, TypeAdapter};

// Conversion functions
pub use crate::convert::{Deserializer, Serializer};

// Storage types
pub use type_mapping::{ColumnType, Dialect, Primitive, StorageDescriptor, TypeMappingError};
