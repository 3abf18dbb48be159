//! Column type decorator contract
//!
//! The relational layer talks to codecs through these traits: it resolves the
//! physical column once per dialect and calls the bind/result hooks on every
//! write and read.

use crate::errors::ValidationError;
use config::AppConfig;
use type_mapping::{ColumnType, Dialect, Primitive, StorageDescriptor, TypeMappingError};

/// Anything backed by a physical storage column
pub trait StorageBacked: Send + Sync {
    /// Short name of the codec kind, e.g. `ModelCodec`
    fn codec_name(&self) -> &'static str;

    /// Name of the wrapped schema
    fn schema_name(&self) -> &'static str;

    fn storage_descriptor(&self) -> &StorageDescriptor;

    /// Resolve the concrete column type for `dialect`
    fn load_dialect_impl(&self, dialect: &Dialect) -> Result<ColumnType, TypeMappingError>;
}

/// Custom column type hooks called by the relational layer
pub trait TypeDecorator: StorageBacked {
    type Value;

    /// Before-write hook
    fn process_bind_param(
        &self,
        value: Option<&Self::Value>,
        dialect: &Dialect,
    ) -> Result<Option<Primitive>, ValidationError>;

    /// After-read hook
    fn process_result_value(
        &self,
        value: Option<Primitive>,
        dialect: &Dialect,
    ) -> Result<Option<Self::Value>, ValidationError>;
}

/// Per-codec configuration injected at construction
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Physical column type; defaults to generic JSON built on demand
    pub storage: StorageDescriptor,
    /// Validate each serialized primitive with the codec's deserializer before
    /// it is returned from `encode`
    pub validate_on_write: bool,
}

impl CodecOptions {
    pub fn new(storage: impl Into<StorageDescriptor>) -> Self {
        Self {
            storage: storage.into(),
            validate_on_write: false,
        }
    }

    pub fn with_validate_on_write(mut self, validate_on_write: bool) -> Self {
        self.validate_on_write = validate_on_write;
        self
    }
}

/// The configured column type becomes an instance descriptor, so codecs built
/// from configuration never call a factory; only `CodecOptions::default()`
/// carries the generic JSON factory.
impl From<&AppConfig> for CodecOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            storage: StorageDescriptor::instance(config.storage.default_impl.clone()),
            validate_on_write: config.codec.validate_on_write,
        }
    }
}
