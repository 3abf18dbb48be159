//! Adapter codec
//!
//! `AdapterCodec<T>` stores any type a compiled `Adapter<T>` understands:
//! plain structs, maps and collections that carry no validation of their own.
//! The adapter is supplied already built, so one adapter can back many
//! codecs. `AdapterCodec<AnyValue>` is the type-erased form for frameworks
//! that need a single codec type across heterogeneous columns.

use crate::convert::{
    AdapterDump, AdapterDumpJson, AdapterValidate, AdapterValidateJson, Deserializer, Serializer,
};
use crate::codec::{CodecCore, Conversions};
use crate::decorator::{CodecOptions, StorageBacked, TypeDecorator};
use crate::errors::ValidationError;
use crate::validation::{erase, Adapter, AnyValue, TypeAdapter};
use config::AppConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use type_mapping::{ColumnType, Dialect, Primitive, StorageDescriptor, TypeMappingError};

/// Column codec for a precompiled adapter
pub struct AdapterCodec<T: 'static> {
    adapter: Arc<dyn Adapter<T>>,
    core: CodecCore<T>,
}

impl<T> AdapterCodec<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Codec for a typed adapter
    pub fn new(adapter: Arc<TypeAdapter<T>>) -> Self {
        Self::from_adapter(adapter)
    }

    /// Codec storing values as JSON text in a string column
    pub fn json_text(adapter: Arc<TypeAdapter<T>>) -> Self {
        Self::new(adapter).with_json_text()
    }
}

impl AdapterCodec<AnyValue> {
    /// Type-erased codec; encoding a value of any other type than `U` fails
    /// with `ValidationError::TypeMismatch`
    pub fn erased<U>(adapter: Arc<TypeAdapter<U>>) -> Self
    where
        U: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        Self::from_adapter(erase(adapter))
    }
}

impl<T: 'static> AdapterCodec<T> {
    /// Codec for any adapter implementation
    pub fn from_adapter(adapter: Arc<dyn Adapter<T>>) -> Self {
        let core = CodecCore::<T>::new(
            Conversions::new(
                Arc::new(AdapterDump::new(adapter.clone())),
                Arc::new(AdapterValidate::new(adapter.clone())),
            ),
            Conversions::new(
                Arc::new(AdapterDumpJson::new(adapter.clone())),
                Arc::new(AdapterValidateJson::new(adapter.clone())),
            ),
        );
        Self { adapter, core }
    }

    /// Codec whose options come from application configuration
    pub fn from_config(adapter: Arc<dyn Adapter<T>>, config: &AppConfig) -> Self {
        Self::from_adapter(adapter).with_options(CodecOptions::from(config))
    }

    pub fn with_serializer<S>(mut self, serializer: S) -> Self
    where
        S: Serializer<T> + 'static,
    {
        self.core.set_serializer(Arc::new(serializer));
        self
    }

    pub fn with_serializer_fn<F>(self, serializer: F) -> Self
    where
        F: Fn(&T) -> Result<Primitive, ValidationError> + Send + Sync + 'static,
    {
        self.with_serializer(serializer)
    }

    pub fn with_deserializer<D>(mut self, deserializer: D) -> Self
    where
        D: Deserializer<T> + 'static,
    {
        self.core.set_deserializer(Arc::new(deserializer));
        self
    }

    pub fn with_deserializer_fn<F>(self, deserializer: F) -> Self
    where
        F: Fn(Primitive) -> Result<T, ValidationError> + Send + Sync + 'static,
    {
        self.with_deserializer(deserializer)
    }

    /// Store in a string column; the default functions follow it to JSON text
    pub fn with_json_text(self) -> Self {
        self.with_impl(ColumnType::string())
    }

    /// Replace the storage descriptor
    pub fn with_impl(mut self, storage: impl Into<StorageDescriptor>) -> Self {
        let options = CodecOptions {
            storage: storage.into(),
            ..self.core.options().clone()
        };
        self.core.set_options(options);
        self
    }

    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.core.set_options(options);
        self
    }

    pub fn with_validate_on_write(mut self, validate_on_write: bool) -> Self {
        let options = self
            .core
            .options()
            .clone()
            .with_validate_on_write(validate_on_write);
        self.core.set_options(options);
        self
    }

    /// The adapter this codec validates and dumps with
    pub fn adapter(&self) -> &Arc<dyn Adapter<T>> {
        &self.adapter
    }

    pub fn options(&self) -> &CodecOptions {
        self.core.options()
    }

    pub fn storage_descriptor(&self) -> &StorageDescriptor {
        self.core.storage_descriptor()
    }

    /// Concrete column type for `dialect`, cached per dialect
    pub fn resolve_storage_descriptor(&self, dialect: &Dialect) -> Result<ColumnType, TypeMappingError> {
        self.core.resolve(dialect)
    }

    /// Serialize a value for storage; `None` passes through untouched
    pub fn encode(&self, value: Option<&T>, dialect: &Dialect) -> Result<Option<Primitive>, ValidationError> {
        self.core.encode(value, dialect)
    }

    /// Validate a stored primitive; `None` passes through untouched
    pub fn decode(&self, primitive: Option<Primitive>, dialect: &Dialect) -> Result<Option<T>, ValidationError> {
        self.core.decode(primitive, dialect)
    }
}

impl<T: 'static> Clone for AdapterCodec<T> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            core: self.core.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for AdapterCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterCodec")
            .field("adapter", &self.adapter.type_name())
            .field("storage", self.core.storage_descriptor())
            .field("validate_on_write", &self.core.options().validate_on_write)
            .finish()
    }
}

impl<T: 'static> StorageBacked for AdapterCodec<T> {
    fn codec_name(&self) -> &'static str {
        "AdapterCodec"
    }

    fn schema_name(&self) -> &'static str {
        self.adapter.type_name()
    }

    fn storage_descriptor(&self) -> &StorageDescriptor {
        self.core.storage_descriptor()
    }

    fn load_dialect_impl(&self, dialect: &Dialect) -> Result<ColumnType, TypeMappingError> {
        self.resolve_storage_descriptor(dialect)
    }
}

impl<T: 'static> TypeDecorator for AdapterCodec<T> {
    type Value = T;

    fn process_bind_param(
        &self,
        value: Option<&T>,
        dialect: &Dialect,
    ) -> Result<Option<Primitive>, ValidationError> {
        self.encode(value, dialect)
    }

    fn process_result_value(
        &self,
        value: Option<Primitive>,
        dialect: &Dialect,
    ) -> Result<Option<T>, ValidationError> {
        self.decode(value, dialect)
    }
}
