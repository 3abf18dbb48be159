//! Model codec
//!
//! `ModelCodec<M>` stores a named structural schema in a single column. By
//! default it dumps the model to a JSON structure on write and validates the
//! stored primitive with a validator built once per codec on read.

use crate::convert::{json_text, Deserializer, ModelDump, ModelDumpJson, Serializer};
use crate::codec::{CodecCore, Conversions};
use crate::decorator::{CodecOptions, StorageBacked, TypeDecorator};
use crate::errors::ValidationError;
use crate::validation::{Adapter, TypeAdapter};
use config::AppConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, OnceLock};
use type_mapping::{ColumnType, Dialect, Primitive, StorageDescriptor, TypeMappingError};

/// A named structural schema
///
/// Usually derived with `#[derive(Model)]`.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name reported in validation errors and migration output
    fn model_name() -> &'static str;

    /// Declared field names, in declaration order
    fn field_names() -> &'static [&'static str] {
        &[]
    }

    /// Model-level validation run after every successful parse
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Lazily built structural validator for `M`
pub struct ModelValidator<M: Model> {
    adapter: OnceLock<TypeAdapter<M>>,
}

impl<M: Model> ModelValidator<M> {
    pub fn new() -> Self {
        Self {
            adapter: OnceLock::new(),
        }
    }

    /// The validator, built on first use
    pub fn adapter(&self) -> &TypeAdapter<M> {
        self.adapter.get_or_init(TypeAdapter::<M>::for_model)
    }

    pub fn is_initialized(&self) -> bool {
        self.adapter.get().is_some()
    }
}

impl<M: Model> Default for ModelValidator<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Deserializer<M> for ModelValidator<M> {
    fn deserialize(&self, primitive: Primitive) -> Result<M, ValidationError> {
        self.adapter().validate_value(primitive)
    }
}

/// Validates JSON text with a model validator, for string columns
pub struct ModelValidateJson<M: Model> {
    validator: Arc<ModelValidator<M>>,
}

impl<M: Model> ModelValidateJson<M> {
    pub fn new(validator: Arc<ModelValidator<M>>) -> Self {
        Self { validator }
    }
}

impl<M: Model> Deserializer<M> for ModelValidateJson<M> {
    fn deserialize(&self, primitive: Primitive) -> Result<M, ValidationError> {
        let text = json_text(M::model_name(), &primitive)?;
        self.validator.adapter().validate_json(text)
    }
}

/// Column codec for a model type
pub struct ModelCodec<M: Model> {
    validator: Arc<ModelValidator<M>>,
    core: CodecCore<M>,
}

impl<M: Model> ModelCodec<M> {
    /// Codec with the default dump/validate pair over a generic JSON column
    ///
    /// On a text column the defaults switch to JSON text conversion.
    pub fn new() -> Self {
        let validator = Arc::new(ModelValidator::new());
        let core = CodecCore::<M>::new(
            Conversions::new(Arc::new(ModelDump), validator.clone()),
            Conversions::new(
                Arc::new(ModelDumpJson),
                Arc::new(ModelValidateJson::new(validator.clone())),
            ),
        );
        Self { validator, core }
    }

    /// Codec storing the model as JSON text in a string column
    pub fn json_text() -> Self {
        Self::new().with_json_text()
    }

    /// Codec whose options come from application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().with_options(CodecOptions::from(config))
    }

    pub fn with_serializer<S>(mut self, serializer: S) -> Self
    where
        S: Serializer<M> + 'static,
    {
        self.core.set_serializer(Arc::new(serializer));
        self
    }

    pub fn with_serializer_fn<F>(self, serializer: F) -> Self
    where
        F: Fn(&M) -> Result<Primitive, ValidationError> + Send + Sync + 'static,
    {
        self.with_serializer(serializer)
    }

    pub fn with_deserializer<D>(mut self, deserializer: D) -> Self
    where
        D: Deserializer<M> + 'static,
    {
        self.core.set_deserializer(Arc::new(deserializer));
        self
    }

    pub fn with_deserializer_fn<F>(self, deserializer: F) -> Self
    where
        F: Fn(Primitive) -> Result<M, ValidationError> + Send + Sync + 'static,
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

    pub fn model_name(&self) -> &'static str {
        M::model_name()
    }

    /// The structural validator, built on first use
    pub fn type_adapter(&self) -> &TypeAdapter<M> {
        self.validator.adapter()
    }

    /// Whether the structural validator has been built yet
    pub fn validator_initialized(&self) -> bool {
        self.validator.is_initialized()
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

    /// Serialize a model for storage; `None` passes through untouched
    pub fn encode(&self, value: Option<&M>, dialect: &Dialect) -> Result<Option<Primitive>, ValidationError> {
        self.core.encode(value, dialect)
    }

    /// Validate a stored primitive back into a model; `None` passes through
    /// untouched and errors are returned exactly as the deserializer raised
    /// them
    pub fn decode(&self, primitive: Option<Primitive>, dialect: &Dialect) -> Result<Option<M>, ValidationError> {
        self.core.decode(primitive, dialect)
    }
}

impl<M: Model> Default for ModelCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Clone for ModelCodec<M> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
            core: self.core.clone(),
        }
    }
}

impl<M: Model> fmt::Debug for ModelCodec<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCodec")
            .field("model", &M::model_name())
            .field("storage", self.core.storage_descriptor())
            .field("validate_on_write", &self.core.options().validate_on_write)
            .field("validator_initialized", &self.validator_initialized())
            .finish()
    }
}

impl<M: Model> StorageBacked for ModelCodec<M> {
    fn codec_name(&self) -> &'static str {
        "ModelCodec"
    }

    fn schema_name(&self) -> &'static str {
        M::model_name()
    }

    fn storage_descriptor(&self) -> &StorageDescriptor {
        self.core.storage_descriptor()
    }

    fn load_dialect_impl(&self, dialect: &Dialect) -> Result<ColumnType, TypeMappingError> {
        self.resolve_storage_descriptor(dialect)
    }
}

impl<M: Model> TypeDecorator for ModelCodec<M> {
    type Value = M;

    fn process_bind_param(
        &self,
        value: Option<&M>,
        dialect: &Dialect,
    ) -> Result<Option<Primitive>, ValidationError> {
        self.encode(value, dialect)
    }

    fn process_result_value(
        &self,
        value: Option<Primitive>,
        dialect: &Dialect,
    ) -> Result<Option<M>, ValidationError> {
        self.decode(value, dialect)
    }
}
