//! Conversion functions
//!
//! Codecs never serialize or validate on their own; they call a `Serializer`
//! on the write path and a `Deserializer` on the read path. The defaults below
//! are ordinary implementations of these traits, and any closure with the right
//! signature is one too.

use crate::errors::ValidationError;
use crate::model::Model;
use crate::validation::Adapter;
use std::sync::Arc;
use type_mapping::Primitive;

/// Converts an in-memory value into a storage primitive
pub trait Serializer<T>: Send + Sync {
    fn serialize(&self, value: &T) -> Result<Primitive, ValidationError>;
}

/// Converts a storage primitive back into an in-memory value
pub trait Deserializer<T>: Send + Sync {
    fn deserialize(&self, primitive: Primitive) -> Result<T, ValidationError>;
}

impl<T, F> Serializer<T> for F
where
    F: Fn(&T) -> Result<Primitive, ValidationError> + Send + Sync,
{
    fn serialize(&self, value: &T) -> Result<Primitive, ValidationError> {
        self(value)
    }
}

impl<T, F> Deserializer<T> for F
where
    F: Fn(Primitive) -> Result<T, ValidationError> + Send + Sync,
{
    fn deserialize(&self, primitive: Primitive) -> Result<T, ValidationError> {
        self(primitive)
    }
}

/// JSON kind of a primitive, for error messages
pub(crate) fn primitive_kind(primitive: &Primitive) -> &'static str {
    match primitive {
        Primitive::Null => "null",
        Primitive::Bool(_) => "boolean",
        Primitive::Number(_) => "number",
        Primitive::String(_) => "string",
        Primitive::Array(_) => "array",
        Primitive::Object(_) => "object",
    }
}

/// Borrow the JSON text held by a text-column primitive
pub(crate) fn json_text<'a>(
    type_name: &'static str,
    primitive: &'a Primitive,
) -> Result<&'a str, ValidationError> {
    primitive.as_str().ok_or_else(|| ValidationError::ExpectedText {
        type_name,
        found: primitive_kind(primitive),
    })
}

/// Dumps a model to a JSON-compatible structure
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelDump;

impl<M: Model> Serializer<M> for ModelDump {
    fn serialize(&self, value: &M) -> Result<Primitive, ValidationError> {
        serde_json::to_value(value).map_err(|source| ValidationError::Serialization {
            type_name: M::model_name(),
            source,
        })
    }
}

/// Dumps a model to JSON text, for string columns
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelDumpJson;

impl<M: Model> Serializer<M> for ModelDumpJson {
    fn serialize(&self, value: &M) -> Result<Primitive, ValidationError> {
        serde_json::to_string(value)
            .map(Primitive::String)
            .map_err(|source| ValidationError::Serialization {
                type_name: M::model_name(),
                source,
            })
    }
}

/// Dumps through an adapter's JSON-compatible dump
pub struct AdapterDump<T> {
    adapter: Arc<dyn Adapter<T>>,
}

impl<T> AdapterDump<T> {
    pub fn new(adapter: Arc<dyn Adapter<T>>) -> Self {
        Self { adapter }
    }
}

impl<T> Serializer<T> for AdapterDump<T> {
    fn serialize(&self, value: &T) -> Result<Primitive, ValidationError> {
        self.adapter.dump_value(value)
    }
}

/// Dumps through an adapter to JSON text
pub struct AdapterDumpJson<T> {
    adapter: Arc<dyn Adapter<T>>,
}

impl<T> AdapterDumpJson<T> {
    pub fn new(adapter: Arc<dyn Adapter<T>>) -> Self {
        Self { adapter }
    }
}

impl<T> Serializer<T> for AdapterDumpJson<T> {
    fn serialize(&self, value: &T) -> Result<Primitive, ValidationError> {
        self.adapter.dump_json(value).map(Primitive::String)
    }
}

/// Validates through an adapter's validate-from-primitive
pub struct AdapterValidate<T> {
    adapter: Arc<dyn Adapter<T>>,
}

impl<T> AdapterValidate<T> {
    pub fn new(adapter: Arc<dyn Adapter<T>>) -> Self {
        Self { adapter }
    }
}

impl<T> Deserializer<T> for AdapterValidate<T> {
    fn deserialize(&self, primitive: Primitive) -> Result<T, ValidationError> {
        self.adapter.validate_value(primitive)
    }
}

/// Validates JSON text through an adapter
pub struct AdapterValidateJson<T> {
    adapter: Arc<dyn Adapter<T>>,
}

impl<T> AdapterValidateJson<T> {
    pub fn new(adapter: Arc<dyn Adapter<T>>) -> Self {
        Self { adapter }
    }
}

impl<T> Deserializer<T> for AdapterValidateJson<T> {
    fn deserialize(&self, primitive: Primitive) -> Result<T, ValidationError> {
        let text = json_text(self.adapter.type_name(), &primitive)?;
        self.adapter.validate_json(text)
    }
}
