use thiserror::Error;
use type_mapping::TypeMappingError;

/// Errors raised while validating or dumping a value
///
/// Codecs return these exactly as the serializer or deserializer produced
/// them.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{type_name} failed validation: {source}")]
    Schema {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{type_name} failed check: {message}")]
    Check {
        type_name: &'static str,
        message: String,
    },

    #[error("{type_name} could not be serialized: {source}")]
    Serialization {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{type_name} expects JSON text, found {found}")]
    ExpectedText {
        type_name: &'static str,
        found: &'static str,
    },

    #[error("value is not a {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("column type could not be resolved: {0}")]
    Storage(#[from] TypeMappingError),

    #[error("{0}")]
    Custom(String),
}

impl ValidationError {
    pub fn custom(message: impl Into<String>) -> Self {
        ValidationError::Custom(message.into())
    }

    /// Name of the type that rejected the value, when known
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            ValidationError::Schema { type_name, .. }
            | ValidationError::Check { type_name, .. }
            | ValidationError::Serialization { type_name, .. }
            | ValidationError::ExpectedText { type_name, .. } => Some(*type_name),
            ValidationError::TypeMismatch { expected } => Some(*expected),
            ValidationError::Storage(_) | ValidationError::Custom(_) => None,
        }
    }

    /// Whether the primitive did not match the type's structure
    pub fn is_schema(&self) -> bool {
        matches!(self, ValidationError::Schema { .. })
    }
}
