//! Validation module
//!
//! This module provides the compiled validators codecs delegate to. A
//! `TypeAdapter<T>` parses primitives into `T` with serde and then runs the
//! checks registered on it; dumping goes the other way without validation.

use crate::errors::ValidationError;
use crate::model::Model;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use type_mapping::Primitive;

/// Type-erased value produced by an erased adapter
pub type AnyValue = Box<dyn Any + Send + Sync>;

type Check<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// A validator/serializer bound to a target type
pub trait Adapter<T>: Send + Sync {
    /// Name reported in validation errors
    fn type_name(&self) -> &'static str;

    /// Validate a JSON-compatible primitive into `T`
    fn validate_value(&self, primitive: Primitive) -> Result<T, ValidationError>;

    /// Validate JSON text into `T`
    fn validate_json(&self, text: &str) -> Result<T, ValidationError>;

    /// Dump `value` to a JSON-compatible primitive
    fn dump_value(&self, value: &T) -> Result<Primitive, ValidationError>;

    /// Dump `value` to JSON text
    fn dump_json(&self, value: &T) -> Result<String, ValidationError>;
}

/// Reusable validator for any serde type
pub struct TypeAdapter<T> {
    type_name: &'static str,
    checks: Vec<Check<T>>,
}

impl<T> TypeAdapter<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Build an adapter named after the Rust type
    pub fn new() -> Self {
        Self::named(std::any::type_name::<T>())
    }

    /// Build an adapter reporting `type_name` in its errors
    pub fn named(type_name: &'static str) -> Self {
        Self {
            type_name,
            checks: Vec::new(),
        }
    }

    /// Add a check run after every successful parse
    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.checks.push(Arc::new(check));
        self
    }

    /// Run the registered checks against an already parsed value
    pub fn check(&self, value: &T) -> Result<(), ValidationError> {
        for check in &self.checks {
            check(value).map_err(|message| ValidationError::Check {
                type_name: self.type_name,
                message,
            })?;
        }
        Ok(())
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }
}

impl<M: Model> TypeAdapter<M> {
    /// Build the structural validator for a model, including its own check
    pub fn for_model() -> Self {
        debug_log!("[VALIDATOR] building validator for {}", M::model_name());
        Self::named(M::model_name()).with_check(|model: &M| model.check())
    }
}

impl<T> Default for TypeAdapter<T>
where
    T: Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypeAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            checks: self.checks.clone(),
        }
    }
}

impl<T> fmt::Debug for TypeAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAdapter")
            .field("type_name", &self.type_name)
            .field("checks", &self.checks.len())
            .finish()
    }
}

impl<T> Adapter<T> for TypeAdapter<T>
where
    T: Serialize + DeserializeOwned,
{
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn validate_value(&self, primitive: Primitive) -> Result<T, ValidationError> {
        let value: T = serde_json::from_value(primitive).map_err(|source| {
            ValidationError::Schema {
                type_name: self.type_name,
                source,
            }
        })?;
        self.check(&value)?;
        Ok(value)
    }

    fn validate_json(&self, text: &str) -> Result<T, ValidationError> {
        let value: T = serde_json::from_str(text).map_err(|source| ValidationError::Schema {
            type_name: self.type_name,
            source,
        })?;
        self.check(&value)?;
        Ok(value)
    }

    fn dump_value(&self, value: &T) -> Result<Primitive, ValidationError> {
        serde_json::to_value(value).map_err(|source| ValidationError::Serialization {
            type_name: self.type_name,
            source,
        })
    }

    fn dump_json(&self, value: &T) -> Result<String, ValidationError> {
        serde_json::to_string(value).map_err(|source| ValidationError::Serialization {
            type_name: self.type_name,
            source,
        })
    }
}

/// Adapter over `AnyValue` backed by a concrete `TypeAdapter<U>`
struct ErasedAdapter<U> {
    inner: Arc<TypeAdapter<U>>,
}

impl<U> ErasedAdapter<U> {
    fn downcast<'a>(&self, value: &'a AnyValue) -> Result<&'a U, ValidationError>
    where
        U: 'static,
    {
        (**value)
            .downcast_ref::<U>()
            .ok_or(ValidationError::TypeMismatch {
                expected: self.inner.type_name,
            })
    }
}

impl<U> Adapter<AnyValue> for ErasedAdapter<U>
where
    U: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    fn validate_value(&self, primitive: Primitive) -> Result<AnyValue, ValidationError> {
        let value: AnyValue = Box::new(self.inner.validate_value(primitive)?);
        Ok(value)
    }

    fn validate_json(&self, text: &str) -> Result<AnyValue, ValidationError> {
        let value: AnyValue = Box::new(self.inner.validate_json(text)?);
        Ok(value)
    }

    fn dump_value(&self, value: &AnyValue) -> Result<Primitive, ValidationError> {
        self.inner.dump_value(self.downcast(value)?)
    }

    fn dump_json(&self, value: &AnyValue) -> Result<String, ValidationError> {
        self.inner.dump_json(self.downcast(value)?)
    }
}

/// Erase the target type of an adapter so one codec type can serve
/// heterogeneous columns
pub fn erase<U>(adapter: Arc<TypeAdapter<U>>) -> Arc<dyn Adapter<AnyValue>>
where
    U: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    Arc::new(ErasedAdapter { inner: adapter })
}
