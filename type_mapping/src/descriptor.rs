//! Storage descriptors
//!
//! A storage descriptor names the physical column type behind a codec, either
//! as a ready instance or as a factory called once per dialect.

use crate::dialect::Dialect;
use crate::errors::TypeMappingError;
use crate::types::ColumnType;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Column type instance or factory backing a codec
#[derive(Clone)]
pub enum StorageDescriptor {
    Instance(ColumnType),
    Factory(Arc<dyn Fn() -> ColumnType + Send + Sync>),
}

impl StorageDescriptor {
    pub fn instance(column_type: ColumnType) -> Self {
        StorageDescriptor::Instance(column_type)
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> ColumnType + Send + Sync + 'static,
    {
        StorageDescriptor::Factory(Arc::new(factory))
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, StorageDescriptor::Instance(_))
    }

    /// Produce the column type, calling the factory with no arguments
    pub fn instantiate(&self) -> ColumnType {
        match self {
            StorageDescriptor::Instance(column_type) => column_type.clone(),
            StorageDescriptor::Factory(factory) => factory(),
        }
    }

    /// Resolve the concrete column type for a dialect
    pub fn resolve(&self, dialect: &Dialect) -> Result<ColumnType, TypeMappingError> {
        dialect.type_descriptor(self.instantiate())
    }
}

/// Generic JSON, built on demand
impl Default for StorageDescriptor {
    fn default() -> Self {
        StorageDescriptor::factory(ColumnType::json)
    }
}

impl From<ColumnType> for StorageDescriptor {
    fn from(column_type: ColumnType) -> Self {
        StorageDescriptor::Instance(column_type)
    }
}

impl fmt::Debug for StorageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageDescriptor::Instance(column_type) => {
                f.debug_tuple("Instance").field(column_type).finish()
            }
            StorageDescriptor::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Per-dialect cache of resolved column types
#[derive(Debug, Clone, Default)]
pub struct DialectImplCache {
    resolved: Arc<RwLock<HashMap<Dialect, ColumnType>>>,
}

impl DialectImplCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached column type for `dialect`, resolving it on first use
    ///
    /// Resolution is deterministic, so concurrent first calls may both resolve
    /// and whichever insert lands first is kept. A poisoned lock only disables
    /// caching.
    pub fn get_or_resolve(
        &self,
        dialect: &Dialect,
        descriptor: &StorageDescriptor,
    ) -> Result<ColumnType, TypeMappingError> {
        if let Ok(cache) = self.resolved.read() {
            if let Some(column_type) = cache.get(dialect) {
                return Ok(column_type.clone());
            }
        }

        let column_type = descriptor.resolve(dialect)?;
        debug_log!("[DIALECT] caching {} for {}", column_type, dialect);

        if let Ok(mut cache) = self.resolved.write() {
            return Ok(cache
                .entry(*dialect)
                .or_insert(column_type)
                .clone());
        }
        Ok(column_type)
    }

    pub fn len(&self) -> usize {
        self.resolved.read().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.resolved.write() {
            cache.clear();
        }
    }
}
