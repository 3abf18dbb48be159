//! Shared codec machinery
//!
//! Both codecs hold a `CodecCore` with their conversion functions, options and
//! per-dialect impl cache, and only differ in how they build the defaults.
//!
//! Each codec carries two default pairs: a structural pair for JSON columns
//! and a JSON text pair for text columns. Unless a function was replaced, the
//! pair is picked from the column type resolved for the dialect being
//! written or read, so a text column always round trips.

use crate::convert::{Deserializer, Serializer};
use crate::decorator::CodecOptions;
use crate::errors::ValidationError;
use std::sync::Arc;
use type_mapping::{
    is_json_storage, ColumnType, Dialect, DialectImplCache, Primitive, StorageDescriptor,
    TypeMappingError,
};

/// A serializer and the deserializer that reverses it
pub(crate) struct Conversions<T> {
    pub(crate) serializer: Arc<dyn Serializer<T>>,
    pub(crate) deserializer: Arc<dyn Deserializer<T>>,
}

impl<T> Conversions<T> {
    pub(crate) fn new(
        serializer: Arc<dyn Serializer<T>>,
        deserializer: Arc<dyn Deserializer<T>>,
    ) -> Self {
        Self {
            serializer,
            deserializer,
        }
    }
}

impl<T> Clone for Conversions<T> {
    fn clone(&self) -> Self {
        Self {
            serializer: self.serializer.clone(),
            deserializer: self.deserializer.clone(),
        }
    }
}

pub(crate) struct CodecCore<T> {
    structural: Conversions<T>,
    text: Conversions<T>,
    serializer: Option<Arc<dyn Serializer<T>>>,
    deserializer: Option<Arc<dyn Deserializer<T>>>,
    options: CodecOptions,
    impl_cache: DialectImplCache,
}

impl<T> CodecCore<T> {
    pub(crate) fn new(structural: Conversions<T>, text: Conversions<T>) -> Self {
        Self {
            structural,
            text,
            serializer: None,
            deserializer: None,
            options: CodecOptions::default(),
            impl_cache: DialectImplCache::new(),
        }
    }

    pub(crate) fn set_serializer(&mut self, serializer: Arc<dyn Serializer<T>>) {
        self.serializer = Some(serializer);
    }

    pub(crate) fn set_deserializer(&mut self, deserializer: Arc<dyn Deserializer<T>>) {
        self.deserializer = Some(deserializer);
    }

    /// Replacing options drops every resolved dialect impl
    pub(crate) fn set_options(&mut self, options: CodecOptions) {
        self.options = options;
        self.impl_cache = DialectImplCache::new();
    }

    pub(crate) fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub(crate) fn storage_descriptor(&self) -> &StorageDescriptor {
        &self.options.storage
    }

    pub(crate) fn resolve(&self, dialect: &Dialect) -> Result<ColumnType, TypeMappingError> {
        self.impl_cache.get_or_resolve(dialect, &self.options.storage)
    }

    /// Default pair for the column `dialect` resolves to
    fn defaults(&self, dialect: &Dialect) -> Result<&Conversions<T>, ValidationError> {
        let column_type = self.resolve(dialect)?;
        if is_json_storage(&column_type) {
            Ok(&self.structural)
        } else {
            Ok(&self.text)
        }
    }

    fn serializer(&self, dialect: &Dialect) -> Result<&Arc<dyn Serializer<T>>, ValidationError> {
        match &self.serializer {
            Some(serializer) => Ok(serializer),
            None => Ok(&self.defaults(dialect)?.serializer),
        }
    }

    fn deserializer(
        &self,
        dialect: &Dialect,
    ) -> Result<&Arc<dyn Deserializer<T>>, ValidationError> {
        match &self.deserializer {
            Some(deserializer) => Ok(deserializer),
            None => Ok(&self.defaults(dialect)?.deserializer),
        }
    }

    pub(crate) fn encode(
        &self,
        value: Option<&T>,
        dialect: &Dialect,
    ) -> Result<Option<Primitive>, ValidationError> {
        let Some(value) = value else {
            return Ok(None);
        };

        let primitive = self.serializer(dialect)?.serialize(value)?;
        if self.options.validate_on_write {
            self.deserializer(dialect)?.deserialize(primitive.clone())?;
        }
        Ok(Some(primitive))
    }

    pub(crate) fn decode(
        &self,
        primitive: Option<Primitive>,
        dialect: &Dialect,
    ) -> Result<Option<T>, ValidationError> {
        let Some(primitive) = primitive else {
            return Ok(None);
        };

        self.deserializer(dialect)?.deserialize(primitive).map(Some)
    }
}

impl<T> Clone for CodecCore<T> {
    fn clone(&self) -> Self {
        Self {
            structural: self.structural.clone(),
            text: self.text.clone(),
            serializer: self.serializer.clone(),
            deserializer: self.deserializer.clone(),
            options: self.options.clone(),
            impl_cache: self.impl_cache.clone(),
        }
    }
}
