//! Core typecol functionality
//!
//! This module contains the codec registry, which keeps the codecs of one
//! table by column name and drives migration rendering and DDL for them.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use column_codec::StorageBacked;
use type_mapping::{column_type_sql, Dialect};

use crate::errors::TypecolError;
use crate::migration::{AutogenContext, ItemKind, RenderCandidate};

struct CodecEntry {
    codec: Arc<dyn Any + Send + Sync>,
    storage: Arc<dyn StorageBacked>,
    render: Arc<dyn RenderCandidate + Send + Sync>,
}

/// Column codecs registered by column name, in registration order
#[derive(Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, CodecEntry>,
    order: Vec<String>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a codec for the column `name`
    pub fn register<C>(&mut self, name: String, codec: C) -> Result<(), TypecolError>
    where
        C: StorageBacked + RenderCandidate + Send + Sync + 'static,
    {
        if self.codecs.contains_key(&name) {
            return Err(TypecolError::CodecAlreadyRegistered(name));
        }

        crate::debug_log!(
            "[REGISTRY] registering {} over {} for column {}",
            codec.codec_name(),
            codec.schema_name(),
            name
        );

        let codec = Arc::new(codec);
        let entry = CodecEntry {
            codec: codec.clone(),
            storage: codec.clone(),
            render: codec,
        };
        self.order.push(name.clone());
        self.codecs.insert(name, entry);
        Ok(())
    }

    /// Get a registered codec by column name
    pub fn get<C>(&self, name: &str) -> Result<&C, TypecolError>
    where
        C: Send + Sync + 'static,
    {
        self.entry(name)?
            .codec
            .downcast_ref::<C>()
            .ok_or_else(|| TypecolError::CodecTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<C>(),
            })
    }

    /// Get the storage view of a registered codec without knowing its type
    pub fn storage(&self, name: &str) -> Result<&dyn StorageBacked, TypecolError> {
        self.codecs
            .get(name)
            .map(|entry| entry.storage.as_ref())
            .ok_or_else(|| TypecolError::CodecNotFound(name.to_string()))
    }

    /// List all registered column names in registration order
    pub fn list(&self) -> Vec<&String> {
        self.order.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove a codec by column name
    pub fn unregister(&mut self, name: &str) -> Result<(), TypecolError> {
        self.codecs
            .remove(name)
            .ok_or_else(|| TypecolError::CodecNotFound(name.to_string()))?;
        self.order.retain(|registered| registered != name);

        crate::debug_log!("[REGISTRY] unregistered column {}", name);
        Ok(())
    }

    /// Render every column as migration source, e.g. `sa.Column('meta', sa.JSON())`
    pub fn render_columns(&self, ctx: &mut AutogenContext) -> Result<Vec<String>, TypecolError> {
        let mut columns = Vec::with_capacity(self.order.len());
        for name in &self.order {
            let entry = self.entry(name)?;
            let rendered = ctx.render(ItemKind::Type, entry.render.as_ref())?;
            columns.push(format!(
                "{}Column('{}', {})",
                ctx.sqlalchemy_module_prefix(),
                name,
                rendered
            ));
        }
        Ok(columns)
    }

    /// Column definitions for a CREATE TABLE statement, e.g. `meta JSONB`
    pub fn ddl_columns(&self, dialect: &Dialect) -> Result<Vec<String>, TypecolError> {
        let mut columns = Vec::with_capacity(self.order.len());
        for name in &self.order {
            let column_type = self.entry(name)?.storage.load_dialect_impl(dialect)?;
            columns.push(format!("{} {}", name, column_type_sql(&column_type)));
        }
        Ok(columns)
    }

    fn entry(&self, name: &str) -> Result<&CodecEntry, TypecolError> {
        self.codecs
            .get(name)
            .ok_or_else(|| TypecolError::CodecNotFound(name.to_string()))
    }
}
