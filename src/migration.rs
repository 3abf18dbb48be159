//! Migration rendering
//!
//! Autogenerated migrations describe columns as Python source using the
//! relational layer's type constructors. A codec is not something the
//! migration tool knows how to write, so `render_item` replaces it with the
//! column type it stores in. Registered on an `AutogenContext`, it runs before
//! the context's built-in renderer for every item.

use column_codec::{AdapterCodec, Model, ModelCodec, StorageBacked};
use config::RenderConfig;
use std::collections::BTreeSet;
use std::fmt;
use type_mapping::{ColumnType, Dialect, TypeMappingError};

/// Kind of schema item being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Type,
    ServerDefault,
    Constraint,
}

/// Result of a render hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Source text that replaces the default rendering
    Rendered(String),
    /// Fall back to the default rendering
    NotHandled,
}

impl RenderOutcome {
    pub fn rendered(self) -> Option<String> {
        match self {
            RenderOutcome::Rendered(text) => Some(text),
            RenderOutcome::NotHandled => None,
        }
    }
}

/// Anything the migration tool may hand to a render hook
pub trait RenderCandidate {
    /// Codecs expose their storage; everything else returns `None`
    fn storage_backed(&self) -> Option<&dyn StorageBacked> {
        None
    }

    fn as_column_type(&self) -> Option<&ColumnType> {
        None
    }

    /// Constructor name used when nothing renders the item
    fn type_label(&self) -> String;
}

impl<M: Model> RenderCandidate for ModelCodec<M> {
    fn storage_backed(&self) -> Option<&dyn StorageBacked> {
        Some(self)
    }

    fn type_label(&self) -> String {
        format!("ModelCodec[{}]", M::model_name())
    }
}

impl<T: 'static> RenderCandidate for AdapterCodec<T> {
    fn storage_backed(&self) -> Option<&dyn StorageBacked> {
        Some(self)
    }

    fn type_label(&self) -> String {
        format!("AdapterCodec[{}]", self.schema_name())
    }
}

impl RenderCandidate for ColumnType {
    fn as_column_type(&self) -> Option<&ColumnType> {
        Some(self)
    }

    fn type_label(&self) -> String {
        self.name()
    }
}

/// Signature of a render hook
pub type RenderItemFn =
    fn(ItemKind, &dyn RenderCandidate, &mut AutogenContext) -> Result<RenderOutcome, TypeMappingError>;

/// State shared by one migration rendering run
#[derive(Clone)]
pub struct AutogenContext {
    dialect: Dialect,
    sqlalchemy_module_prefix: String,
    user_module_prefix: Option<String>,
    imports: BTreeSet<String>,
    render_item: Option<RenderItemFn>,
}

impl AutogenContext {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sqlalchemy_module_prefix: "sa.".to_string(),
            user_module_prefix: None,
            imports: BTreeSet::new(),
            render_item: None,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            dialect: config.dialect,
            sqlalchemy_module_prefix: config.sqlalchemy_module_prefix.clone(),
            user_module_prefix: config.user_module_prefix.clone(),
            imports: BTreeSet::new(),
            render_item: None,
        }
    }

    /// Install a hook consulted before the built-in renderer
    pub fn with_render_item(mut self, render_item: RenderItemFn) -> Self {
        self.render_item = Some(render_item);
        self
    }

    pub fn with_sqlalchemy_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sqlalchemy_module_prefix = prefix.into();
        self
    }

    pub fn with_user_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_module_prefix = Some(prefix.into());
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn sqlalchemy_module_prefix(&self) -> &str {
        &self.sqlalchemy_module_prefix
    }

    /// Import lines the rendered source needs, sorted
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// Render an item, giving the installed hook the first chance
    pub fn render(
        &mut self,
        kind: ItemKind,
        candidate: &dyn RenderCandidate,
    ) -> Result<String, TypeMappingError> {
        if let Some(hook) = self.render_item {
            if let RenderOutcome::Rendered(text) = hook(kind, candidate, self)? {
                return Ok(text);
            }
        }

        match candidate.as_column_type() {
            Some(column_type) => Ok(self.render_type(column_type)),
            None => Ok(self.render_user_type(candidate)),
        }
    }

    /// Built-in rendering of a concrete column type
    pub fn render_type(&mut self, column_type: &ColumnType) -> String {
        let prefix = &self.sqlalchemy_module_prefix;
        let (import, text) = match column_type {
            ColumnType::PgJsonb => (
                Some("postgresql"),
                "postgresql.JSONB(astext_type=Text())".to_string(),
            ),
            ColumnType::PgJson => (
                Some("postgresql"),
                "postgresql.JSON(astext_type=Text())".to_string(),
            ),
            ColumnType::MySqlJson => (Some("mysql"), "mysql.JSON()".to_string()),
            ColumnType::SqliteJson => (Some("sqlite"), "sqlite.JSON()".to_string()),
            ColumnType::Json => (None, format!("{}JSON()", prefix)),
            ColumnType::Text => (None, format!("{}Text()", prefix)),
            ColumnType::String { length: None } => (None, format!("{}String()", prefix)),
            ColumnType::String {
                length: Some(length),
            } => (None, format!("{}String(length={})", prefix, length)),
        };

        if let Some(module) = import {
            self.imports
                .insert(format!("from sqlalchemy.dialects import {}", module));
        }
        text
    }

    fn render_user_type(&self, candidate: &dyn RenderCandidate) -> String {
        let prefix = self
            .user_module_prefix
            .as_deref()
            .unwrap_or("column_codec.");
        format!("{}{}()", prefix, candidate.type_label())
    }
}

impl fmt::Debug for AutogenContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutogenContext")
            .field("dialect", &self.dialect)
            .field("sqlalchemy_module_prefix", &self.sqlalchemy_module_prefix)
            .field("user_module_prefix", &self.user_module_prefix)
            .field("imports", &self.imports)
            .field("render_item", &self.render_item.is_some())
            .finish()
    }
}

/// Render hook for codec columns
///
/// Codecs render as the column type their storage descriptor resolves to for
/// the context's dialect. Every other item is left to the default renderer.
pub fn render_item(
    kind: ItemKind,
    candidate: &dyn RenderCandidate,
    ctx: &mut AutogenContext,
) -> Result<RenderOutcome, TypeMappingError> {
    if kind != ItemKind::Type {
        return Ok(RenderOutcome::NotHandled);
    }

    let Some(codec) = candidate.storage_backed() else {
        return Ok(RenderOutcome::NotHandled);
    };

    let resolved = codec.load_dialect_impl(&ctx.dialect())?;
    crate::debug_log!(
        "[RENDER] {} over {} renders as {}",
        codec.codec_name(),
        codec.schema_name(),
        resolved
    );
    ctx.render(ItemKind::Type, &resolved).map(RenderOutcome::Rendered)
}
