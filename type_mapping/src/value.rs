//! Storage values
//!
//! A codec produces a JSON-compatible primitive; this module shapes it for the
//! physical column it is written to, and back.

use crate::sql::is_json_storage;
use crate::types::ColumnType;
use serde::{Deserialize, Serialize};

/// JSON-compatible storage primitive produced and consumed by codecs
pub type Primitive = serde_json::Value;

/// A primitive shaped for a specific column type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StorageValue {
    Json(Primitive),
    Text(String),
    Null,
}

impl StorageValue {
    /// Shape a primitive for `column_type`
    ///
    /// Text columns keep string primitives verbatim and store any other
    /// primitive as compact JSON text. Reading a text column yields the
    /// string, so a codec writing one should produce JSON text itself; the
    /// codecs' default functions do on text columns.
    pub fn shape(column_type: &ColumnType, primitive: Option<Primitive>) -> Self {
        match primitive {
            None => StorageValue::Null,
            Some(value) if is_json_storage(column_type) => StorageValue::Json(value),
            Some(Primitive::String(text)) => StorageValue::Text(text),
            Some(value) => StorageValue::Text(value.to_string()),
        }
    }

    /// Turn a value read from storage back into a primitive
    pub fn into_primitive(self) -> Option<Primitive> {
        match self {
            StorageValue::Json(value) => Some(value),
            StorageValue::Text(text) => Some(Primitive::String(text)),
            StorageValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StorageValue::Null)
    }
}

impl From<Option<String>> for StorageValue {
    fn from(val: Option<String>) -> Self {
        match val {
            Some(text) => StorageValue::Text(text),
            None => StorageValue::Null,
        }
    }
}

impl From<Option<Primitive>> for StorageValue {
    fn from(val: Option<Primitive>) -> Self {
        match val {
            Some(value) => StorageValue::Json(value),
            None => StorageValue::Null,
        }
    }
}
