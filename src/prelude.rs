//! Convenience re-exports for common typecol usage
//!
//! This prelude module re-exports the most commonly used items from the typecol crates,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use typecol::prelude::*;
//!
//! // Now you have access to the codecs, column types and render hook
//! ```

// Core typecol components
pub use crate::core::CodecRegistry;
pub use crate::errors::TypecolError;
pub use crate::migration::{render_item, AutogenContext, ItemKind, RenderCandidate, RenderOutcome};
pub use crate::pg::PgColumn;

// Re-export centralized config
pub use config::{AppConfig, CodecConfig, RenderConfig, StorageConfig};

// Re-export commonly used codec types for convenience
pub use column_codec::prelude::*;

// Re-export column_codec for macro-generated code
pub use column_codec;

// Model derive
pub use model_derive::Model;

// Common external dependencies
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use sqlx;
