//! # typecol
//!
//! Typed, validated values stored in ordinary JSON and text columns.
//!
//! A codec sits between a column and the value your code works with: on write
//! it serializes the value into a JSON-compatible primitive, on read it
//! validates the stored primitive back into the value. The physical column
//! type is resolved per dialect, and migration tooling renders codec columns
//! as that type.
//!
//! ## Quick Start
//!
//! ```rust
//! use typecol::prelude::*;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize, Model)]
//! pub struct Settings {
//!     pub flags: Vec<String>,
//!     pub login_count: u32,
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let codec = ModelCodec::<Settings>::new();
//!     let settings = Settings {
//!         flags: vec!["beta".to_string()],
//!         login_count: 3,
//!     };
//!
//!     let stored = codec.encode(Some(&settings), &Dialect::Postgres)?;
//!     let loaded = codec.decode(stored, &Dialect::Postgres)?;
//!     assert_eq!(loaded, Some(settings));
//!
//!     let mut ctx = AutogenContext::new(Dialect::Postgres).with_render_item(render_item);
//!     assert_eq!(
//!         ctx.render(ItemKind::Type, &codec)?,
//!         "postgresql.JSON(astext_type=Text())"
//!     );
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod migration;
pub mod pg;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::CodecRegistry;
pub use errors::TypecolError;
pub use migration::{render_item, AutogenContext, ItemKind, RenderCandidate, RenderOutcome};
pub use pg::PgColumn;

// Re-export centralized config
pub use config::{AppConfig, CodecConfig, RenderConfig, StorageConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use column_codec;
pub use model_derive;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use sqlx;
