//! Procedural macros for column codec models
//!
//! This crate provides the `Model` derive, which implements
//! `column_codec::Model` for a struct that already derives serde's
//! `Serialize` and `Deserialize`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod parsing;
mod generation;

use generation::generate_model_impl;
use parsing::{parse_field_names, parse_model_attributes};

/// Derive macro for the `Model` trait
///
/// Usage:
/// ```rust,ignore
/// use model_derive::Model;
///
/// #[derive(serde::Serialize, serde::Deserialize, Model)]
/// #[model(name = "Settings", check = "Settings::validate")]
/// pub struct Settings {
///     pub flags: Vec<String>,
///     pub login_count: u32,
/// }
///
/// impl Settings {
///     fn validate(&self) -> Result<(), String> {
///         Ok(())
///     }
/// }
/// ```
///
/// `name` defaults to the struct name. `check` names a function taking
/// `&Self` and returning `Result<(), String>`, run after every parse.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let model_info = match parse_model_attributes(&input.ident, &input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let field_names = match parse_field_names(&input.data) {
        Ok(names) => names,
        Err(e) => return e.to_compile_error().into(),
    };

    TokenStream::from(generate_model_impl(&input, &model_info, &field_names))
}
