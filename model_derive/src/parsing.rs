//! Parsing utilities for model attributes
//!
//! This module handles the parsing of `#[model(...)]` and the validation of
//! model names.

use syn::{Attribute, Data, Error, Fields, Ident, LitStr, Path, Result};

#[derive(Debug)]
pub struct ModelInfo {
    pub name: String,
    pub check: Option<Path>,
}

/// Validate a model name and return syn::Error for better proc macro error handling
pub fn validate_model_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_model_name(name)
        .map_err(|e| Error::new(span, format!("Invalid model name '{}': {}", name, e)))
}

/// Model names appear in error messages and as labels in migration output,
/// so they follow identifier rules
fn validate_model_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    Ok(())
}

pub fn parse_model_attributes(ident: &Ident, attrs: &[Attribute]) -> Result<ModelInfo> {
    let mut name = None;
    let mut check = None;

    for attr in attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                validate_model_name_syn(&value.value(), value.span())?;
                name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("check") {
                let value: LitStr = meta.value()?.parse()?;
                check = Some(value.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("unknown model attribute: expected `name` or `check`"))
            }
        })?;
    }

    Ok(ModelInfo {
        name: name.unwrap_or_else(|| ident.to_string()),
        check,
    })
}

pub fn parse_field_names(data: &Data) -> Result<Vec<String>> {
    let fields = match data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new(
                proc_macro2::Span::call_site(),
                "Model can only be derived for structs",
            ))
        }
    };

    match fields {
        Fields::Named(named) => Ok(named
            .named
            .iter()
            .filter_map(|field| field.ident.as_ref())
            .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
            .collect()),
        Fields::Unnamed(_) | Fields::Unit => Ok(Vec::new()),
    }
}
