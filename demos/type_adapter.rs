//! Storing plain records with an adapter codec
//!
//! Two products keep their dimensions in a JSON column. The record type has no
//! validation of its own; a `TypeAdapter` compiled once validates it on every
//! read, and a type-erased codec shows one codec type serving any record.
//!
//! Run with `cargo run --example type_adapter`.

use std::sync::Arc;
use typecol::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Dimensions {
    width: f64,
    height: f64,
    depth: f64,
    unit: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let adapter = Arc::new(TypeAdapter::<Dimensions>::named("Dimensions"));
    let codec = AdapterCodec::new(adapter.clone());
    let dialect = Dialect::Sqlite;

    println!(
        "dimensions column: {}",
        codec.resolve_storage_descriptor(&dialect)?
    );

    let products = [
        (
            "Coffee Table",
            Dimensions {
                width: 120.0,
                height: 45.0,
                depth: 60.0,
                unit: "cm".to_string(),
            },
        ),
        (
            "Bookshelf",
            Dimensions {
                width: 80.0,
                height: 180.0,
                depth: 30.0,
                unit: "cm".to_string(),
            },
        ),
    ];

    let mut rows = Vec::new();
    for (name, dimensions) in &products {
        rows.push((*name, codec.encode(Some(dimensions), &dialect)?));
    }
    rows.sort_by(|a, b| a.0.cmp(b.0));

    println!("Loaded {} products:", rows.len());
    for (name, stored) in rows {
        if let Some(dims) = codec.decode(stored, &dialect)? {
            println!("- {}: {}x{} {}", name, dims.width, dims.height, dims.unit);
        }
    }

    // One codec type for any record
    let reusable = AdapterCodec::<AnyValue>::erased(adapter);
    let stored = Some(serde_json::json!({"width": 1.0, "height": 2.0, "depth": 3.0, "unit": "m"}));
    if let Some(value) = reusable.decode(stored, &dialect)? {
        if let Some(dims) = value.downcast_ref::<Dimensions>() {
            println!("reusable codec loaded {:?}", dims);
        }
    }

    let mut ctx = AutogenContext::new(dialect).with_render_item(render_item);
    println!("migration type: {}", ctx.render(ItemKind::Type, &codec)?);

    Ok(())
}
