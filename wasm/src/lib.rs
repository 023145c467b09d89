use course_graph_layout::{LayoutOptions, layout_catalog_json};
use wasm_bindgen::prelude::*;

fn parse_options(options_json: Option<String>) -> Result<LayoutOptions, String> {
    match options_json {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str::<LayoutOptions>(&raw).map_err(|error| error.to_string())
        }
        _ => Ok(LayoutOptions::default()),
    }
}

fn layout_json(catalog_json: &str, options_json: Option<String>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    layout_catalog_json(catalog_json, options).map_err(|error| error.to_string())
}

/// Lay out a course catalog and return node, edge and department geometry as JSON.
#[wasm_bindgen]
pub fn layout_courses_json(catalog_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_json(catalog_json, options_json).map_err(|error| JsValue::from_str(&error))
}
