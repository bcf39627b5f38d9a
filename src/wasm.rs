use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::analysis::{AnalysisResult, analyze_resource};
use crate::resource::ImageResource;
use crate::tags::RandomTagSelector;

fn to_js(result: &AnalysisResult) -> Result<Object, JsValue> {
    let tags_js = Array::new();
    for tag in &result.tags {
        tags_js.push(&JsValue::from_str(tag));
    }
    let palette_js = Array::new();
    for hex in &result.color_palette {
        palette_js.push(&JsValue::from_str(hex));
    }

    let out = Object::new();
    Reflect::set(&out, &JsValue::from_str("tags"), &tags_js)?;
    Reflect::set(&out, &JsValue::from_str("colorPalette"), &palette_js)?;
    Ok(out)
}

/// Analyze an RGBA buffer as returned by `CanvasRenderingContext2D.getImageData`.
///
/// Returns `{ tags: string[], colorPalette: string[] }`. Reading the canvas
/// is the caller's job, so a cross-origin `SecurityError` surfaces on the JS
/// side before this is ever called.
#[wasm_bindgen]
pub fn analyze_pixels(data: Vec<u8>, width: u32, height: u32) -> Result<Object, JsValue> {
    let resource = ImageResource::new(width, height, data)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&analyze_resource(&resource, &RandomTagSelector))
}

/// Analyze encoded image bytes (PNG, JPEG, ...), e.g. from a `fetch` response.
#[wasm_bindgen]
pub fn analyze_image(input: Vec<u8>) -> Result<Object, JsValue> {
    let resource = ImageResource::decode(&input)
        .map_err(|e| JsValue::from_str(&format!("Unable to decode image: {e}")))?;
    to_js(&analyze_resource(&resource, &RandomTagSelector))
}
