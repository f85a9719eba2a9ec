// Browser helpers shared by the components.
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::error::{Result, ViewerError};

/// Serializes through JSON so serde field renames carry over to JS objects.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    let text = serde_json::to_string(value).map_err(|e| ViewerError::Js(e.to_string()))?;
    Ok(js_sys::JSON::parse(&text)?)
}
