// Leaflet bindings: thin wrappers over the global `L`, no state or logic.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::LatLng;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn create_map(container: &HtmlElement, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &Map, center: &JsValue, zoom: f64, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = flyToBounds)]
    pub fn fly_to_bounds(this: &Map, bounds: &LatLngBounds, options: &JsValue) -> Map;

    #[wasm_bindgen(method)]
    pub fn once(this: &Map, event: &str, handler: &Function) -> Map;

    #[wasm_bindgen(method)]
    pub fn stop(this: &Map) -> Map;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map) -> Map;

    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type GeoJson;

    #[wasm_bindgen(js_namespace = L, js_name = geoJSON)]
    pub fn geo_json(data: &JsValue, options: &JsValue) -> GeoJson;

    #[wasm_bindgen(method, js_name = setStyle)]
    pub fn set_style(this: &GeoJson, style: &JsValue) -> GeoJson;

    #[wasm_bindgen(method, js_name = bringToFront)]
    pub fn bring_to_front(this: &GeoJson) -> GeoJson;

    #[wasm_bindgen(method, js_name = getBounds)]
    pub fn get_bounds(this: &GeoJson) -> LatLngBounds;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &GeoJson, content: &str, options: &JsValue) -> GeoJson;

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_event(this: &GeoJson, event: &str, handler: &Function) -> GeoJson;

    #[derive(Debug, Clone)]
    pub type LatLngBounds;

    #[wasm_bindgen(method, js_name = isValid)]
    pub fn is_valid(this: &LatLngBounds) -> bool;

    #[wasm_bindgen(js_namespace = L, js_name = canvas)]
    pub fn canvas_renderer(options: &JsValue) -> JsValue;

    #[derive(Debug, Clone)]
    pub type Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = layers)]
    pub fn layers_control(base_layers: &Object, overlays: &JsValue) -> Control;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_control_to(this: &Control, map: &Map) -> Control;
}

/// `[lat, lng]` as Leaflet accepts it.
pub fn lat_lng(point: LatLng) -> JsValue {
    Array::of2(&point.lat.into(), &point.lng.into()).into()
}

/// Builds a plain options object from key/value pairs that may hold JS
/// objects serde cannot describe (renderers, layers).
pub fn options(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj)
}
