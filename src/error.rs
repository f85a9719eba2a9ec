use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced while loading data or talking to the map library.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: gloo_net::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not parse {resource}: {source}")]
    Parse {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("javascript interop: {0}")]
    Js(String),
}

impl From<JsValue> for ViewerError {
    fn from(value: JsValue) -> Self {
        ViewerError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
