use std::fmt;

use wasm_bindgen::JsValue;

use shared::ConfigError;

/// Failures at the browser boundary
#[derive(Debug, Clone, PartialEq)]
pub enum SiteError {
    /// No `window` (worker or non-browser host)
    NoWindow,
    NoDocument,
    /// `localStorage` missing or throwing
    Storage(String),
    History(String),
    Location(String),
    Config(ConfigError),
    Js(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::NoWindow => write!(f, "No window available"),
            SiteError::NoDocument => write!(f, "No document available"),
            SiteError::Storage(msg) => write!(f, "Storage error: {}", msg),
            SiteError::History(msg) => write!(f, "History error: {}", msg),
            SiteError::Location(msg) => write!(f, "Location error: {}", msg),
            SiteError::Config(e) => write!(f, "{}", e),
            SiteError::Js(msg) => write!(f, "JS error: {}", msg),
        }
    }
}

impl std::error::Error for SiteError {}

impl From<ConfigError> for SiteError {
    fn from(e: ConfigError) -> Self {
        SiteError::Config(e)
    }
}

impl From<SiteError> for JsValue {
    fn from(e: SiteError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Best-effort text of a thrown JS value
pub fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
