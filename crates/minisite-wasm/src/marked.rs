//! The global `marked` Markdown converter

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use shared::MarkdownConverter;

use crate::error::describe;

/// `marked.parse` bound to the `marked` object
pub struct MarkedGlobal {
    marked: JsValue,
    parse: Function,
}

impl MarkedGlobal {
    /// Looks up `globalThis.marked.parse`; `None` when the library is not loaded
    pub fn lookup() -> Option<Self> {
        let marked = Reflect::get(&js_sys::global(), &JsValue::from_str("marked")).ok()?;
        if marked.is_undefined() || marked.is_null() {
            return None;
        }
        let parse = Reflect::get(&marked, &JsValue::from_str("parse"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(Self { marked, parse })
    }
}

impl MarkdownConverter for MarkedGlobal {
    fn convert(&self, markdown: &str) -> Option<String> {
        match self.parse.call1(&self.marked, &JsValue::from_str(markdown)) {
            // a Promise in async mode is not a string and is skipped
            Ok(html) => html.as_string(),
            Err(e) => {
                tracing::warn!("marked.parse failed: {}", describe(&e));
                None
            }
        }
    }
}

/// `marked` if loaded, else the built-in converter when compiled in
pub fn converter() -> Option<Box<dyn MarkdownConverter>> {
    if let Some(marked) = MarkedGlobal::lookup() {
        return Some(Box::new(marked));
    }
    #[cfg(feature = "builtin-markdown")]
    {
        tracing::debug!("marked not loaded, using built-in Markdown converter");
        Some(Box::new(shared::markdown::PulldownConverter))
    }
    #[cfg(not(feature = "builtin-markdown"))]
    {
        None
    }
}
