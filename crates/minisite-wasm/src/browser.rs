//! [`SiteHost`] over the live browser page.
//!
//! Elements are registered in a node table as queries find them; a
//! [`NodeId`] is only meaningful for the `BrowserHost` that issued it.

use std::cell::RefCell;

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement, Storage, Window};

use shared::{DocumentMut, DocumentView, MarkdownConverter, Mutation, NodeId, Selector, SiteHost};

use crate::error::{describe, SiteError};
use crate::marked;

pub struct BrowserHost {
    window: Window,
    document: Document,
    nodes: RefCell<Vec<Element>>,
}

impl BrowserHost {
    pub fn new() -> Result<Self, SiteError> {
        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let document = window.document().ok_or(SiteError::NoDocument)?;
        Ok(Self {
            window,
            document,
            nodes: RefCell::new(Vec::new()),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn register(&self, element: Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(element);
        NodeId(nodes.len() - 1)
    }

    fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node.0).cloned()
    }

    fn storage(&self) -> Result<Storage, SiteError> {
        self.window
            .local_storage()
            .map_err(|e| SiteError::Storage(describe(&e)))?
            .ok_or_else(|| SiteError::Storage("localStorage unavailable".to_string()))
    }

    fn try_replace_location(&self, href: &str) -> Result<(), SiteError> {
        let history = self
            .window
            .history()
            .map_err(|e| SiteError::History(describe(&e)))?;
        history
            .replace_state_with_url(&Object::new(), "", Some(href))
            .map_err(|e| SiteError::History(describe(&e)))
    }

    fn try_apply(&self, mutation: &Mutation) -> Result<(), SiteError> {
        let Some(el) = self.element(mutation.node()) else {
            return Ok(());
        };
        let js = |e: JsValue| SiteError::Js(describe(&e));
        match mutation {
            Mutation::SetDisplay { display, .. } => {
                if let Some(html) = el.dyn_ref::<HtmlElement>() {
                    html.style()
                        .set_property("display", display.css_value())
                        .map_err(js)?;
                }
            }
            Mutation::SetAttribute { name, value, .. } => el.set_attribute(name, value).map_err(js)?,
            Mutation::SetText { text, .. } => el.set_text_content(Some(text)),
            Mutation::SetInnerHtml { html, .. } => el.set_inner_html(html),
            Mutation::SetValue { value, .. } => match el.dyn_ref::<HtmlSelectElement>() {
                Some(select) => select.set_value(value),
                None => {
                    Reflect::set(&el, &JsValue::from_str("value"), &JsValue::from_str(value))
                        .map_err(js)?;
                }
            },
        }
        Ok(())
    }
}

impl DocumentView for BrowserHost {
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let css = selector.to_css();
        let list = match self.document.query_selector_all(&css) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Selector '{}' rejected: {}", css, describe(&e));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.register(el))
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.document
            .get_element_by_id(id)
            .map(|el| self.register(el))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).and_then(|el| el.get_attribute(name))
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node).map(|el| el.inner_html()).unwrap_or_default()
    }
}

impl DocumentMut for BrowserHost {
    fn apply(&mut self, mutation: &Mutation) {
        if let Err(e) = self.try_apply(mutation) {
            tracing::warn!("{:?} failed: {}", mutation, e);
        }
    }
}

impl SiteHost for BrowserHost {
    fn location_href(&self) -> String {
        match self.window.location().href() {
            Ok(href) => href,
            Err(e) => {
                tracing::warn!("{}", SiteError::Location(describe(&e)));
                String::new()
            }
        }
    }

    fn location_search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn load_preference(&self, key: &str) -> Option<String> {
        let storage = match self.storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("{}", e);
                return None;
            }
        };
        storage.get_item(key).ok().flatten()
    }

    fn store_preference(&mut self, key: &str, value: &str) {
        let result = self
            .storage()
            .and_then(|s| s.set_item(key, value).map_err(|e| SiteError::Storage(describe(&e))));
        if let Err(e) = result {
            tracing::warn!("Preference not saved: {}", e);
        }
    }

    fn replace_location(&mut self, href: &str) {
        if let Err(e) = self.try_replace_location(href) {
            tracing::warn!("{}", e);
        }
    }

    fn locale(&self) -> Option<String> {
        self.window.navigator().language()
    }

    fn markdown_converter(&self) -> Option<Box<dyn MarkdownConverter>> {
        marked::converter()
    }
}
