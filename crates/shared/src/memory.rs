//! In-memory document used by the headless harness and tests.

use std::collections::BTreeMap;

use crate::dom::{DocumentMut, DocumentView, Mutation, NodeId, Selector};

/// A flat element record; nesting is irrelevant to the switcher
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryElement {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub inner_html: String,
    /// Inline `style.display`; `None` until something writes it
    pub display: Option<String>,
    /// Form control value
    pub value: Option<String>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self.inner_html = escape_html(text);
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.inner_html = html.to_string();
        self.text = html.to_string();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            _ => self.attributes.get(name).cloned(),
        }
    }

    /// Visible unless the inline display is `none`
    pub fn is_visible(&self) -> bool {
        self.display.as_deref() != Some("none")
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id { id } => self.id.as_deref() == Some(id.as_str()),
            Selector::Class { name } => self.has_class(name),
            Selector::AllClasses { names } => names.iter().all(|n| self.has_class(n)),
            Selector::HasAttr { name } => self.attribute(name).is_some(),
            Selector::AttrEquals { name, value } => {
                self.attribute(name).as_deref() == Some(value.as_str())
            }
        }
    }
}

/// Flat in-memory document
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: MemoryElement) -> NodeId {
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    pub fn with(mut self, element: MemoryElement) -> Self {
        self.push(element);
        self
    }

    pub fn element(&self, node: NodeId) -> Option<&MemoryElement> {
        self.elements.get(node.0)
    }

    pub fn element_by_id(&self, id: &str) -> Option<&MemoryElement> {
        self.get_by_id(id).and_then(|n| self.element(n))
    }

    pub fn elements(&self) -> &[MemoryElement] {
        &self.elements
    }

    /// Elements matching `selector` whose inline display is not `none`
    pub fn visible(&self, selector: &Selector) -> Vec<&MemoryElement> {
        self.elements
            .iter()
            .filter(|e| e.matches(selector) && e.is_visible())
            .collect()
    }
}

impl DocumentView for MemoryDocument {
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(selector))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).and_then(|e| e.attribute(name))
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|e| e.inner_html.clone())
            .unwrap_or_default()
    }
}

impl DocumentMut for MemoryDocument {
    fn apply(&mut self, mutation: &Mutation) {
        let Some(el) = self.elements.get_mut(mutation.node().0) else {
            return;
        };
        match mutation {
            Mutation::SetDisplay { display, .. } => {
                el.display = Some(display.css_value().to_string());
            }
            Mutation::SetAttribute { name, value, .. } => match name.as_str() {
                "id" => el.id = Some(value.clone()),
                _ => {
                    el.attributes.insert(name.clone(), value.clone());
                }
            },
            Mutation::SetText { text, .. } => {
                el.text = text.clone();
                el.inner_html = escape_html(text);
            }
            Mutation::SetInnerHtml { html, .. } => {
                el.inner_html = html.clone();
                el.text = html.clone();
            }
            Mutation::SetValue { value, .. } => el.value = Some(value.clone()),
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
