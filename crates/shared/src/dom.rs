//! Document abstraction shared by the browser binding and the in-memory document.
//!
//! Planners only read through [`DocumentView`] and only describe writes as
//! [`Mutation`] values; the host decides how to apply them.

use serde::{Deserialize, Serialize};

/// Handle to an element inside one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Selectors the switcher needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selector {
    /// `[id="..."]`
    Id { id: String },
    /// `.name`
    Class { name: String },
    /// `.a.b`, element carries every class
    AllClasses { names: Vec<String> },
    /// `[name]`
    HasAttr { name: String },
    /// `[name="value"]`
    AttrEquals { name: String, value: String },
}

impl Selector {
    pub fn id(id: &str) -> Self {
        Selector::Id { id: id.to_string() }
    }

    pub fn class(name: &str) -> Self {
        Selector::Class {
            name: name.to_string(),
        }
    }

    pub fn all_classes(names: &[&str]) -> Self {
        Selector::AllClasses {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn has_attr(name: &str) -> Self {
        Selector::HasAttr {
            name: name.to_string(),
        }
    }

    pub fn attr_equals(name: &str, value: &str) -> Self {
        Selector::AttrEquals {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// CSS selector string for `querySelectorAll`
    pub fn to_css(&self) -> String {
        match self {
            Selector::Id { id } => format!("[id=\"{}\"]", escape_css_string(id)),
            Selector::Class { name } => format!(".{}", name),
            Selector::AllClasses { names } => {
                names.iter().map(|n| format!(".{}", n)).collect::<String>()
            }
            Selector::HasAttr { name } => format!("[{}]", name),
            Selector::AttrEquals { name, value } => {
                format!("[{}=\"{}\"]", name, escape_css_string(value))
            }
        }
    }
}

/// Escapes a value for use inside a double-quoted CSS string
fn escape_css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}

/// Inline `display` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    /// `none`
    Hidden,
    /// `block`
    Block,
    /// Empty string: fall back to the stylesheet
    Default,
}

impl Display {
    pub fn css_value(&self) -> &'static str {
        match self {
            Display::Hidden => "none",
            Display::Block => "block",
            Display::Default => "",
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Display::Hidden)
    }
}

/// One DOM write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    SetDisplay { node: NodeId, display: Display },
    SetAttribute { node: NodeId, name: String, value: String },
    SetText { node: NodeId, text: String },
    SetInnerHtml { node: NodeId, html: String },
    /// Form control value, used for the language dropdown
    SetValue { node: NodeId, value: String },
}

impl Mutation {
    pub fn node(&self) -> NodeId {
        match self {
            Mutation::SetDisplay { node, .. }
            | Mutation::SetAttribute { node, .. }
            | Mutation::SetText { node, .. }
            | Mutation::SetInnerHtml { node, .. }
            | Mutation::SetValue { node, .. } => *node,
        }
    }
}

/// Read access to a document
pub trait DocumentView {
    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &Selector) -> Vec<NodeId>;

    /// First element with the given id
    fn get_by_id(&self, id: &str) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn inner_html(&self, node: NodeId) -> String;
}

/// Write access to a document
pub trait DocumentMut {
    fn apply(&mut self, mutation: &Mutation);

    fn apply_all(&mut self, mutations: &[Mutation]) {
        for m in mutations {
            self.apply(m);
        }
    }
}
