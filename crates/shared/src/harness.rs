//! Headless test harness for driving the switcher without a browser.
//!
//! Wraps a [`MemoryDocument`] with in-memory storage, a location with a
//! history log, a reported locale and an optional Markdown converter.

use std::collections::HashMap;

use crate::config::{SiteConfig, SwitchOptions};
use crate::dom::{DocumentMut, DocumentView, Mutation, NodeId, Selector};
use crate::host::{self, SiteHost};
use crate::lang::LangCode;
use crate::markdown::MarkdownConverter;
use crate::memory::{MemoryDocument, MemoryElement};
use crate::resolver::Resolved;
use crate::switcher::SwitchPlan;

/// Converter used by the harness
pub type ConvertFn = fn(&str) -> Option<String>;

/// Headless browser page
pub struct TestHarness {
    pub config: SiteConfig,
    pub document: MemoryDocument,
    storage: HashMap<String, String>,
    location: String,
    history: Vec<String>,
    locale: Option<String>,
    converter: Option<ConvertFn>,
}

impl TestHarness {
    /// Harness at `https://minisite.test/index.html` with no stored
    /// preference, no locale and no converter.
    pub fn new(document: MemoryDocument) -> Self {
        Self {
            config: SiteConfig::default(),
            document,
            storage: HashMap::new(),
            location: "https://minisite.test/index.html".to_string(),
            history: Vec::new(),
            locale: None,
            converter: None,
        }
    }

    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_location(mut self, href: &str) -> Self {
        self.location = href.to_string();
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn with_stored(mut self, lang: &str) -> Self {
        let key = self.config.storage_key.clone();
        self.storage.insert(key, lang.to_string());
        self
    }

    pub fn with_converter(mut self, converter: ConvertFn) -> Self {
        self.converter = Some(converter);
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Page-ready: render Markdown, resolve, apply
    pub fn load(&mut self) -> LangCode {
        let config = self.config.clone();
        host::page_ready(self, &config)
    }

    pub fn determine_language(&self) -> Resolved {
        host::determine_language(self, &self.config)
    }

    pub fn set_language(&mut self, lang: &str, options: SwitchOptions) -> SwitchPlan {
        let config = self.config.clone();
        host::set_language(self, &config, &LangCode::from(lang), options)
    }

    pub fn render_markdown(&mut self) -> usize {
        let config = self.config.clone();
        host::render_markdown(self, &config)
    }

    /// User picks `lang` in the dropdown. Returns `None` when the page has
    /// no dropdown, as no listener would be attached.
    pub fn select(&mut self, lang: &str) -> Option<SwitchPlan> {
        let node = self.document.get_by_id(&self.config.dropdown_id)?;
        self.document.apply(&Mutation::SetValue {
            node,
            value: lang.to_string(),
        });
        Some(self.set_language(lang, SwitchOptions::default()))
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn stored(&self) -> Option<&str> {
        self.storage_value(&self.config.storage_key)
    }

    pub fn storage_value(&self, key: &str) -> Option<&str> {
        self.storage.get(key).map(String::as_str)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Every `replaceState` target, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.document.element_by_id(id)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.element(id).map(|e| e.is_visible()).unwrap_or(false)
    }

    /// Ids of visible elements matching `selector`
    pub fn visible_ids(&self, selector: &Selector) -> Vec<String> {
        self.document
            .visible(selector)
            .into_iter()
            .filter_map(|e| e.id.clone())
            .collect()
    }

    /// `data-lang-block` values of visible tagged blocks
    pub fn visible_blocks(&self) -> Vec<String> {
        self.document
            .visible(&Selector::has_attr("data-lang-block"))
            .into_iter()
            .filter_map(|e| e.attribute("data-lang-block"))
            .collect()
    }

    pub fn dropdown_value(&self) -> Option<&str> {
        self.element(&self.config.dropdown_id)
            .and_then(|e| e.value.as_deref())
    }
}

impl DocumentView for TestHarness {
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.document.query_all(selector)
    }

    fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.document.get_by_id(id)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.document.attribute(node, name)
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.document.inner_html(node)
    }
}

impl DocumentMut for TestHarness {
    fn apply(&mut self, mutation: &Mutation) {
        self.document.apply(mutation);
    }
}

impl SiteHost for TestHarness {
    fn location_href(&self) -> String {
        self.location.clone()
    }

    fn load_preference(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }

    fn store_preference(&mut self, key: &str, value: &str) {
        self.storage.insert(key.to_string(), value.to_string());
    }

    fn replace_location(&mut self, href: &str) {
        self.location = href.to_string();
        self.history.push(href.to_string());
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn markdown_converter(&self) -> Option<Box<dyn MarkdownConverter>> {
        self.converter
            .map(|f| Box::new(f) as Box<dyn MarkdownConverter>)
    }
}
