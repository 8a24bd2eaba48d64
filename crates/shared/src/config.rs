//! Site configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lang::{default_locale_matches, LangCode, LocaleMatch, DEFAULT_LANG};
use crate::view::ViewDescriptor;

/// Error while loading a [`SiteConfig`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Input is not valid JSON for the config shape
    Parse(String),
    /// A required name is empty
    EmptyField(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::EmptyField(name) => write!(f, "Config field '{}' must not be empty", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Attributes driving the link rewriter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkConfig {
    /// Marks a link as language-aware
    pub marker_attr: String,
    /// Original target, captured before the first rewrite
    pub base_attr: String,
    pub href_attr: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            marker_attr: "data-lang-link".to_string(),
            base_attr: "data-base-href".to_string(),
            href_attr: "href".to_string(),
        }
    }
}

/// Markdown block discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkdownConfig {
    /// Element must carry all of these classes
    pub classes: Vec<String>,
    /// Set to `"true"` once rendered
    pub rendered_attr: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            classes: vec!["lang-content".to_string(), "markdown".to_string()],
            rendered_attr: "data-rendered".to_string(),
        }
    }
}

/// Elements whose text is localized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelTargets {
    pub back_link_class: String,
    pub more_info_id: String,
    pub colophon_id: String,
}

impl Default for LabelTargets {
    fn default() -> Self {
        Self {
            back_link_class: "back-link".to_string(),
            more_info_id: "more-info-link".to_string(),
            colophon_id: "colophon-link".to_string(),
        }
    }
}

/// Everything the switcher needs to know about the page.
///
/// All fields default to the minisite's markup conventions, so an empty JS
/// object or `{}` JSON is a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub default_lang: LangCode,
    pub locale_matches: Vec<LocaleMatch>,
    /// `localStorage` key of the preference record
    pub storage_key: String,
    /// Query parameter carrying the language
    pub query_param: String,
    pub dropdown_id: String,
    pub view: ViewDescriptor,
    pub links: LinkConfig,
    pub markdown: MarkdownConfig,
    pub labels: LabelTargets,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_lang: LangCode::new(DEFAULT_LANG),
            locale_matches: default_locale_matches(),
            storage_key: "preferredLanguage".to_string(),
            query_param: "lang".to_string(),
            dropdown_id: "language-dropdown".to_string(),
            view: ViewDescriptor::default(),
            links: LinkConfig::default(),
            markdown: MarkdownConfig::default(),
            labels: LabelTargets::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_lang.is_empty() {
            return Err(ConfigError::EmptyField("defaultLang"));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyField("storageKey"));
        }
        if self.query_param.is_empty() {
            return Err(ConfigError::EmptyField("queryParam"));
        }
        Ok(())
    }
}

/// Which host state a language change writes back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwitchOptions {
    /// Rewrite the location's query parameter via history replacement
    pub update_url: bool,
    /// Overwrite the persisted preference
    pub update_storage: bool,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            update_url: true,
            update_storage: true,
        }
    }
}

impl SwitchOptions {
    /// Flags as read from a loose options object: anything but an explicit
    /// `false` is on, so a missing or non-boolean value keeps the default
    pub fn from_flags(update_url: Option<bool>, update_storage: Option<bool>) -> Self {
        Self {
            update_url: flag_enabled(update_url),
            update_storage: flag_enabled(update_storage),
        }
    }

    /// Content-only update, host state untouched
    pub fn view_only() -> Self {
        Self {
            update_url: false,
            update_storage: false,
        }
    }
}

fn flag_enabled(flag: Option<bool>) -> bool {
    flag != Some(false)
}
