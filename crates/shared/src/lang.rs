//! Language codes and the built-in language set

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language code used as a lookup key (`en`, `fr`, `nl`, ...)
///
/// The code is opaque: nothing checks it against the supported set until the
/// view switcher looks for a matching content panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LangCode(String);

impl LangCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LangCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LangCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for LangCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Default language
pub const DEFAULT_LANG: &str = "en";

/// Languages the site ships content for
pub const SUPPORTED_LANGS: &[&str] = &["en", "fr", "nl"];

/// Locale prefix to language mapping, checked in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleMatch {
    pub prefix: String,
    pub lang: LangCode,
}

impl LocaleMatch {
    pub fn new(prefix: &str, lang: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            lang: LangCode::new(lang),
        }
    }

    /// Plain case-sensitive prefix test, `fr-BE` matches `fr`
    pub fn matches(&self, locale: &str) -> bool {
        locale.starts_with(&self.prefix)
    }
}

/// `en` is the default and never needs a locale match
pub fn default_locale_matches() -> Vec<LocaleMatch> {
    vec![LocaleMatch::new("fr", "fr"), LocaleMatch::new("nl", "nl")]
}
