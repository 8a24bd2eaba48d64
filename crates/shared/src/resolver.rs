//! Language resolution on page load

use tracing::debug;

use crate::config::SiteConfig;
use crate::lang::LangCode;
use crate::location::query_param;

/// Host state the resolver reads
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveInput<'a> {
    /// `location.search`
    pub search: &'a str,
    /// Persisted preference
    pub stored: Option<&'a str>,
    /// `navigator.language`
    pub locale: Option<&'a str>,
}

/// Where the resolved language came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangSource {
    Query,
    Stored,
    Locale,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub lang: LangCode,
    pub source: LangSource,
}

/// Picks the language: query parameter, then stored preference, then a
/// locale prefix match, then the default. Never fails and never checks the
/// result against the supported set.
pub fn resolve_language(config: &SiteConfig, input: &ResolveInput<'_>) -> Resolved {
    let (lang, source) = if let Some(lang) = query_param(input.search, &config.query_param) {
        (LangCode::from(lang), LangSource::Query)
    } else if let Some(stored) = input.stored.filter(|s| !s.is_empty()) {
        (LangCode::from(stored), LangSource::Stored)
    } else if let Some(m) = input
        .locale
        .and_then(|locale| config.locale_matches.iter().find(|m| m.matches(locale)))
    {
        (m.lang.clone(), LangSource::Locale)
    } else {
        (config.default_lang.clone(), LangSource::Default)
    };

    debug!("Resolved language '{}' from {:?}", lang, source);
    Resolved { lang, source }
}
