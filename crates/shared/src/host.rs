//! Page lifecycle over an abstract host.
//!
//! A [`SiteHost`] is the document plus the few browser capabilities the
//! switcher touches. The wasm binding implements it over `web_sys`; the test
//! harness implements it in memory.

use tracing::debug;

use crate::config::{SiteConfig, SwitchOptions};
use crate::dom::{DocumentMut, DocumentView, Mutation};
use crate::lang::LangCode;
use crate::markdown::{plan_markdown, MarkdownConverter};
use crate::resolver::{resolve_language, ResolveInput, Resolved};
use crate::switcher::{plan_switch, SwitchPlan};

pub trait SiteHost: DocumentView + DocumentMut {
    fn location_href(&self) -> String;

    fn location_search(&self) -> String {
        crate::location::search_of(&self.location_href()).to_string()
    }

    /// Reads the preference record; unavailable storage reads as `None`
    fn load_preference(&self, key: &str) -> Option<String>;

    /// Writes the preference record; failures are the host's to log
    fn store_preference(&mut self, key: &str, value: &str);

    /// Replaces the current history entry without navigating
    fn replace_location(&mut self, href: &str);

    /// Browser-reported locale such as `fr-BE`
    fn locale(&self) -> Option<String>;

    /// Markdown converter, looked up at call time
    fn markdown_converter(&self) -> Option<Box<dyn MarkdownConverter>>;
}

pub fn determine_language(host: &impl SiteHost, config: &SiteConfig) -> Resolved {
    let search = host.location_search();
    let stored = host.load_preference(&config.storage_key);
    let locale = host.locale();
    resolve_language(
        config,
        &ResolveInput {
            search: &search,
            stored: stored.as_deref(),
            locale: locale.as_deref(),
        },
    )
}

/// Renders pending Markdown blocks, returns how many were rendered
pub fn render_markdown(host: &mut impl SiteHost, config: &SiteConfig) -> usize {
    let converter = host.markdown_converter();
    let mutations = plan_markdown(&*host, config, converter.as_deref());
    host.apply_all(&mutations);
    mutations
        .iter()
        .filter(|m| matches!(m, Mutation::SetInnerHtml { .. }))
        .count()
}

/// Applies a language change and its host side effects
pub fn set_language(
    host: &mut impl SiteHost,
    config: &SiteConfig,
    lang: &LangCode,
    options: SwitchOptions,
) -> SwitchPlan {
    let href = host.location_href();
    let plan = plan_switch(&*host, config, lang, options, &href);

    host.apply_all(&plan.mutations);
    if let Some(lang) = &plan.persist {
        host.store_preference(&config.storage_key, lang.as_str());
    }
    if let Some(url) = &plan.replace_url {
        host.replace_location(url);
    }
    plan
}

/// Page-ready sequence: Markdown first, then resolve and apply with both
/// syncs on. Returns the effective language.
pub fn page_ready(host: &mut impl SiteHost, config: &SiteConfig) -> LangCode {
    let rendered = render_markdown(host, config);
    debug!("Rendered {} Markdown block(s)", rendered);

    let resolved = determine_language(host, config);
    set_language(host, config, &resolved.lang, SwitchOptions::default()).effective
}
