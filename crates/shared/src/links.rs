//! Language-aware navigation links

use crate::config::SiteConfig;
use crate::dom::{DocumentView, Mutation, Selector};
use crate::lang::LangCode;

/// Appends `lang=<lang>` to `base_href`, joining with `&` when the target
/// already has a query string and `?` otherwise. An empty target stays empty.
pub fn build_lang_aware_url(base_href: &str, lang: &str) -> String {
    append_query_param(base_href, "lang", lang)
}

/// Same as [`build_lang_aware_url`] with a custom parameter name
pub fn append_query_param(base_href: &str, param: &str, value: &str) -> String {
    if base_href.is_empty() {
        return String::new();
    }
    let separator = if base_href.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_href, separator, param, value)
}

/// Plans the rewrite of every language-aware link.
///
/// The original target is read from the base attribute when it is non-empty.
/// Links without one get their current target copied into it first, so later
/// rewrites start from the same original and never stack parameters.
pub fn plan_links(doc: &impl DocumentView, config: &SiteConfig, lang: &LangCode) -> Vec<Mutation> {
    let links = &config.links;
    let mut mutations = Vec::new();

    for node in doc.query_all(&Selector::has_attr(&links.marker_attr)) {
        let base = match doc
            .attribute(node, &links.base_attr)
            .filter(|base| !base.is_empty())
        {
            Some(base) => base,
            None => {
                let href = doc.attribute(node, &links.href_attr);
                if let Some(href) = &href {
                    mutations.push(Mutation::SetAttribute {
                        node,
                        name: links.base_attr.clone(),
                        value: href.clone(),
                    });
                }
                href.unwrap_or_default()
            }
        };

        mutations.push(Mutation::SetAttribute {
            node,
            name: links.href_attr.clone(),
            value: append_query_param(&base, &config.query_param, lang.as_str()),
        });
    }

    mutations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DocumentMut;
    use crate::memory::{MemoryDocument, MemoryElement};

    #[test]
    fn test_build_lang_aware_url() {
        assert_eq!(build_lang_aware_url("/page", "fr"), "/page?lang=fr");
        assert_eq!(build_lang_aware_url("/page?x=1", "fr"), "/page?x=1&lang=fr");
        assert_eq!(build_lang_aware_url("", "fr"), "");
    }

    #[test]
    fn test_base_href_takes_precedence() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::new().with(
            MemoryElement::new("a")
                .with_attr("data-lang-link", "")
                .with_attr("data-base-href", "/about.html")
                .with_attr("href", "/stale?lang=nl"),
        );
        let m = plan_links(&doc, &config, &LangCode::from("fr"));
        doc.apply_all(&m);
        assert_eq!(
            doc.elements()[0].attribute("href").as_deref(),
            Some("/about.html?lang=fr")
        );
    }

    #[test]
    fn test_original_href_captured_once() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::new()
            .with(MemoryElement::new("a").with_attr("data-lang-link", "").with_attr("href", "/more.html"));

        for lang in ["fr", "nl", "nl", "en"] {
            let m = plan_links(&doc, &config, &LangCode::from(lang));
            doc.apply_all(&m);
        }

        let link = &doc.elements()[0];
        assert_eq!(link.attribute("data-base-href").as_deref(), Some("/more.html"));
        assert_eq!(link.attribute("href").as_deref(), Some("/more.html?lang=en"));
    }

    #[test]
    fn test_reapplying_same_language_is_stable() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::new().with(
            MemoryElement::new("a")
                .with_attr("data-lang-link", "")
                .with_attr("href", "/colophon.html?v=2"),
        );
        let first = plan_links(&doc, &config, &LangCode::from("nl"));
        doc.apply_all(&first);
        let after_first = doc.elements()[0].attribute("href");
        let second = plan_links(&doc, &config, &LangCode::from("nl"));
        doc.apply_all(&second);
        assert_eq!(doc.elements()[0].attribute("href"), after_first);
        assert_eq!(after_first.as_deref(), Some("/colophon.html?v=2&lang=nl"));
    }

    #[test]
    fn test_missing_target_clears_href() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::new()
            .with(MemoryElement::new("a").with_attr("data-lang-link", ""))
            .with(MemoryElement::new("a").with_attr("data-lang-link", "").with_attr("href", ""));
        let m = plan_links(&doc, &config, &LangCode::from("fr"));
        doc.apply_all(&m);
        assert_eq!(doc.elements()[0].attribute("href").as_deref(), Some(""));
        assert_eq!(doc.elements()[0].attribute("data-base-href"), None);
        assert_eq!(doc.elements()[1].attribute("href").as_deref(), Some(""));
    }

    #[test]
    fn test_empty_base_falls_through_to_href() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::new().with(
            MemoryElement::new("a")
                .with_attr("data-lang-link", "")
                .with_attr("data-base-href", "")
                .with_attr("href", "/x.html"),
        );
        let m = plan_links(&doc, &config, &LangCode::from("fr"));
        doc.apply_all(&m);
        let link = &doc.elements()[0];
        assert_eq!(link.attribute("href").as_deref(), Some("/x.html?lang=fr"));
        assert_eq!(link.attribute("data-base-href").as_deref(), Some("/x.html"));
    }

    #[test]
    fn test_unmarked_links_untouched() {
        let config = SiteConfig::default();
        let doc = MemoryDocument::new().with(MemoryElement::new("a").with_attr("href", "/x.html"));
        assert!(plan_links(&doc, &config, &LangCode::from("fr")).is_empty());
    }
}
