//! Factory functions for test documents.
//!
//! Builds pages following the minisite markup conventions so tests and the
//! harness share one realistic layout.

use crate::lang::SUPPORTED_LANGS;
use crate::memory::{MemoryDocument, MemoryElement};

// ── Element factories ───────────────────────────────────────────

/// `<div id="content-<lang>" class="lang-content">`
pub fn content_panel(lang: &str) -> MemoryElement {
    MemoryElement::new("div")
        .with_id(&format!("content-{}", lang))
        .with_class("lang-content")
}

/// Panel whose body is indented Markdown source
pub fn markdown_panel(lang: &str, source: &str) -> MemoryElement {
    content_panel(lang).with_class("markdown").with_html(source)
}

/// `<div id="banner-<lang>" class="lang-banner">`
pub fn banner(lang: &str) -> MemoryElement {
    MemoryElement::new("div")
        .with_id(&format!("banner-{}", lang))
        .with_class("lang-banner")
}

/// `<span data-lang-block="<lang>">`
pub fn lang_block(lang: &str) -> MemoryElement {
    MemoryElement::new("span").with_attr("data-lang-block", lang)
}

/// `<a data-lang-link href="...">`
pub fn lang_link(href: &str) -> MemoryElement {
    MemoryElement::new("a")
        .with_attr("data-lang-link", "")
        .with_attr("href", href)
}

pub fn dropdown() -> MemoryElement {
    MemoryElement::new("select").with_id("language-dropdown")
}

pub fn back_link() -> MemoryElement {
    MemoryElement::new("a")
        .with_class("back-link")
        .with_attr("href", "index.html")
        .with_text("← Back")
}

// ── Page factories ──────────────────────────────────────────────

/// Detail page: one panel, banner and tagged block per supported language,
/// the dropdown, two back links, the two named links and two
/// language-aware links.
pub fn detail_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.push(dropdown());
    for lang in SUPPORTED_LANGS {
        doc.push(banner(lang));
        doc.push(content_panel(lang));
        doc.push(lang_block(lang));
    }
    doc.push(back_link());
    doc.push(back_link());
    doc.push(
        MemoryElement::new("a")
            .with_id("more-info-link")
            .with_attr("data-lang-link", "")
            .with_attr("href", "details.html")
            .with_text("More"),
    );
    doc.push(
        MemoryElement::new("a")
            .with_id("colophon-link")
            .with_attr("data-lang-link", "")
            .with_attr("href", "colophon.html?v=2")
            .with_text("Colophon"),
    );
    doc
}

/// Page with one Markdown panel per supported language
pub fn markdown_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.push(dropdown());
    for lang in SUPPORTED_LANGS {
        doc.push(markdown_panel(
            lang,
            &format!("\n        # {}\n\n        Body\n    ", lang.to_uppercase()),
        ));
    }
    doc
}

/// Page without content panels: only tagged blocks
pub fn blocks_only_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    for lang in SUPPORTED_LANGS {
        doc.push(lang_block(lang));
    }
    doc
}
