//! Markdown blocks: dedent embedded markup and hand it to a converter.
//!
//! Blocks move one way, `unrendered -> rendered`. The rendered flag is an
//! attribute on the block itself, so a second pass over the same document
//! finds nothing to do.

use tracing::debug;

use crate::config::SiteConfig;
use crate::dom::{DocumentView, Mutation, Selector};

/// Markdown to HTML conversion capability
pub trait MarkdownConverter {
    /// `None` when the converter cannot produce HTML for this input
    fn convert(&self, markdown: &str) -> Option<String>;
}

impl<F> MarkdownConverter for F
where
    F: Fn(&str) -> Option<String>,
{
    fn convert(&self, markdown: &str) -> Option<String> {
        self(markdown)
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Drops one blank first line and one blank last line, then removes the
/// indentation shared by all non-blank lines.
///
/// Any whitespace character counts as one column, tabs included. Lines
/// shorter than the shared indentation (blank ones) are kept unchanged.
///
/// Whitespace is [`char::is_whitespace`], which differs from JavaScript's
/// `\s` and `trim()` in two code points: U+0085 (NEXT LINE) counts here and
/// not in JS, while U+FEFF (BYTE ORDER MARK) counts in JS and not here.
pub fn dedent_lines(lines: &[&str]) -> Vec<String> {
    let mut lines = lines;
    if let Some((first, rest)) = lines.split_first() {
        if is_blank(first) {
            lines = rest;
        }
    }
    if let Some((last, rest)) = lines.split_last() {
        if is_blank(last) {
            lines = rest;
        }
    }

    let indent = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| leading_whitespace(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if indent > 0 && line.chars().count() >= indent {
                line.chars().skip(indent).collect()
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// [`dedent_lines`] over `\n`-separated text
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    dedent_lines(&lines).join("\n")
}

/// Plans the rendering of every unrendered Markdown block.
///
/// Without a converter nothing happens. A block the converter declines is
/// left unrendered and untouched.
pub fn plan_markdown(
    doc: &impl DocumentView,
    config: &SiteConfig,
    converter: Option<&dyn MarkdownConverter>,
) -> Vec<Mutation> {
    let Some(converter) = converter else {
        debug!("No Markdown converter available, skipping blocks");
        return Vec::new();
    };

    let md = &config.markdown;
    let classes: Vec<&str> = md.classes.iter().map(String::as_str).collect();
    let mut mutations = Vec::new();

    for node in doc.query_all(&Selector::all_classes(&classes)) {
        if doc.attribute(node, &md.rendered_attr).as_deref() == Some("true") {
            continue;
        }
        let source = dedent(&doc.inner_html(node));
        let Some(html) = converter.convert(&source) else {
            debug!("Converter declined block {:?}", node);
            continue;
        };
        mutations.push(Mutation::SetInnerHtml { node, html });
        mutations.push(Mutation::SetAttribute {
            node,
            name: md.rendered_attr.clone(),
            value: "true".to_string(),
        });
    }

    mutations
}

/// Converter backed by `pulldown-cmark`
#[cfg(feature = "pulldown")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownConverter;

#[cfg(feature = "pulldown")]
impl MarkdownConverter for PulldownConverter {
    fn convert(&self, markdown: &str) -> Option<String> {
        let parser = pulldown_cmark::Parser::new(markdown);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        Some(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DocumentMut;
    use crate::memory::{MemoryDocument, MemoryElement};
    use std::cell::Cell;

    /// Wraps the source so the output shows exactly what was converted
    fn fake(markdown: &str) -> Option<String> {
        Some(format!("<pre>{}</pre>", markdown))
    }

    fn block(html: &str) -> MemoryElement {
        MemoryElement::new("div")
            .with_class("lang-content")
            .with_class("markdown")
            .with_html(html)
    }

    #[test]
    fn test_dedent_title_and_body() {
        let lines = ["", "    # Title", "    body", ""];
        assert_eq!(dedent_lines(&lines), vec!["# Title", "body"]);
    }

    #[test]
    fn test_dedent_keeps_relative_indent() {
        let text = "\n    - item\n        nested\n\n    end\n  ";
        assert_eq!(dedent(text), "- item\n    nested\n\nend");
    }

    #[test]
    fn test_dedent_tabs_count_as_whitespace() {
        let lines = ["\t\tcode", "\t\tmore"];
        assert_eq!(dedent_lines(&lines), vec!["code", "more"]);
        let mixed = [" \tone", "\t two"];
        assert_eq!(dedent_lines(&mixed), vec!["one", "two"]);
    }

    #[test]
    fn test_dedent_next_line_indents_but_bom_does_not() {
        let lines = ["\u{85}a", "\u{85}b"];
        assert_eq!(dedent_lines(&lines), vec!["a", "b"]);
        let lines = ["\u{feff}a", "\u{feff}b"];
        assert_eq!(dedent_lines(&lines), vec!["\u{feff}a", "\u{feff}b"]);
    }

    #[test]
    fn test_dedent_only_one_blank_line_dropped_each_side() {
        let lines = ["", "", "  a", "", ""];
        assert_eq!(dedent_lines(&lines), vec!["", "a", ""]);
    }

    #[test]
    fn test_dedent_short_blank_lines_untouched() {
        let lines = ["    a", "  ", "    b"];
        assert_eq!(dedent_lines(&lines), vec!["a", "  ", "b"]);
    }

    #[test]
    fn test_dedent_empty_input() {
        assert!(dedent_lines(&[]).is_empty());
        assert_eq!(dedent(""), "");
    }

    #[test]
    fn test_render_marks_block() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::new().with(block("\n    # Title\n    body\n"));
        let m = plan_markdown(&doc, &config, Some(&fake));
        doc.apply_all(&m);

        let el = &doc.elements()[0];
        assert_eq!(el.inner_html, "<pre># Title\nbody</pre>");
        assert_eq!(el.attribute("data-rendered").as_deref(), Some("true"));
    }

    #[test]
    fn test_render_twice_equals_once() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::new().with(block("  *hi*"));
        let calls = Cell::new(0);
        let counting = |md: &str| {
            calls.set(calls.get() + 1);
            fake(md)
        };

        let m = plan_markdown(&doc, &config, Some(&counting));
        doc.apply_all(&m);
        let once = doc.elements()[0].inner_html.clone();
        let m = plan_markdown(&doc, &config, Some(&counting));
        assert!(m.is_empty());
        doc.apply_all(&m);

        assert_eq!(doc.elements()[0].inner_html, once);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_no_converter_skips_everything() {
        let config = SiteConfig::default();
        let doc = MemoryDocument::new().with(block("# x"));
        assert!(plan_markdown(&doc, &config, None).is_empty());
    }

    #[test]
    fn test_non_markdown_content_ignored() {
        let config = SiteConfig::default();
        let doc = MemoryDocument::new()
            .with(MemoryElement::new("div").with_class("lang-content").with_html("# x"))
            .with(MemoryElement::new("div").with_class("markdown").with_html("# y"));
        assert!(plan_markdown(&doc, &config, Some(&fake)).is_empty());
    }

    #[test]
    fn test_declined_block_stays_unrendered() {
        let config = SiteConfig::default();
        let doc = MemoryDocument::new().with(block("# x"));
        let decline = |_: &str| -> Option<String> { None };
        assert!(plan_markdown(&doc, &config, Some(&decline)).is_empty());
    }

    #[cfg(feature = "pulldown")]
    #[test]
    fn test_pulldown_converter() {
        let html = PulldownConverter.convert("# Title\n\nbody").unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>body</p>"));
    }
}
