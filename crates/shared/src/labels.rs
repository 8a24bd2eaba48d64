//! Fixed UI labels per language

use crate::config::SiteConfig;
use crate::dom::{DocumentView, Mutation, NodeId, Selector};
use crate::lang::LangCode;

/// Localized UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Every `.back-link`
    BackLink,
    MoreInfo,
    Colophon,
}

impl Label {
    pub fn all() -> &'static [Label] {
        &[Label::BackLink, Label::MoreInfo, Label::Colophon]
    }

    /// Built-in text for `lang`, `None` for languages without a translation
    pub fn text(&self, lang: &str) -> Option<&'static str> {
        let text = match (self, lang) {
            (Label::BackLink, "en") => "← Back to presentation",
            (Label::BackLink, "fr") => "← Retour à la présentation",
            (Label::BackLink, "nl") => "← Terug naar de presentatie",

            (Label::MoreInfo, "en") => "More Detailed Information",
            (Label::MoreInfo, "fr") => "Informations détaillées",
            (Label::MoreInfo, "nl") => "Uitgebreide informatie",

            (Label::Colophon, "en") => "Colophon",
            (Label::Colophon, "fr") => "Colophon",
            (Label::Colophon, "nl") => "Colofon",

            _ => return None,
        };
        Some(text)
    }

    fn targets(&self, doc: &impl DocumentView, config: &SiteConfig) -> Vec<NodeId> {
        let labels = &config.labels;
        match self {
            Label::BackLink => doc.query_all(&Selector::class(&labels.back_link_class)),
            Label::MoreInfo => doc.get_by_id(&labels.more_info_id).into_iter().collect(),
            Label::Colophon => doc.get_by_id(&labels.colophon_id).into_iter().collect(),
        }
    }
}

/// Replaces label texts for `lang`; unknown languages leave the text as is.
pub fn plan_labels(doc: &impl DocumentView, config: &SiteConfig, lang: &LangCode) -> Vec<Mutation> {
    let mut mutations = Vec::new();
    for label in Label::all() {
        let Some(text) = label.text(lang.as_str()) else {
            continue;
        };
        mutations.extend(label.targets(doc, config).into_iter().map(|node| Mutation::SetText {
            node,
            text: text.to_string(),
        }));
    }
    mutations
}
