//! View switching: which language-keyed elements are visible.
//!
//! The page is described declaratively by a [`ViewDescriptor`]. Switching
//! hides every member of every rule first and only then shows the matches,
//! so the outcome depends on the requested language alone and never on what
//! was visible before.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SiteConfig;
use crate::dom::{Display, DocumentView, Mutation, NodeId, Selector};
use crate::lang::LangCode;

/// Kind of language-keyed element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewCategory {
    /// Full page content for one language
    Panel,
    /// Smaller per-language notice
    Banner,
    /// Inline element tagged by attribute
    Block,
}

/// How the elements for a given language are found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShowRule {
    /// Single element with id `<prefix><lang>`
    IdPrefix { prefix: String },
    /// Every element with `name="<lang>"`
    AttrEquals { name: String },
}

impl ShowRule {
    fn matches(&self, doc: &impl DocumentView, lang: &LangCode) -> Vec<NodeId> {
        match self {
            ShowRule::IdPrefix { prefix } => doc
                .get_by_id(&format!("{}{}", prefix, lang))
                .into_iter()
                .collect(),
            ShowRule::AttrEquals { name } => {
                doc.query_all(&Selector::attr_equals(name, lang.as_str()))
            }
        }
    }
}

/// One category of language-keyed elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRule {
    pub category: ViewCategory,
    /// Everything hidden before showing
    pub members: Selector,
    pub show: ShowRule,
    /// Display value written to shown elements
    pub shown: Display,
    /// Substitute the default language when the page has members of this
    /// rule but none for the requested language
    #[serde(default)]
    pub fallback: bool,
}

/// Declarative list of view rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewDescriptor {
    pub rules: Vec<ViewRule>,
}

impl Default for ViewDescriptor {
    fn default() -> Self {
        Self {
            rules: vec![
                ViewRule {
                    category: ViewCategory::Panel,
                    members: Selector::class("lang-content"),
                    show: ShowRule::IdPrefix {
                        prefix: "content-".to_string(),
                    },
                    shown: Display::Block,
                    fallback: true,
                },
                ViewRule {
                    category: ViewCategory::Banner,
                    members: Selector::class("lang-banner"),
                    show: ShowRule::IdPrefix {
                        prefix: "banner-".to_string(),
                    },
                    shown: Display::Block,
                    fallback: false,
                },
                ViewRule {
                    category: ViewCategory::Block,
                    members: Selector::has_attr("data-lang-block"),
                    show: ShowRule::AttrEquals {
                        name: "data-lang-block".to_string(),
                    },
                    shown: Display::Default,
                    fallback: false,
                },
            ],
        }
    }
}

/// Result of planning a view update
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPlan {
    pub requested: LangCode,
    /// `requested`, or the default language when a fallback rule kicked in
    pub effective: LangCode,
    pub mutations: Vec<Mutation>,
}

impl ViewPlan {
    pub fn fell_back(&self) -> bool {
        self.requested != self.effective
    }
}

/// Plans the visibility update for `lang`.
///
/// Only fallback rules (the content panels by default) use the substituted
/// language. Banners and tagged blocks are shown for the requested language
/// even after a fallback, so an unknown code shows the default panel with no
/// banner. The dropdown, if present, mirrors the effective language.
pub fn plan_view(doc: &impl DocumentView, config: &SiteConfig, lang: &LangCode) -> ViewPlan {
    let rules = &config.view.rules;
    let mut mutations = Vec::new();

    let members: Vec<Vec<NodeId>> = rules.iter().map(|r| doc.query_all(&r.members)).collect();
    for nodes in &members {
        mutations.extend(nodes.iter().map(|&node| Mutation::SetDisplay {
            node,
            display: Display::Hidden,
        }));
    }

    let mut effective = lang.clone();
    for (rule, nodes) in rules.iter().zip(&members) {
        let mut shown = rule.show.matches(doc, lang);
        if rule.fallback && !nodes.is_empty() && shown.is_empty() {
            debug!(
                "No {:?} for '{}', falling back to '{}'",
                rule.category, lang, config.default_lang
            );
            effective = config.default_lang.clone();
            shown = rule.show.matches(doc, &effective);
        }
        mutations.extend(shown.into_iter().map(|node| Mutation::SetDisplay {
            node,
            display: rule.shown,
        }));
    }

    if let Some(node) = doc.get_by_id(&config.dropdown_id) {
        mutations.push(Mutation::SetValue {
            node,
            value: effective.to_string(),
        });
    }

    ViewPlan {
        requested: lang.clone(),
        effective,
        mutations,
    }
}
