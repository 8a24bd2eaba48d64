//! Full language change: view, labels, links, persistence and URL

use tracing::debug;

use crate::config::{SiteConfig, SwitchOptions};
use crate::dom::{DocumentView, Mutation};
use crate::labels::plan_labels;
use crate::lang::LangCode;
use crate::links::plan_links;
use crate::location::with_query_param;
use crate::view::plan_view;

/// Everything one language change does, in application order
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchPlan {
    pub requested: LangCode,
    pub effective: LangCode,
    pub mutations: Vec<Mutation>,
    /// Value to write to the preference record
    pub persist: Option<LangCode>,
    /// New location for `history.replaceState`
    pub replace_url: Option<String>,
}

/// Plans a language change against the current document and location.
///
/// Labels, persistence, links and the URL all use the effective language,
/// i.e. the default language when the content panels fell back.
pub fn plan_switch(
    doc: &impl DocumentView,
    config: &SiteConfig,
    lang: &LangCode,
    options: SwitchOptions,
    location_href: &str,
) -> SwitchPlan {
    let view = plan_view(doc, config, lang);
    let effective = view.effective.clone();

    let mut mutations = view.mutations;
    mutations.extend(plan_labels(doc, config, &effective));
    mutations.extend(plan_links(doc, config, &effective));

    let persist = options.update_storage.then(|| effective.clone());

    let replace_url = if options.update_url {
        let url = with_query_param(location_href, &config.query_param, effective.as_str());
        if url.is_none() {
            debug!("Location '{}' is not an absolute URL, not rewriting", location_href);
        }
        url
    } else {
        None
    };

    SwitchPlan {
        requested: view.requested,
        effective,
        mutations,
        persist,
        replace_url,
    }
}
