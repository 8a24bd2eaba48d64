//! Language switching core for the minisite.
//!
//! Everything here is host-independent: planners read a document through
//! [`DocumentView`] and return [`Mutation`] lists plus host effects. The
//! browser binding and the headless [`harness::TestHarness`] both drive the
//! same planners through [`host::SiteHost`].

pub mod config;
pub mod dom;
pub mod fixtures;
pub mod harness;
pub mod host;
pub mod labels;
pub mod lang;
pub mod links;
pub mod location;
pub mod markdown;
pub mod memory;
pub mod resolver;
pub mod switcher;
pub mod view;

pub use config::{ConfigError, SiteConfig, SwitchOptions};
pub use dom::{Display, DocumentMut, DocumentView, Mutation, NodeId, Selector};
pub use host::SiteHost;
pub use lang::{LangCode, DEFAULT_LANG, SUPPORTED_LANGS};
pub use links::build_lang_aware_url;
pub use markdown::{dedent, dedent_lines, MarkdownConverter};
pub use resolver::{resolve_language, LangSource, ResolveInput, Resolved};
pub use switcher::{plan_switch, SwitchPlan};
pub use view::{plan_view, ViewCategory, ViewDescriptor, ViewPlan, ViewRule};
