//! Integration tests for the headless page harness.
//!
//! Drives full page lifecycles: load, dropdown changes and direct calls.

use shared::fixtures::{blocks_only_page, detail_page};
use shared::harness::TestHarness;
use shared::{LangSource, Selector, SiteConfig, SwitchOptions, SUPPORTED_LANGS};

fn panels(h: &TestHarness) -> Vec<String> {
    h.visible_ids(&Selector::class("lang-content"))
}

fn banners(h: &TestHarness) -> Vec<String> {
    h.visible_ids(&Selector::class("lang-banner"))
}

#[test]
fn test_load_uses_query_parameter() {
    let mut h = TestHarness::new(detail_page())
        .with_location("https://minisite.test/index.html?lang=nl")
        .with_stored("fr")
        .with_locale("fr-FR");
    let lang = h.load();

    assert_eq!(lang.as_str(), "nl");
    assert_eq!(panels(&h), vec!["content-nl"]);
    assert_eq!(banners(&h), vec!["banner-nl"]);
    assert_eq!(h.visible_blocks(), vec!["nl"]);
    assert_eq!(h.stored(), Some("nl"));
    assert_eq!(h.dropdown_value(), Some("nl"));
}

#[test]
fn test_load_uses_stored_then_locale_then_default() {
    let h = TestHarness::new(detail_page())
        .with_stored("fr")
        .with_locale("nl-BE");
    assert_eq!(h.determine_language().source, LangSource::Stored);

    let mut h = TestHarness::new(detail_page()).with_locale("nl-BE");
    assert_eq!(h.load().as_str(), "nl");
    assert_eq!(h.location(), "https://minisite.test/index.html?lang=nl");

    let mut h = TestHarness::new(detail_page()).with_locale("de-DE");
    assert_eq!(h.load().as_str(), "en");
    assert_eq!(h.stored(), Some("en"));
}

#[test]
fn test_every_language_shows_exactly_its_content() {
    for lang in SUPPORTED_LANGS {
        let mut h = TestHarness::new(detail_page());
        h.set_language(lang, SwitchOptions::default());

        assert_eq!(panels(&h), vec![format!("content-{}", lang)]);
        assert_eq!(banners(&h), vec![format!("banner-{}", lang)]);
        assert_eq!(h.visible_blocks(), vec![lang.to_string()]);
    }
}

#[test]
fn test_dropdown_change_syncs_storage_and_url() {
    let mut h = TestHarness::new(detail_page());
    h.load();
    assert_eq!(h.stored(), Some("en"));

    h.select("fr").unwrap();
    assert_eq!(h.stored(), Some("fr"));
    assert_eq!(h.location(), "https://minisite.test/index.html?lang=fr");

    h.select("nl").unwrap();
    assert_eq!(h.stored(), Some("nl"));
    assert_eq!(h.location(), "https://minisite.test/index.html?lang=nl");
    assert_eq!(panels(&h), vec!["content-nl"]);
    assert_eq!(h.history().len(), 3);
}

#[test]
fn test_update_url_false_keeps_location() {
    let mut h = TestHarness::new(detail_page()).with_location("https://minisite.test/p.html?x=1");
    h.set_language(
        "fr",
        SwitchOptions {
            update_url: false,
            update_storage: true,
        },
    );

    assert_eq!(h.location(), "https://minisite.test/p.html?x=1");
    assert!(h.history().is_empty());
    assert_eq!(h.stored(), Some("fr"));
    assert_eq!(panels(&h), vec!["content-fr"]);
}

#[test]
fn test_update_storage_false_keeps_preference() {
    let mut h = TestHarness::new(detail_page()).with_stored("nl");
    h.set_language(
        "fr",
        SwitchOptions {
            update_url: true,
            update_storage: false,
        },
    );
    assert_eq!(h.stored(), Some("nl"));
    assert_eq!(h.location(), "https://minisite.test/index.html?lang=fr");
}

#[test]
fn test_links_and_labels_follow_language() {
    let mut h = TestHarness::new(detail_page());
    h.set_language("fr", SwitchOptions::default());
    h.set_language("nl", SwitchOptions::default());

    let more = h.element("more-info-link").unwrap();
    assert_eq!(more.attribute("href").as_deref(), Some("details.html?lang=nl"));
    assert_eq!(more.text, "Uitgebreide informatie");

    let colophon = h.element("colophon-link").unwrap();
    assert_eq!(colophon.attribute("href").as_deref(), Some("colophon.html?v=2&lang=nl"));
    assert_eq!(colophon.text, "Colofon");

    let back: Vec<&str> = h
        .document
        .visible(&Selector::class("back-link"))
        .into_iter()
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(back, vec!["← Terug naar de presentatie"; 2]);
}

#[test]
fn test_unknown_language_falls_back_to_english_panel() {
    let mut h = TestHarness::new(detail_page()).with_location("https://minisite.test/?lang=de");
    let lang = h.load();

    assert_eq!(lang.as_str(), "en");
    assert_eq!(panels(&h), vec!["content-en"]);
    // no banner-de or de block exists, and no fallback applies to them
    assert!(banners(&h).is_empty());
    assert!(h.visible_blocks().is_empty());
    assert_eq!(h.dropdown_value(), Some("en"));
    assert_eq!(h.stored(), Some("en"));
    assert_eq!(h.location(), "https://minisite.test/?lang=en");
    assert_eq!(h.element("more-info-link").unwrap().text, "More Detailed Information");
}

#[test]
fn test_unknown_language_without_panels_shows_nothing() {
    let mut h = TestHarness::new(blocks_only_page());
    let plan = h.set_language("de", SwitchOptions::view_only());

    assert_eq!(plan.effective.as_str(), "de");
    assert!(h.visible_blocks().is_empty());
}

#[test]
fn test_select_without_dropdown() {
    let mut h = TestHarness::new(blocks_only_page());
    assert!(h.select("fr").is_none());
    assert!(h.stored().is_none());
}

#[test]
fn test_rapid_changes_apply_in_order() {
    let mut h = TestHarness::new(detail_page());
    h.load();
    for lang in ["fr", "nl", "en", "fr"] {
        h.select(lang).unwrap();
    }
    assert_eq!(panels(&h), vec!["content-fr"]);
    assert_eq!(banners(&h), vec!["banner-fr"]);
    assert_eq!(h.visible_blocks(), vec!["fr"]);
    assert_eq!(
        h.element("more-info-link").unwrap().attribute("href").as_deref(),
        Some("details.html?lang=fr")
    );
}

#[test]
fn test_repeated_calls_share_custom_storage_key() {
    let config = SiteConfig {
        storage_key: "siteLang".to_string(),
        ..SiteConfig::default()
    };
    let mut h = TestHarness::new(detail_page()).with_config(config.clone());
    let storage_only = SwitchOptions {
        update_url: false,
        update_storage: true,
    };

    h.set_language("fr", storage_only);
    h.set_language("nl", storage_only);
    assert_eq!(h.storage_value("siteLang"), Some("nl"));
    assert_eq!(h.storage_value("preferredLanguage"), None);

    let resolved = h.determine_language();
    assert_eq!(resolved.lang.as_str(), "nl");
    assert_eq!(resolved.source, LangSource::Stored);

    let h = TestHarness::new(detail_page())
        .with_config(config)
        .with_stored("fr");
    assert_eq!(h.storage_value("siteLang"), Some("fr"));
    assert_eq!(h.determine_language().source, LangSource::Stored);
}
