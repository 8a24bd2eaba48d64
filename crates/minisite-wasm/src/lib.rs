use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlSelectElement};

use shared::{host, LangCode, SiteConfig, SwitchOptions};

mod browser;
mod error;
mod marked;

pub use browser::BrowserHost;
pub use error::SiteError;

/// Global a page may define before loading the module to override defaults
const CONFIG_GLOBAL: &str = "MINISITE_LANG_CONFIG";

thread_local! {
    /// Config the page was booted with, shared by the free functions
    static BOOT_CONFIG: RefCell<Option<Rc<SiteConfig>>> = const { RefCell::new(None) };
}

fn boot_config() -> Rc<SiteConfig> {
    BOOT_CONFIG
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(|| Rc::new(SiteConfig::default()))
}

/// Initialize panic hook and logging, then wire the page
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("minisite language switcher initialized");

    let config = match global_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", CONFIG_GLOBAL, e);
            SiteConfig::default()
        }
    };
    let config = Rc::new(config);
    BOOT_CONFIG.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&config)));
    if let Err(e) = boot(config) {
        tracing::warn!("Language switcher not started: {}", e);
    }
}

fn global_config() -> Result<SiteConfig, SiteError> {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| SiteError::Js(error::describe(&e)))?;
    config_from_js(value)
}

fn config_from_js(value: JsValue) -> Result<SiteConfig, SiteError> {
    if value.is_undefined() || value.is_null() {
        return Ok(SiteConfig::default());
    }
    let config: SiteConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| SiteError::Config(shared::ConfigError::Parse(e.to_string())))?;
    config.validate()?;
    Ok(config)
}

/// `{ updateUrl, updateStorage }`; non-bool values read as unset
fn options_from_js(options: &JsValue) -> SwitchOptions {
    if !options.is_object() {
        return SwitchOptions::default();
    }
    let flag = |name: &str| {
        Reflect::get(options, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_bool())
    };
    SwitchOptions::from_flags(flag("updateUrl"), flag("updateStorage"))
}

/// Runs [`on_ready`] now, or on `DOMContentLoaded` while the page is loading
fn boot(config: Rc<SiteConfig>) -> Result<(), SiteError> {
    let host = BrowserHost::new()?;
    if host.document().ready_state() != "loading" {
        return on_ready(config);
    }

    let ready = Closure::once_into_js(move || {
        if let Err(e) = on_ready(config) {
            tracing::warn!("{}", e);
        }
    });
    host.document()
        .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
        .map_err(|e| SiteError::Js(error::describe(&e)))
}

/// Page-ready sequence, then the dropdown listener
fn on_ready(config: Rc<SiteConfig>) -> Result<(), SiteError> {
    let mut host = BrowserHost::new()?;
    let lang = host::page_ready(&mut host, &config);
    tracing::info!("Language set to '{}'", lang);
    attach_dropdown(&host, config)
}

fn attach_dropdown(host: &BrowserHost, config: Rc<SiteConfig>) -> Result<(), SiteError> {
    let Some(dropdown) = host.document().get_element_by_id(&config.dropdown_id) else {
        return Ok(());
    };

    let on_change = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(value) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| select.value())
        else {
            return;
        };
        match BrowserHost::new() {
            Ok(mut host) => {
                host::set_language(&mut host, &config, &LangCode::from(value), SwitchOptions::default());
            }
            Err(e) => tracing::warn!("{}", e),
        }
    });
    dropdown
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(|e| SiteError::Js(error::describe(&e)))?;
    // lives as long as the page
    on_change.forget();
    Ok(())
}

/// Language switcher bound to one configuration
#[wasm_bindgen]
pub struct LangSwitcher {
    config: Rc<SiteConfig>,
}

#[wasm_bindgen]
impl LangSwitcher {
    /// `config` is a partial config object; `undefined` uses the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<LangSwitcher, JsValue> {
        Ok(Self {
            config: Rc::new(config_from_js(config)?),
        })
    }

    #[wasm_bindgen(js_name = determineLanguage)]
    pub fn determine_language(&self) -> Result<String, JsValue> {
        let host = BrowserHost::new()?;
        Ok(host::determine_language(&host, &self.config).lang.to_string())
    }

    /// Applies `lang` and returns the language actually shown
    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&self, lang: &str, options: JsValue) -> Result<String, JsValue> {
        let mut host = BrowserHost::new()?;
        let plan = host::set_language(
            &mut host,
            &self.config,
            &LangCode::from(lang),
            options_from_js(&options),
        );
        Ok(plan.effective.to_string())
    }

    /// Returns the number of blocks rendered by this call
    #[wasm_bindgen(js_name = renderMarkdown)]
    pub fn render_markdown(&self) -> Result<u32, JsValue> {
        let mut host = BrowserHost::new()?;
        Ok(host::render_markdown(&mut host, &self.config) as u32)
    }

    #[wasm_bindgen(js_name = buildLangAwareUrl)]
    pub fn build_lang_aware_url(&self, base_href: &str, lang: &str) -> String {
        shared::links::append_query_param(base_href, &self.config.query_param, lang)
    }

    /// Runs the page-ready sequence and wires the dropdown
    pub fn attach(&self) -> Result<(), JsValue> {
        boot(Rc::clone(&self.config)).map_err(JsValue::from)
    }
}

#[wasm_bindgen(js_name = determineLanguage)]
pub fn determine_language() -> Result<String, JsValue> {
    LangSwitcher::booted().determine_language()
}

#[wasm_bindgen(js_name = setLanguage)]
pub fn set_language(lang: &str, options: JsValue) -> Result<String, JsValue> {
    LangSwitcher::booted().set_language(lang, options)
}

#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown() -> Result<u32, JsValue> {
    LangSwitcher::booted().render_markdown()
}

#[wasm_bindgen(js_name = buildLangAwareUrl)]
pub fn build_lang_aware_url(base_href: &str, lang: &str) -> String {
    LangSwitcher::booted().build_lang_aware_url(base_href, lang)
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl LangSwitcher {
    /// Switcher sharing the config `init` booted the page with
    fn booted() -> Self {
        Self {
            config: boot_config(),
        }
    }
}
