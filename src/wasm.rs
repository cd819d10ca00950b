//! WebAssembly bindings: the background page drives a `DezoomifyBackground`
//! from its `chrome.*` event listeners, and host calls go straight back to
//! the `chrome.*` APIs.

use wasm_bindgen::prelude::*;

use crate::dispatcher::Background;
use crate::host::BrowserHost;
use crate::models::{IconSet, MenuAction, ObservedRequest, ResourceType, Tab, TabId};
use crate::parser::{manifest::parse_manifest_from_str, parse_options};
use crate::Options;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "browserAction"], js_name = setBadgeText)]
    fn browser_action_set_badge_text(details: &JsValue);

    #[wasm_bindgen(js_namespace = ["chrome", "browserAction"], js_name = setTitle)]
    fn browser_action_set_title(details: &JsValue);

    #[wasm_bindgen(js_namespace = ["chrome", "browserAction"], js_name = setIcon)]
    fn browser_action_set_icon(details: &JsValue);

    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = create)]
    fn tabs_create(properties: &JsValue);

    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = reload)]
    fn tabs_reload(tab_id: f64);

    #[wasm_bindgen(js_namespace = ["chrome", "contextMenus"], js_name = removeAll)]
    fn context_menus_remove_all();

    #[wasm_bindgen(js_namespace = ["chrome", "contextMenus"], js_name = create)]
    fn context_menus_create(properties: &JsValue);
}

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format_args!($($t)*).to_string())))
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Turn a JSON value into the plain JS object the extension APIs expect
fn to_js(value: serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

fn to_tab_id(tab_id: f64) -> TabId {
    tab_id as TabId
}

fn rejected(what: &str, error: impl std::fmt::Display) -> JsValue {
    tracing::warn!(what, %error, "host event rejected");
    console_log!("dezoomify: {} rejected: {}", what, error);
    JsValue::from_str(&format!("{}: {}", what, error))
}

struct ChromeHost;

impl BrowserHost for ChromeHost {
    fn set_badge_text(&mut self, tab_id: TabId, text: &str) {
        browser_action_set_badge_text(&to_js(serde_json::json!({ "tabId": tab_id, "text": text })));
    }

    fn set_title(&mut self, tab_id: TabId, title: &str) {
        browser_action_set_title(&to_js(serde_json::json!({ "tabId": tab_id, "title": title })));
    }

    fn set_icon(&mut self, tab_id: TabId, icon: &IconSet) {
        browser_action_set_icon(&to_js(serde_json::json!({ "tabId": tab_id, "path": icon })));
    }

    fn create_tab(&mut self, url: &str, active: bool) {
        tabs_create(&to_js(serde_json::json!({ "url": url, "active": active })));
    }

    fn reload_tab(&mut self, tab_id: TabId) {
        tabs_reload(tab_id as f64);
    }

    fn remove_all_menus(&mut self) {
        context_menus_remove_all();
    }

    fn create_menu_item(&mut self, action: MenuAction) {
        context_menus_create(&to_js(serde_json::json!({
            "id": action.id(),
            "title": action.title(),
            "contexts": ["browser_action"],
        })));
    }
}

#[wasm_bindgen]
pub struct DezoomifyBackground {
    inner: Background<ChromeHost>,
}

#[wasm_bindgen]
impl DezoomifyBackground {
    /// `manifest_json` is `JSON.stringify(chrome.runtime.getManifest())`
    #[wasm_bindgen(constructor)]
    pub fn new(manifest_json: &str, options_json: Option<String>) -> Result<DezoomifyBackground, JsValue> {
        let manifest = parse_manifest_from_str(manifest_json)
            .map_err(|e| rejected("manifest", format!("{:#}", e)))?;
        let options = match options_json {
            Some(json) => parse_options(&json).map_err(|e| rejected("options", format!("{:#}", e)))?,
            None => Options::default(),
        };
        let inner = Background::new(ChromeHost, manifest, options)
            .map_err(|e| rejected("manifest", e))?;
        Ok(DezoomifyBackground { inner })
    }

    /// Resource types to pass in the `webRequest.onBeforeRequest` filter
    #[wasm_bindgen(js_name = requestFilterTypes)]
    pub fn request_filter_types() -> js_sys::Array {
        ResourceType::ALL
            .iter()
            .map(|t| JsValue::from_str(t.as_str()))
            .collect()
    }

    #[wasm_bindgen(js_name = statusRefreshMs)]
    pub fn status_refresh_ms(&self) -> f64 {
        self.inner.options().status_refresh_ms as f64
    }

    #[wasm_bindgen(js_name = installMenu)]
    pub fn install_menu(&mut self) {
        self.inner.install_menu();
    }

    #[wasm_bindgen(js_name = onClicked)]
    pub fn on_clicked(&mut self, tab_id: Option<f64>, url: Option<String>, now: f64) -> Result<(), JsValue> {
        let tab = Tab { id: tab_id.map(to_tab_id), url };
        self.inner
            .on_icon_clicked(&tab, now)
            .map(|_| ())
            .map_err(|e| rejected("click", e))
    }

    #[wasm_bindgen(js_name = onBeforeRequest)]
    pub fn on_before_request(
        &mut self,
        tab_id: f64,
        url: String,
        time_stamp: f64,
        document_url: Option<String>,
        resource_type: Option<String>,
    ) -> Result<bool, JsValue> {
        let resource_type = match resource_type.as_deref().map(ResourceType::from_name) {
            Some(None) => return Ok(false),
            Some(known) => known,
            None => None,
        };
        let request = ObservedRequest {
            url,
            tab_id: to_tab_id(tab_id),
            time_stamp,
            document_url,
            resource_type,
        };
        self.inner.on_request(&request).map_err(|e| rejected("request", e))
    }

    /// Only top-frame navigations (`frameId == 0`) evict found images
    #[wasm_bindgen(js_name = onBeforeNavigate)]
    pub fn on_before_navigate(&mut self, tab_id: f64, frame_id: f64, url: String, time_stamp: f64) -> Result<(), JsValue> {
        if frame_id != 0.0 {
            return Ok(());
        }
        self.inner
            .on_navigation(to_tab_id(tab_id), &url, time_stamp)
            .map_err(|e| rejected("navigation", e))
    }

    #[wasm_bindgen(js_name = onRemoved)]
    pub fn on_removed(&mut self, tab_id: f64) {
        self.inner.on_tab_removed(to_tab_id(tab_id));
    }

    #[wasm_bindgen(js_name = onMenuClicked)]
    pub fn on_menu_clicked(&mut self, menu_item_id: &str, tab_id: Option<f64>, url: Option<String>) -> Result<(), JsValue> {
        let action = MenuAction::from_id(menu_item_id).map_err(|e| rejected("menu", e))?;
        let tab = Tab { id: tab_id.map(to_tab_id), url };
        self.inner
            .on_menu_clicked(action, &tab)
            .map_err(|e| rejected("menu", e))
    }

    pub fn tick(&mut self) -> Result<(), JsValue> {
        self.inner.tick().map_err(|e| rejected("status refresh", e))
    }
}
