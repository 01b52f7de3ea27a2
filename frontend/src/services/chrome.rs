//! Thin bindings over the `chrome.*` extension APIs the widget and popup use.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = get)]
    async fn storage_sync_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = set)]
    async fn storage_sync_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    async fn tabs_query(query_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    async fn tabs_send_message(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn runtime_on_message_add_listener(
        callback: &Closure<dyn FnMut(JsValue, JsValue, js_sys::Function) -> bool>,
    );
}

/// Listener signature for `chrome.runtime.onMessage`: (message, sender, sendResponse)
pub type MessageListener = Closure<dyn FnMut(JsValue, JsValue, js_sys::Function) -> bool>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveTabQuery {
    active: bool,
    last_focused_window: bool,
}

#[derive(serde::Deserialize)]
struct Tab {
    id: Option<i32>,
}

pub(crate) fn js_error(context: &str, err: JsValue) -> anyhow::Error {
    let detail = err
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| "unknown error".to_string());
    anyhow!("{}: {}", context, detail)
}

/// Serialize through JSON so serde attributes decide the JS shape
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(|e| js_error("JSON.parse failed", e))
}

pub fn stringify(value: &JsValue) -> Result<String> {
    js_sys::JSON::stringify(value)
        .map_err(|e| js_error("JSON.stringify failed", e))?
        .as_string()
        .ok_or_else(|| anyhow!("value has no JSON representation"))
}

pub fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
    Ok(serde_json::from_str(&stringify(value)?)?)
}

pub async fn storage_get<T: DeserializeOwned>(keys: &[&str]) -> Result<T> {
    let keys = to_js(&keys)?;
    let items = storage_sync_get(keys)
        .await
        .map_err(|e| js_error("chrome.storage.sync.get failed", e))?;
    from_js(&items)
}

pub async fn storage_set(items: &serde_json::Value) -> Result<()> {
    storage_sync_set(to_js(items)?)
        .await
        .map_err(|e| js_error("chrome.storage.sync.set failed", e))?;
    Ok(())
}

/// Id of the tab the popup was opened over, if any
pub async fn active_tab_id() -> Result<Option<i32>> {
    let query = to_js(&ActiveTabQuery { active: true, last_focused_window: true })?;
    let tabs = tabs_query(query)
        .await
        .map_err(|e| js_error("chrome.tabs.query failed", e))?;
    let tabs: Vec<Tab> = from_js(&tabs)?;
    Ok(tabs.into_iter().next().and_then(|tab| tab.id))
}

/// Send a message to the content script in `tab_id`; `None` when nobody answered
pub async fn send_tab_message<M: Serialize, R: DeserializeOwned>(
    tab_id: i32,
    message: &M,
) -> Result<Option<R>> {
    let response = tabs_send_message(tab_id, to_js(message)?)
        .await
        .map_err(|e| js_error("chrome.tabs.sendMessage failed", e))?;
    if response.is_undefined() || response.is_null() {
        return Ok(None);
    }
    Ok(Some(from_js(&response)?))
}

pub fn add_message_listener(listener: &MessageListener) {
    runtime_on_message_add_listener(listener);
}
