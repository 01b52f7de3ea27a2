//! Popup ⇄ page messaging for settings changes.

use anyhow::Result;
use shared::{SettingsMessage, SettingsResponse};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

use super::chrome::{self, MessageListener};
use super::logging::Logger;
use super::settings_store;

const COMPONENT: &str = "settings-channel";

/// Page-side receiver for settings messages.
///
/// `install` registers the `chrome.runtime.onMessage` handler the first time
/// it is called and does nothing afterwards. The registered closure lives as
/// long as this value.
#[derive(Default)]
pub struct SettingsListener {
    installed: Cell<bool>,
    listener: RefCell<Option<MessageListener>>,
}

impl SettingsListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_installed(&self) -> bool {
        self.installed.get()
    }

    /// Returns false when a handler was already registered
    pub fn install(&self, on_message: Callback<SettingsMessage>) -> bool {
        if self.installed.replace(true) {
            return false;
        }

        let listener: MessageListener = Closure::wrap(Box::new(
            move |message: JsValue, _sender: JsValue, send_response: js_sys::Function| {
                handle_message(&message, &on_message, &send_response);
                false
            },
        )
            as Box<dyn FnMut(JsValue, JsValue, js_sys::Function) -> bool>);

        chrome::add_message_listener(&listener);
        self.listener.replace(Some(listener));
        Logger::info_with_component(COMPONENT, "settings listener installed");
        true
    }
}

/// Apply, persist and acknowledge one incoming message.
///
/// Messages that do not decode are logged and left unanswered.
pub(crate) fn handle_message(
    raw: &JsValue,
    on_message: &Callback<SettingsMessage>,
    send_response: &js_sys::Function,
) -> Option<SettingsMessage> {
    let message = match chrome::stringify(raw).and_then(|text| Ok(SettingsMessage::from_json(&text)?)) {
        Ok(message) => message,
        Err(e) => {
            Logger::warn_with_component(COMPONENT, &format!("not captured message: {}", e));
            return None;
        }
    };

    on_message.emit(message);

    spawn_local(async move {
        if let Err(e) = settings_store::persist(&message).await {
            Logger::error_with_component(COMPONENT, &format!("could not persist {}: {}", message.storage_key(), e));
        }
    });

    if let Err(e) = acknowledge(send_response) {
        Logger::warn_with_component(COMPONENT, &format!("could not reply to popup: {}", e));
    }
    Some(message)
}

fn acknowledge(send_response: &js_sys::Function) -> Result<()> {
    let response = chrome::to_js(&SettingsResponse::ok())?;
    send_response
        .call1(&JsValue::NULL, &response)
        .map_err(|e| chrome::js_error("sendResponse threw", e))?;
    Ok(())
}

/// Send a settings change to the content script of the active tab.
///
/// `Ok(None)` means there was no tab or nobody answered.
pub async fn send_to_active_tab(message: SettingsMessage) -> Result<Option<SettingsResponse>> {
    let Some(tab_id) = chrome::active_tab_id().await? else {
        Logger::warn_with_component(COMPONENT, "no active tab to notify");
        return Ok(None);
    };
    chrome::send_tab_message(tab_id, &message).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn recorder() -> (Callback<SettingsMessage>, Rc<RefCell<Vec<SettingsMessage>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let callback = {
            let seen = seen.clone();
            Callback::from(move |message| seen.borrow_mut().push(message))
        };
        (callback, seen)
    }

    fn response_sink() -> js_sys::Function {
        js_sys::Function::new_with_args("response", "globalThis.__settingsResponse = JSON.stringify(response);")
    }

    fn last_response() -> Option<String> {
        js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("__settingsResponse"))
            .ok()
            .and_then(|value| value.as_string())
    }

    #[wasm_bindgen_test]
    fn test_valid_message_is_applied_and_acknowledged() {
        let (callback, seen) = recorder();
        let raw = js_sys::JSON::parse(r#"{"type":"HOURS_PER_DAY_UPDATED","value":"6"}"#).unwrap();

        let handled = handle_message(&raw, &callback, &response_sink());

        assert_eq!(handled, Some(SettingsMessage::HoursPerDayUpdated(6)));
        assert_eq!(*seen.borrow(), vec![SettingsMessage::HoursPerDayUpdated(6)]);
        assert_eq!(last_response().as_deref(), Some(r#"{"responseCode":200}"#));
    }

    #[wasm_bindgen_test]
    fn test_unknown_message_is_ignored() {
        let (callback, seen) = recorder();
        let raw = js_sys::JSON::parse(r#"{"type":"PING"}"#).unwrap();

        assert_eq!(handle_message(&raw, &callback, &response_sink()), None);
        assert!(seen.borrow().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_listener_installs_once() {
        js_sys::eval(
            "globalThis.__listenerCount = 0; \
             globalThis.chrome = { runtime: { onMessage: { addListener: function () { globalThis.__listenerCount += 1; } } } };",
        )
        .unwrap();

        let listener = SettingsListener::new();
        assert!(!listener.is_installed());
        assert!(listener.install(Callback::noop()));
        assert!(!listener.install(Callback::noop()));
        assert!(listener.is_installed());

        let count = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("__listenerCount")).unwrap();
        assert_eq!(count.as_f64(), Some(1.0));
    }
}
