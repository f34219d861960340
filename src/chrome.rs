/// Typed wrappers over the `chrome.*` extension APIs exposed by bridge.js

use crate::errors::ExtensionError;
use crate::tabs::TabInfo;
use js_sys::Array;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(keys: Array) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(items: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    fn reloadTab(tab_id: i32);

    fn onInstalled(callback: &js_sys::Function);

    fn onStartup(callback: &js_sys::Function);

    fn onStorageChanged(callback: &js_sys::Function);
}

/// `chrome.storage.local.get(keys)`
pub async fn get_storage(keys: &[&str]) -> Result<JsValue, ExtensionError> {
    let keys: Array = keys.iter().map(|k| JsValue::from_str(k)).collect();
    getStorage(keys).await.map_err(ExtensionError::storage)
}

/// `chrome.storage.local.set(items)`
pub async fn set_storage(items: JsValue) -> Result<(), ExtensionError> {
    setStorage(items).await.map_err(ExtensionError::storage)
}

/// Every tab in every window
pub async fn query_tabs() -> Result<Vec<TabInfo>, ExtensionError> {
    let tabs_js = queryTabs().await.map_err(ExtensionError::tabs)?;
    serde_wasm_bindgen::from_value(tabs_js).map_err(|e| ExtensionError::decode("tabs", e))
}

/// Fire-and-forget `chrome.tabs.reload`
pub fn reload_tab(tab_id: i32) {
    reloadTab(tab_id);
}

/// Register a `runtime.onInstalled` listener for the life of the context
pub fn on_installed(callback: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(callback);
    onInstalled(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Register a `runtime.onStartup` listener for the life of the context
pub fn on_startup(callback: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(callback);
    onStartup(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Register a `storage.onChanged` listener; receives `(changes, areaName)`
pub fn on_storage_changed(callback: impl FnMut(JsValue, String) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue, String)>::new(callback);
    onStorageChanged(closure.as_ref().unchecked_ref());
    closure.forget();
}
