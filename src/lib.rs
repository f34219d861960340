/// Chomper - Chrome Extension that strips ads from video pages
/// Built with Rust + WASM + Yew

mod background;
mod chrome;
mod config;
mod content;
mod errors;
mod page;
mod scanner;
mod selectors;
mod settings;
mod tabs;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the internal-page check for JavaScript access
#[wasm_bindgen]
pub fn is_internal_url(url: &str) -> bool {
    tabs::is_internal_url(url)
}

// Install lifecycle hooks in the background service worker
#[wasm_bindgen]
pub fn start_background() {
    background::install_listeners();
}

// Start scanning the current page
#[wasm_bindgen]
pub fn start_content() {
    content::boot();
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
