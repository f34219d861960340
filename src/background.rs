/// Background service worker: install and startup hooks

use crate::chrome;
use crate::errors::ExtensionError;
use crate::settings::{self, Settings};
use crate::tabs::{self, ReloadScope};
use wasm_bindgen_futures::spawn_local;

/// Register the lifecycle listeners
pub fn install_listeners() {
    chrome::on_installed(|| {
        spawn_local(async {
            if let Err(e) = handle_installed().await {
                log::error!("install hook failed: {}", e);
            }
        });
    });

    chrome::on_startup(|| {
        spawn_local(async {
            if let Err(e) = handle_startup().await {
                log::error!("startup hook failed: {}", e);
            }
        });
    });
}

/// Fresh install or update: blocking is on, whatever was stored before
async fn handle_installed() -> Result<(), ExtensionError> {
    settings::store(Settings::new(true)).await?;
    log::info!("installed, blocking enabled");
    Ok(())
}

/// Browser start: reload open tabs so the content script attaches everywhere
async fn handle_startup() -> Result<(), ExtensionError> {
    let settings = settings::load().await?;
    if !settings.enabled {
        log::info!("startup with blocking disabled, leaving tabs alone");
        return Ok(());
    }

    tabs::reload_tabs(ReloadScope::All).await?;
    Ok(())
}
