/// Popup UI: a single toggle for the enable flag

use crate::errors::ExtensionError;
use crate::settings::{self, Settings};
use crate::tabs::{self, ReloadScope};
use crate::ui::components::{StatusLine, ToggleButton, ToggleView};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Ready(bool),
    Saving(bool),
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);

    // Read the flag on open
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match settings::load().await {
                    Ok(stored) => state.set(PopupState::Ready(stored.enabled)),
                    Err(e) => {
                        log::error!("{}", e);
                        state.set(PopupState::Error(format!("Failed to read state: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_toggle = {
        let state = state.clone();

        Callback::from(move |_| {
            let state = state.clone();
            if let PopupState::Ready(enabled) = *state {
                state.set(PopupState::Saving(enabled));
            }

            spawn_local(async move {
                match toggle_enabled().await {
                    Ok(next) => {
                        state.set(PopupState::Ready(next.enabled));
                        if let Some(scope) = reload_after_toggle(next) {
                            if let Err(e) = tabs::reload_tabs(scope).await {
                                log::warn!("{}", e);
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        state.set(PopupState::Error(format!("Failed to toggle: {}", e)));
                    }
                }
            });
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Chomper"}</h1>

            {match &*state {
                PopupState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                PopupState::Ready(enabled) | PopupState::Saving(enabled) => {
                    let view = ToggleView::new(*enabled);
                    let busy = matches!(*state, PopupState::Saving(_));
                    html! {
                        <div class="flex-column-gap">
                            <ToggleButton view={view} onclick={on_toggle} disabled={busy} />
                            <StatusLine view={view} />
                        </div>
                    }
                },
                PopupState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
            }}

            <p class="footer-popup">
                {"Chomper Ad Blocker v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

/// Invert and persist the stored flag, returning the new settings
async fn toggle_enabled() -> Result<Settings, ExtensionError> {
    let next = settings::load().await?.toggled();
    settings::store(next).await?;
    log::info!("blocking {}", if next.enabled { "enabled" } else { "disabled" });
    Ok(next)
}

/// Tabs to reload once a toggle has been stored; turning off reloads nothing
fn reload_after_toggle(next: Settings) -> Option<ReloadScope> {
    next.enabled.then_some(ReloadScope::WebPages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turning_on_reloads_web_pages() {
        let next = Settings::new(false).toggled();
        assert_eq!(reload_after_toggle(next), Some(ReloadScope::WebPages));
    }

    #[test]
    fn test_turning_off_reloads_nothing() {
        let next = Settings::new(true).toggled();
        assert_eq!(reload_after_toggle(next), None);
    }
}
