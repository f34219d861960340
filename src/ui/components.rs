/// Toggle button and status line of the popup

use yew::prelude::*;

/// Everything the popup shows, derived from the enable flag alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleView {
    pub enabled: bool,
}

impl ToggleView {
    pub fn new(enabled: bool) -> Self {
        ToggleView { enabled }
    }

    /// The button names the action a click performs
    pub fn button_label(&self) -> &'static str {
        if self.enabled { "STOP" } else { "START" }
    }

    pub fn button_class(&self) -> Classes {
        if self.enabled { classes!("toggle-btn", "stop") } else { classes!("toggle-btn") }
    }

    pub fn status_word(&self) -> &'static str {
        if self.enabled { "ACTIVE" } else { "INACTIVE" }
    }

    pub fn status_class(&self) -> &'static str {
        if self.enabled { "status-on" } else { "status-off" }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToggleButtonProps {
    pub view: ToggleView,
    pub onclick: Callback<MouseEvent>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(ToggleButton)]
pub fn toggle_button(props: &ToggleButtonProps) -> Html {
    html! {
        <button
            id="toggleBtn"
            class={props.view.button_class()}
            onclick={props.onclick.clone()}
            disabled={props.disabled}
        >
            {props.view.button_label()}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub view: ToggleView,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    html! {
        <p id="status">
            {"Blocking is "}
            <span class={props.view.status_class()}>{props.view.status_word()}</span>
        </p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_view() {
        let view = ToggleView::new(true);

        assert_eq!(view.button_label(), "STOP");
        assert!(view.button_class().contains("stop"));
        assert_eq!(view.status_word(), "ACTIVE");
        assert_eq!(view.status_class(), "status-on");
    }

    #[test]
    fn test_disabled_view() {
        let view = ToggleView::new(false);

        assert_eq!(view.button_label(), "START");
        assert!(!view.button_class().contains("stop"));
        assert_eq!(view.status_word(), "INACTIVE");
        assert_eq!(view.status_class(), "status-off");
    }
}
