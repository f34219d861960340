/// Tab selection and reloading

use crate::chrome;
use crate::errors::ExtensionError;
use serde::{Deserialize, Serialize};
use url::Url;

/// URL schemes that belong to the browser itself
const INTERNAL_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "chrome-search",
    "devtools",
    "edge",
    "brave",
    "opera",
    "about",
];

/// The parts of a browser tab the extension needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabInfo {
    #[cfg(test)]
    pub fn new(id: i32, url: &str) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
        }
    }
}

/// Which tabs a bulk reload touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadScope {
    /// Every tab, as on browser startup
    All,
    /// Only tabs showing a web page, as when the popup turns blocking on
    WebPages,
}

/// Whether `url` is a browser-internal page (settings, extensions, new tab)
pub fn is_internal_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| INTERNAL_SCHEMES.iter().any(|s| *s == parsed.scheme()))
        .unwrap_or(false)
}

/// Ids of the tabs `scope` selects, in tab order
pub fn tabs_to_reload(tabs: &[TabInfo], scope: ReloadScope) -> Vec<i32> {
    tabs.iter()
        .filter(|tab| match scope {
            ReloadScope::All => true,
            ReloadScope::WebPages => tab
                .url
                .as_deref()
                .is_some_and(|url| !url.is_empty() && !is_internal_url(url)),
        })
        .filter_map(|tab| tab.id)
        .collect()
}

/// Reload the tabs `scope` selects; returns how many reloads were issued
pub async fn reload_tabs(scope: ReloadScope) -> Result<usize, ExtensionError> {
    let tabs = chrome::query_tabs().await?;
    let ids = tabs_to_reload(&tabs, scope);

    for id in &ids {
        chrome::reload_tab(*id);
    }

    log::info!("reloaded {} of {} tabs ({:?})", ids.len(), tabs.len(), scope);
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tabs() -> Vec<TabInfo> {
        vec![
            TabInfo::new(1, "https://www.youtube.com/watch?v=abc"),
            TabInfo::new(2, "chrome://extensions/"),
            TabInfo::new(3, "chrome-extension://abcdef/popup.html"),
            TabInfo::new(4, "https://github.com/rust-lang"),
            TabInfo {
                id: Some(5),
                url: None,
            },
            TabInfo::new(6, "edge://settings"),
            TabInfo {
                id: None,
                url: Some("https://example.com".to_string()),
            },
        ]
    }

    #[test]
    fn test_is_internal_url() {
        assert!(is_internal_url("chrome://newtab/"));
        assert!(is_internal_url("chrome-extension://abcdef/popup.html"));
        assert!(is_internal_url("brave://settings"));
        assert!(is_internal_url("about:blank"));
        assert!(!is_internal_url("https://www.youtube.com/"));
        assert!(!is_internal_url("not a url"));
    }

    #[test]
    fn test_reload_all() {
        assert_eq!(
            tabs_to_reload(&sample_tabs(), ReloadScope::All),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_reload_web_pages_only() {
        assert_eq!(
            tabs_to_reload(&sample_tabs(), ReloadScope::WebPages),
            vec![1, 4]
        );
    }

    #[test]
    fn test_deserialize_bridge_shape() {
        let tabs: Vec<TabInfo> =
            serde_json::from_str(r#"[{"id": 7, "url": null}, {"id": 8, "url": "https://a.b"}]"#)
                .unwrap();

        assert_eq!(tabs[0].url, None);
        assert_eq!(tabs[1], TabInfo::new(8, "https://a.b"));
    }
}
