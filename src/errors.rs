/// Error type shared by the extension's bridge calls
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("browser global `{0}` is not available in this context")]
    MissingGlobal(&'static str),

    #[error("storage request failed: {0}")]
    Storage(String),

    #[error("tab request failed: {0}")]
    Tabs(String),

    #[error("failed to decode {what}: {detail}")]
    Decode { what: &'static str, detail: String },

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl ExtensionError {
    pub fn storage(err: JsValue) -> Self {
        ExtensionError::Storage(describe(&err))
    }

    pub fn tabs(err: JsValue) -> Self {
        ExtensionError::Tabs(describe(&err))
    }

    pub fn dom(err: JsValue) -> Self {
        ExtensionError::Dom(describe(&err))
    }

    pub fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        ExtensionError::Decode {
            what,
            detail: err.to_string(),
        }
    }
}

/// Best-effort readable text for a thrown JS value
fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ExtensionError::MissingGlobal("document");
        assert_eq!(
            err.to_string(),
            "browser global `document` is not available in this context"
        );

        let err = ExtensionError::decode("settings", "invalid type: string");
        assert_eq!(err.to_string(), "failed to decode settings: invalid type: string");
    }
}
