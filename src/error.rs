//! Errors raised while mounting or driving the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("no document body")]
    NoBody,

    /// The greeting is not mounted (start was never called or it was stopped).
    #[error("greeting not mounted")]
    NotMounted,

    /// A DOM call threw; carries the debug rendering of the thrown value.
    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error("invalid config: {0}")]
    Config(String),
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        PageError::Config(err.to_string())
    }
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(PageError::NoWindow.to_string(), "no window");
        assert_eq!(PageError::Dom("boom".into()).to_string(), "DOM call failed: boom");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_errors_convert() {
        let err: PageError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid config"));
    }
}
