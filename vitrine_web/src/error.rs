// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by the browser backend.

use tracing_subscriber::filter::ParseError;
use vitrine_core::config::ConfigError;
use wasm_bindgen::{JsCast as _, JsValue};

/// Errors from setting up the browser host, logging or configuration.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// No global `window` (not running in a browser main thread).
    #[error("no global `window` object")]
    NoWindow,
    /// The window has no document.
    #[error("window has no document")]
    NoDocument,
    /// A browser API threw.
    #[error("JavaScript exception: {0}")]
    Js(String),
    /// The configuration JSON did not deserialize.
    #[error("invalid site configuration JSON")]
    Json(#[from] serde_json::Error),
    /// The configuration deserialized but failed validation.
    #[error("invalid site configuration")]
    Config(#[from] ConfigError),
    /// The log filter directive did not parse.
    #[error("invalid log filter `{filter}`")]
    LogFilter {
        /// The directive string.
        filter: String,
        /// Parse failure.
        #[source]
        source: ParseError,
    },
    /// A global `tracing` subscriber was already installed.
    #[error("a global logger is already installed")]
    LoggerInstalled,
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<WebError> for JsValue {
    fn from(error: WebError) -> Self {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        js_sys::Error::new(&message).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::visibility::RootMarginError;

    #[test]
    fn config_errors_keep_their_source() {
        let err = WebError::from(ConfigError::RootMargin {
            name: "reveal_root_margin",
            source: RootMarginError::Empty,
        });
        assert_eq!(err.to_string(), "invalid site configuration");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("reveal_root_margin is not a valid root margin")
        );
    }

    #[test]
    fn json_errors_convert() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WebError::from(json);
        assert!(matches!(err, WebError::Json(_)), "expected Json, got {err:?}");
    }
}
