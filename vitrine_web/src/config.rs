// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading [`SiteConfig`] overrides from the page.

use vitrine_core::config::SiteConfig;
use vitrine_core::host::ElementLocator as _;

use crate::error::WebError;
use crate::host::WebHost;

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "vitrine-config";

/// Parses a JSON object of overrides and validates the result.
///
/// Missing fields keep their landing-page defaults; blank input yields the
/// defaults unchanged.
pub fn config_from_json(json: &str) -> Result<SiteConfig, WebError> {
    let config = if json.trim().is_empty() {
        SiteConfig::landing()
    } else {
        serde_json::from_str(json)?
    };
    config.validate()?;
    Ok(config)
}

/// Reads the configuration from the page's `#vitrine-config` element, or
/// the defaults when the page has none.
pub fn page_config(host: &WebHost) -> Result<SiteConfig, WebError> {
    match host.by_id(CONFIG_ELEMENT_ID) {
        Some(element) => config_from_json(&element.text()),
        None => Ok(SiteConfig::landing()),
    }
}
