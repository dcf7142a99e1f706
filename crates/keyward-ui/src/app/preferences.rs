//! Persistence and environment helpers for the app shell.

use crate::core::telemetry::DEFAULT_LOG_LEVEL;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use web_sys::Url;

pub(crate) const LOCALE_KEY: &str = "keyward.locale";
pub(crate) const API_KEY_KEY: &str = "keyward.api_key";
pub(crate) const LOG_LEVEL_KEY: &str = "keyward.log_level";

const DEV_UI_PORT: &str = "8080";
const DEV_API_PORT: &str = "7070";

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(nav) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&nav) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn load_api_key() -> Option<String> {
    let value = LocalStorage::get::<String>(API_KEY_KEY).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}

/// Tracing filter directive, e.g. `debug` or `keyward_ui=debug`.
pub(crate) fn load_log_level() -> String {
    LocalStorage::get::<String>(LOG_LEVEL_KEY)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// API origin derived from the page location; the dev UI port maps onto the API port.
pub(crate) fn api_base_url() -> String {
    let fallback = format!("http://localhost:{DEV_API_PORT}");
    let Ok(href) = window().location().href() else {
        return fallback;
    };
    let Ok(url) = Url::new(&href) else {
        return fallback;
    };
    let port = url.port();
    let mut base = format!("{}//{}", url.protocol(), url.hostname());
    match port.as_str() {
        "" => {}
        DEV_UI_PORT => {
            base.push(':');
            base.push_str(DEV_API_PORT);
        }
        other => {
            base.push(':');
            base.push_str(other);
        }
    }
    base
}
