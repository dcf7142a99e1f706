//! Translation bundles for the approvals UI.
//!
//! # Design
//! - Each locale is a JSON tree compiled into the binary and addressed by dotted keys.
//! - Lookups fall back to English, then to the caller's default, so copy never renders blank.
//! - `{name}`-style placeholders are filled by [`TranslationBundle::format`].

use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// Arabic.
    Ar,
    /// German.
    De,
    /// English.
    En,
    /// French.
    Fr,
}

impl LocaleCode {
    /// Every shipped locale.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Ar, Self::De, Self::En, Self::Fr]
    }

    /// Two-letter language code, also used as the stored preference.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::De => "de",
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Resolve a stored preference or browser tag such as `de-AT`.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|locale| locale.code() == primary)
    }
}

/// Locale used when neither storage nor the browser names a supported one.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Parsed copy for one locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
    rtl: bool,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Load the compiled-in copy for `locale`. A malformed file yields an empty tree.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(locale_source(locale)).unwrap_or(Value::Null);
        let rtl = lookup(&tree, "meta.rtl")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { locale, tree, rtl }
    }

    /// Copy at `path`, falling back to English and then to `default`.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        lookup(&self.tree, path)
            .or_else(|| lookup(&ENGLISH.tree, path))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Like [`TranslationBundle::text`], replacing each `{key}` with its value.
    #[must_use]
    pub fn format(&self, path: &str, default: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.text(path, default), |copy, (key, value)| {
                copy.replace(&format!("{{{key}}}"), value)
            })
    }

    /// Whether the locale lays out right-to-left.
    #[must_use]
    pub const fn rtl(&self) -> bool {
        self.rtl
    }
}

static ENGLISH: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(tree, |node, segment| node.get(segment))
}

const fn locale_source(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::Ar => include_str!("../../i18n/ar.json"),
        LocaleCode::De => include_str!("../../i18n/de.json"),
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Fr => include_str!("../../i18n/fr.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_uses_caller_default() {
        let bundle = TranslationBundle::new(LocaleCode::Fr);
        assert_eq!(bundle.text("approvals.unknown", "fallback"), "fallback");
    }

    #[test]
    fn partial_locale_borrows_english_copy() {
        let bundle = TranslationBundle::new(LocaleCode::Ar);
        assert_eq!(
            bundle.text("approvals.selector_heading", ""),
            "Select members that are allowed to approve changes"
        );
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert!(TranslationBundle::new(LocaleCode::Ar).rtl());
        assert!(!TranslationBundle::new(LocaleCode::De).rtl());
    }

    #[test]
    fn lang_tags_resolve_by_primary_subtag() {
        assert_eq!(LocaleCode::from_lang_tag("de-AT"), Some(LocaleCode::De));
        assert_eq!(LocaleCode::from_lang_tag("fr_CA"), Some(LocaleCode::Fr));
        assert_eq!(LocaleCode::from_lang_tag("EN"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("pt-BR"), None);
        assert_eq!(LocaleCode::from_lang_tag(""), None);
    }

    #[test]
    fn format_fills_named_placeholders() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(
            bundle.format("approvals.commit_success", "", &[("name", "prod-guard")]),
            "Updated approvers for prod-guard"
        );
        assert_eq!(
            bundle.format("approvals.missing", "{count} of {count}", &[("count", "2")]),
            "2 of 2"
        );
    }

    #[test]
    fn every_locale_covers_row_copy() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert_eq!(bundle.locale, locale);
            for key in ["approvals.none", "approvals.selected_count", "nav.approvals"] {
                assert!(!bundle.text(key, "").is_empty(), "{key} missing for {locale:?}");
            }
        }
    }
}
