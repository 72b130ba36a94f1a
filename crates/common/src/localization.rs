//! Display-text lookup boundary
//!
//! The pager only needs one label ("Pages"), but it is used on admin pages
//! where a translation set may not be loaded, so lookups always carry an
//! English fallback.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Provides translated display text by category and key.
pub trait Localization: Send + Sync {
    /// Translated text, or `None` when the key has no translation loaded.
    fn text(&self, category: &str, key: &str) -> Option<String>;
}

/// Localization backed by a fixed in-process table.
#[derive(Debug, Default, Clone)]
pub struct StaticLocalization;

static TRANSLATIONS: Lazy<HashMap<(&'static str, &'static str), &'static str>> =
    Lazy::new(|| {
        let mut m = HashMap::new();
        m.insert(("COMMON", "PAGES"), "Pages");
        m.insert(("COMMON", "GOTO_PAGE"), "Go to page");
        m
    });

impl Localization for StaticLocalization {
    fn text(&self, category: &str, key: &str) -> Option<String> {
        TRANSLATIONS
            .get(&(category, key))
            .map(|s| (*s).to_string())
    }
}

/// Label lookup with the fixed English fallback.
pub fn pages_label(loc: &dyn Localization) -> String {
    loc.text("COMMON", "PAGES")
        .unwrap_or_else(|| "Pages".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyLocalization;

    impl Localization for EmptyLocalization {
        fn text(&self, _category: &str, _key: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn static_table_resolves_pages() {
        assert_eq!(pages_label(&StaticLocalization), "Pages");
    }

    #[test]
    fn missing_translation_falls_back_to_english() {
        assert_eq!(pages_label(&EmptyLocalization), "Pages");
    }
}
