//! Embedded translation catalogs and language preference handling.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DocuError;

/// Storage key under which the chosen language code is persisted.
pub const LANGUAGE_STORAGE_KEY: &str = "docugenie-language-preference";

const EN: &str = include_str!("../locales/en.json");
const IT: &str = include_str!("../locales/it.json");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    It,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::It];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::It => "it",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::It => "Italiano",
        }
    }

    /// Accepts bare codes and region-tagged ones (`it-IT`, `en_GB`).
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::En),
            "it" => Some(Language::It),
            _ => None,
        }
    }
}

/// Key → display string lookup.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

/// Persisted language preference (browser `localStorage` in the frontend).
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
}

/// Picks the startup language: stored preference, then the browser's, then
/// the configured fallback.
pub fn detect_language(stored: Option<&str>, browser: Option<&str>, fallback: Language) -> Language {
    stored
        .and_then(Language::from_code)
        .or_else(|| browser.and_then(Language::from_code))
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    language: Language,
    en: Value,
    it: Value,
}

impl Catalog {
    pub fn load(language: Language) -> Result<Self, DocuError> {
        Ok(Self { language, en: parse(Language::En, EN)?, it: parse(Language::It, IT)? })
    }

    /// A catalog with no strings; every lookup falls through to the key.
    pub fn empty(language: Language) -> Self {
        Self { language, en: Value::Null, it: Value::Null }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    fn tree(&self, language: Language) -> &Value {
        match language {
            Language::En => &self.en,
            Language::It => &self.it,
        }
    }

    /// Looks `key` up in the current language, then English.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        lookup(self.tree(self.language), key).or_else(|| lookup(&self.en, key))
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(text) => text.to_string(),
            None => {
                warn!("Missing translation for '{key}'");
                key.to_string()
            }
        }
    }
}

fn parse(language: Language, raw: &str) -> Result<Value, DocuError> {
    serde_json::from_str(raw).map_err(|e| DocuError::Catalog {
        language: language.code().to_string(),
        message: e.to_string(),
    })
}

fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.').try_fold(tree, |node, part| node.get(part))?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_dotted_keys_per_language() {
        let mut catalog = Catalog::load(Language::En).unwrap();
        assert_eq!(catalog.translate("nav.devDocs"), "DevDocs");
        assert_eq!(catalog.translate("devDocs.input.send"), "Send");

        catalog.set_language(Language::It);
        assert_eq!(catalog.translate("devDocs.input.send"), "Invia");
    }

    #[test]
    fn missing_keys_fall_back_to_english_then_the_key() {
        let mut catalog = Catalog::load(Language::It).unwrap();
        catalog.it = serde_json::json!({});
        assert_eq!(catalog.translate("nav.home"), "Home");
        assert_eq!(catalog.translate("nav.nowhere"), "nav.nowhere");
        // Interior nodes are not strings.
        assert_eq!(catalog.translate("nav"), "nav");
    }

    #[test]
    fn empty_catalog_echoes_keys() {
        let catalog = Catalog::empty(Language::It);
        assert_eq!(catalog.translate("chat.history"), "chat.history");
    }

    #[test]
    fn both_catalogs_define_the_same_keys() {
        fn keys(prefix: &str, value: &Value, out: &mut Vec<String>) {
            match value {
                Value::Object(map) => {
                    for (k, v) in map {
                        let path = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
                        keys(&path, v, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }
        let catalog = Catalog::load(Language::En).unwrap();
        let (mut en, mut it) = (Vec::new(), Vec::new());
        keys("", &catalog.en, &mut en);
        keys("", &catalog.it, &mut it);
        en.sort();
        it.sort();
        assert_eq!(en, it);
    }

    #[test]
    fn detection_prefers_stored_then_browser_then_fallback() {
        assert_eq!(detect_language(Some("it"), Some("en-US"), Language::En), Language::It);
        assert_eq!(detect_language(Some("fr"), Some("it-IT"), Language::En), Language::It);
        assert_eq!(detect_language(None, Some("de"), Language::It), Language::It);
        assert_eq!(detect_language(None, None, Language::En), Language::En);
    }
}
