use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use derive_more::{Deref, DerefMut};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::i18n::{Locale, TextDirection};

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("failed to compile regex for placeholders")
});

#[derive(Error, Debug)]
pub enum LoadTranslationsError {
    #[error("failed to walk locales directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid translations in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Translated UI strings for one locale, keyed by dotted paths
/// (`nav.destinations`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct Dictionary(IndexMap<String, String>);

impl Dictionary {
    /// Builds a dictionary from a JSON document, flattening nested objects
    /// into dotted keys.
    pub fn from_json(value: &Value) -> Self {
        let mut dictionary = Self::default();
        flatten_into(&mut dictionary, String::new(), value);
        dictionary
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value = serde_json::from_str::<Value>(text)?;

        Ok(Self::from_json(&value))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn flatten_into(dictionary: &mut Dictionary, prefix: String, value: &Value) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };

    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(dictionary, join(key), value);
            }
        }
        Value::Array(values) => {
            for (index, value) in values.iter().enumerate() {
                flatten_into(dictionary, join(&index.to_string()), value);
            }
        }
        Value::String(text) => {
            dictionary.insert(prefix, text.clone());
        }
        Value::Number(number) => {
            dictionary.insert(prefix, number.to_string());
        }
        Value::Bool(flag) => {
            dictionary.insert(prefix, flag.to_string());
        }
        Value::Null => {}
    }
}

/// The dictionaries of every loaded locale. English is the fallback.
#[derive(Debug, Default, Clone)]
pub struct Translations {
    dictionaries: HashMap<Locale, Dictionary>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locale: Locale, dictionary: Dictionary) {
        self.dictionaries.insert(locale, dictionary);
    }

    /// Loads `<code>.json` files from `locales_path`. Files named after
    /// unsupported locales are skipped.
    pub fn load(locales_path: impl AsRef<Path>) -> Result<Self, LoadTranslationsError> {
        let locales_path = locales_path.as_ref();
        let mut translations = Self::new();

        if !locales_path.is_dir() {
            warn!(path = %locales_path.display(), "locales directory not found");
            return Ok(translations);
        }

        for entry in WalkDir::new(locales_path).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map_or(true, |extension| extension != "json") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let Some(locale) = Locale::from_code(stem) else {
                warn!(path = %path.display(), "skipping translations for unsupported locale");
                continue;
            };

            let text = fs::read_to_string(path).map_err(|source| LoadTranslationsError::Io {
                path: path.to_owned(),
                source,
            })?;
            let dictionary = Dictionary::parse(&text).map_err(|source| {
                LoadTranslationsError::Json {
                    path: path.to_owned(),
                    source,
                }
            })?;

            debug!(locale = %locale, keys = dictionary.len(), "loaded translations");
            translations.insert(locale, dictionary);
        }

        Ok(translations)
    }

    pub fn dictionary(&self, locale: Locale) -> Option<&Dictionary> {
        self.dictionaries.get(&locale)
    }

    /// Looks up `key` in `locale`, then in English.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.dictionaries
            .get(&locale)
            .and_then(|dictionary| dictionary.get(key))
            .or_else(|| {
                self.dictionaries
                    .get(&Locale::En)
                    .and_then(|dictionary| dictionary.get(key))
            })
            .map(String::as_str)
    }

    /// The English keys that `locale` has no translation for.
    pub fn missing_keys(&self, locale: Locale) -> Vec<&str> {
        let Some(english) = self.dictionaries.get(&Locale::En) else {
            return Vec::new();
        };
        let translated = self.dictionaries.get(&locale);

        english
            .keys()
            .filter(|key| translated.map_or(true, |dictionary| !dictionary.contains_key(*key)))
            .map(String::as_str)
            .collect()
    }

    pub fn translator(&self, locale: Locale) -> Translator<'_> {
        Translator {
            locale,
            translations: self,
        }
    }
}

/// Translates UI strings into a single locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    locale: Locale,
    translations: &'a Translations,
}

impl<'a> Translator<'a> {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn direction(&self) -> TextDirection {
        self.locale.direction()
    }

    /// Translates `key`, falling back to English and then to the key itself.
    pub fn t<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.translations.lookup(self.locale, key).unwrap_or(key)
    }

    /// Translates `key` and fills its `{{name}}` placeholders from `args`.
    /// Placeholders without a matching argument are left as they are.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.t(key);

        PLACEHOLDER_REGEX
            .replace_all(template, |captures: &Captures| {
                let name = &captures[1];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| captures[0].to_string())
            })
            .into_owned()
    }
}
