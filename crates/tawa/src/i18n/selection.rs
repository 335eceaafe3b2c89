use tracing::{info, warn};

use crate::i18n::Locale;
use crate::storage::PreferenceStore;

/// The preference key the chosen language is stored under.
pub const LOCALE_KEY: &str = "language";

/// The visitor's current locale, backed by a persisted preference.
///
/// Switching writes the preference and hands back the new locale; callers
/// rebuild whatever they render with it instead of reloading anything.
pub struct LocaleSelection<S> {
    store: S,
    current: Locale,
}

impl<S: PreferenceStore> LocaleSelection<S> {
    /// Restores the stored locale, or uses `default` when none is stored,
    /// the stored value isn't a supported locale, or the store can't be read.
    pub fn restore(store: S, default: Locale) -> Self {
        let current = match store.load(LOCALE_KEY) {
            Ok(Some(code)) => Locale::from_code(&code).unwrap_or_else(|| {
                warn!(code = %code, "ignoring unsupported stored locale");
                default
            }),
            Ok(None) => default,
            Err(err) => {
                warn!(error = %err, "failed to read locale preference");
                default
            }
        };

        Self { store, current }
    }

    pub fn current(&self) -> Locale {
        self.current
    }

    /// Persists `locale` as the visitor's choice and makes it current.
    ///
    /// The current locale is left unchanged if the preference can't be written.
    pub fn switch(&mut self, locale: Locale) -> Result<Locale, S::Error> {
        self.store.store(LOCALE_KEY, locale.code())?;
        self.current = locale;

        info!(locale = %locale, "switched locale");

        Ok(locale)
    }
}
