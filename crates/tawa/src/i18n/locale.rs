use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unsupported locale '{0}'")]
pub struct UnknownLocaleError(pub String);

/// The languages the site is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    #[default]
    En,
    Sw,
    Fr,
    De,
    Zh,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// The value for an HTML `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::En,
        Locale::Sw,
        Locale::Fr,
        Locale::De,
        Locale::Zh,
        Locale::Ar,
    ];

    /// The ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Sw => "sw",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Zh => "zh",
            Locale::Ar => "ar",
        }
    }

    /// Matches a language tag against the supported locales, ignoring case
    /// and any region or script suffix (`sw-TZ`, `zh_Hans`).
    pub fn from_code(code: &str) -> Option<Self> {
        let language = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == language)
    }

    /// The English name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Sw => "Swahili",
            Locale::Fr => "French",
            Locale::De => "German",
            Locale::Zh => "Chinese",
            Locale::Ar => "Arabic",
        }
    }

    /// The name of the language in that language, for the language picker.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Sw => "Kiswahili",
            Locale::Fr => "Français",
            Locale::De => "Deutsch",
            Locale::Zh => "中文",
            Locale::Ar => "العربية",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Locale::Ar => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownLocaleError(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = UnknownLocaleError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("sw"), Some(Locale::Sw));
        assert_eq!(Locale::from_code("SW-tz"), Some(Locale::Sw));
        assert_eq!(Locale::from_code("zh_Hans"), Some(Locale::Zh));
        assert_eq!(Locale::from_code(" ar "), Some(Locale::Ar));
        assert_eq!(Locale::from_code("es"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_codes_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(locale.code().parse::<Locale>(), Ok(locale));
        }
        assert_eq!(
            "pt".parse::<Locale>(),
            Err(UnknownLocaleError("pt".to_string()))
        );
    }

    #[test]
    fn test_deserialize_accepts_the_same_codes_as_from_code() {
        #[derive(Debug, Deserialize)]
        struct Preference {
            locale: Locale,
        }

        let cases = [
            ("sw", Locale::Sw),
            ("SW", Locale::Sw),
            ("sw-TZ", Locale::Sw),
            ("zh_Hans", Locale::Zh),
        ];

        for (code, locale) in cases {
            let preference: Preference =
                serde_json::from_value(serde_json::json!({ "locale": code })).unwrap();
            assert_eq!(preference.locale, locale);
        }

        let result =
            serde_json::from_value::<Preference>(serde_json::json!({ "locale": "tlh" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_direction() {
        assert_eq!(Locale::Ar.direction(), TextDirection::Rtl);
        assert_eq!(Locale::Ar.direction().as_str(), "rtl");
        for locale in Locale::ALL.into_iter().filter(|locale| *locale != Locale::Ar) {
            assert_eq!(locale.direction(), TextDirection::Ltr);
        }
    }
}
