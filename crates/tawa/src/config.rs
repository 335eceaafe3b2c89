use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::content::ImageRegistry;
use crate::date::is_valid_date_format;
use crate::i18n::Locale;

/// The name of the configuration file at the root of a site.
pub const CONFIG_FILE_NAME: &str = "tawa.toml";

#[derive(Error, Debug)]
pub enum LoadConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Used when no locale preference has been stored.
    #[serde(default)]
    pub default_locale: Locale,
    #[serde(default = "default_timezone", deserialize_with = "deserialize_timezone")]
    pub timezone: Tz,
    /// A `strftime` format for displayed dates.
    #[serde(default = "default_date_format", deserialize_with = "deserialize_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub images: ImageRegistry,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// How long the presentation layer waits before showing a reply.
    pub reply_delay_ms: u64,
    /// The bot's first message in a new conversation.
    pub welcome: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 800,
            welcome: None,
        }
    }
}

impl ChatConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

fn default_timezone() -> Tz {
    chrono_tz::Africa::Dar_es_Salaam
}

fn default_date_format() -> String {
    "%B %-d, %Y".to_string()
}

fn deserialize_timezone<'de, D>(deserializer: D) -> Result<Tz, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let name = String::deserialize(deserializer)?;

    name.parse::<Tz>()
        .map_err(|err| D::Error::custom(format!("unknown timezone '{name}': {err}")))
}

fn deserialize_date_format<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let format = String::deserialize(deserializer)?;

    if !is_valid_date_format(&format) {
        return Err(D::Error::custom(format!("invalid date format '{format}'")));
    }

    Ok(format)
}

impl SiteConfig {
    /// Returns a [`SiteConfig`] with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            title: None,
            default_locale: Locale::default(),
            timezone: default_timezone(),
            date_format: default_date_format(),
            images: ImageRegistry::default(),
            chat: ChatConfig::default(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, LoadConfigError> {
        Ok(toml::from_str(text)?)
    }
}
