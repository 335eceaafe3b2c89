use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

static TOML_REGEX: Lazy<Regex> = Lazy::new(|| {
    let pattern = r"^[[:space:]]*\+\+\+(\r?\n(?s).*?(?-s))\+\+\+[[:space:]]*(?:$|(?:\r?\n((?s).*(?-s))$))";
    Regex::new(pattern).expect("failed to compile regex for TOML front matter")
});

#[derive(Error, Debug)]
pub enum ParseContentError {
    #[error("failed to read '{filepath}': {source}")]
    Io {
        filepath: PathBuf,
        source: std::io::Error,
    },

    #[error("missing front matter in '{filepath}'")]
    MissingFrontMatter { filepath: PathBuf },

    #[error("invalid front matter in '{filepath}': {source}")]
    InvalidFrontMatter {
        filepath: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug)]
struct RawTomlFrontMatter<'a>(&'a str);

impl RawTomlFrontMatter<'_> {
    fn deserialize<T>(&self) -> Result<T, toml::de::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        toml::from_str(self.0)
    }
}

/// Splits `+++`-delimited TOML front matter from the body of a content file.
pub fn parse_front_matter<'a, T>(
    text: &'a str,
    filepath: &Path,
) -> Result<(T, &'a str), ParseContentError>
where
    T: serde::de::DeserializeOwned,
{
    let captures =
        TOML_REGEX
            .captures(text)
            .ok_or_else(|| ParseContentError::MissingFrontMatter {
                filepath: filepath.to_owned(),
            })?;

    let front_matter = RawTomlFrontMatter(captures.get(1).map_or("", |m| m.as_str()));
    let body = captures.get(2).map_or("", |m| m.as_str());

    let front_matter = front_matter.deserialize::<T>().map_err(|source| {
        ParseContentError::InvalidFrontMatter {
            filepath: filepath.to_owned(),
            source,
        }
    })?;

    Ok((front_matter, body))
}

/// Reads a content file from disk and returns its text.
pub(crate) fn read_content_file(filepath: &Path) -> Result<String, ParseContentError> {
    fs::read_to_string(filepath).map_err(|source| ParseContentError::Io {
        filepath: filepath.to_owned(),
        source,
    })
}

/// Accepts a date written either as a TOML date (`date = 2024-12-01`) or as
/// a string, keeping its textual form.
///
/// Strings are passed through untouched so that a malformed date still loads
/// and is sorted last instead of failing the whole content tree.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match toml::Value::deserialize(deserializer)? {
        toml::Value::Datetime(datetime) => Ok(datetime.to_string()),
        toml::Value::String(string) => Ok(string),
        value => Err(D::Error::custom(format!(
            "expected a date or a string, found {}",
            value.type_str()
        ))),
    }
}
