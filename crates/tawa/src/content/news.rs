use std::path::Path;

use serde::Deserialize;

use crate::content::{deserialize_date, parse_front_matter, read_content_file, ParseContentError};

/// A news article, either general or attached to a destination.
///
/// The owning destination is not stored on the item itself; it is attached
/// when news is merged (see [`NewsEntry`](crate::content::NewsEntry)).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: String,
    pub excerpt: String,
    /// Either a key into the image registry or a path.
    #[serde(default)]
    pub image: Option<String>,
    /// The full article, taken from the body of the content file.
    #[serde(skip)]
    pub content: String,
}

impl NewsItem {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseContentError> {
        let path = path.as_ref();
        let text = read_content_file(path)?;

        Self::parse(&text, path)
    }

    pub fn parse(text: &str, filepath: &Path) -> Result<Self, ParseContentError> {
        let (mut item, body) = parse_front_matter::<NewsItem>(text, filepath)?;
        item.content = body.trim().to_string();

        Ok(item)
    }
}
