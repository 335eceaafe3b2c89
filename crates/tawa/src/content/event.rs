use std::path::Path;

use serde::Deserialize;

use crate::content::{deserialize_date, parse_front_matter, read_content_file, ParseContentError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: String,
    /// Free text. Not a reference to a destination, even when the names overlap.
    pub location: String,
    pub excerpt: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl EventItem {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseContentError> {
        let path = path.as_ref();
        let text = read_content_file(path)?;

        Self::parse(&text, path)
    }

    /// Parses an event file. A non-empty body becomes the description unless
    /// the front matter already sets one.
    pub fn parse(text: &str, filepath: &Path) -> Result<Self, ParseContentError> {
        let (mut event, body) = parse_front_matter::<EventItem>(text, filepath)?;

        let body = body.trim();
        if event.description.is_none() && !body.is_empty() {
            event.description = Some(body.to_string());
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_event_uses_body_as_description() {
        let text = indoc! {r#"
            +++
            id = "investment-forum-2025"
            title = "Wildlife Investment Forum"
            date = 2025-03-20
            location = "Dar es Salaam"
            excerpt = "Meet the authority's concession team."
            +++
            Two days of presentations on hunting blocks and eco-lodges.
        "#};

        let event = EventItem::parse(text, Path::new("content/events/forum.md")).unwrap();

        assert_eq!(
            event,
            EventItem {
                id: "investment-forum-2025".to_string(),
                title: "Wildlife Investment Forum".to_string(),
                date: "2025-03-20".to_string(),
                location: "Dar es Salaam".to_string(),
                excerpt: "Meet the authority's concession team.".to_string(),
                description: Some(
                    "Two days of presentations on hunting blocks and eco-lodges.".to_string()
                ),
                image: None,
            }
        );
    }

    #[test]
    fn test_parse_event_prefers_front_matter_description() {
        let text = indoc! {r#"
            +++
            id = "e1"
            title = "Ranger open day"
            date = 2025-01-15
            location = "Morogoro"
            excerpt = "Visit the ranger post."
            description = "Guided walk and demonstrations."
            +++
            Ignored body.
        "#};

        let event = EventItem::parse(text, Path::new("content/events/e1.md")).unwrap();

        assert_eq!(
            event.description.as_deref(),
            Some("Guided walk and demonstrations.")
        );
    }
}
