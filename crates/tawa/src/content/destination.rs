use std::path::Path;

use serde::Deserialize;

use crate::content::{
    parse_front_matter, read_content_file, FileInfo, NewsItem, ParseContentError,
};

/// A protected area the authority manages, with its tours and news.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub id: String,
    /// URL-safe and unique; destination routes are addressed by it.
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub long_description: String,
    pub image: String,
    /// Species names in authored order.
    pub wildlife: Vec<String>,
    pub area: String,
    pub established: String,
    /// Authored independently of `area` and `wildlife`.
    pub stats: DestinationStats,
    pub tours: Vec<Tour>,
    pub news: Vec<NewsItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DestinationStats {
    pub area: String,
    pub species: u32,
    pub visitors: String,
}

/// A tour offered at a single destination. Its `id` is only unique within
/// that destination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tour {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub price: f64,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct DestinationFrontMatter {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub wildlife: Vec<String>,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub established: String,
    pub stats: DestinationStats,
    #[serde(default)]
    pub tours: Vec<Tour>,
    /// Position among destinations; lower comes first.
    #[serde(default)]
    pub weight: i64,
}

impl Destination {
    /// Reads a destination from its `_index.md`, returning it with its
    /// ordering weight.
    pub fn from_path(file: &FileInfo) -> Result<(Self, i64), ParseContentError> {
        let text = read_content_file(&file.path)?;

        Self::parse(&text, file)
    }

    pub fn parse(text: &str, file: &FileInfo) -> Result<(Self, i64), ParseContentError> {
        let (front_matter, body) = parse_front_matter::<DestinationFrontMatter>(text, &file.path)?;

        let slug = front_matter
            .slug
            .unwrap_or_else(|| directory_name(&file.parent));
        let id = front_matter.id.unwrap_or_else(|| slug.clone());

        let destination = Self {
            id,
            slug,
            name: front_matter.name,
            tagline: front_matter.tagline,
            description: front_matter.description,
            long_description: body.trim().to_string(),
            image: front_matter.image,
            wildlife: front_matter.wildlife,
            area: front_matter.area,
            established: front_matter.established,
            stats: front_matter.stats,
            tours: front_matter.tours,
            news: Vec::new(),
        };

        Ok((destination, front_matter.weight))
    }

    /// The first authored tour, if any.
    pub fn featured_tour(&self) -> Option<&Tour> {
        self.tours.first()
    }
}

fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    const SELOUS: &str = indoc! {r#"
        +++
        name = "Selous Game Reserve"
        tagline = "Africa's great wilderness"
        description = "One of the largest protected areas in Africa."
        image = "/images/destinations/selous.jpg"
        wildlife = ["Elephant", "Lion", "Wild dog", "Hippo"]
        area = "50,000 km²"
        established = "1922"
        weight = 2

        [stats]
        area = "50,000 km²"
        species = 350
        visitors = "10,000+"

        [[tours]]
        id = "boat-safari"
        name = "Rufiji Boat Safari"
        duration = "Half day"
        price = 120.0
        highlights = ["Hippo pods", "Crocodiles"]
        description = "Drift down the Rufiji river."

        [[tours]]
        id = "walking-safari"
        name = "Walking Safari"
        duration = "3 hours"
        price = 80
        +++
        The Selous is a UNESCO World Heritage Site.
    "#};

    #[test]
    fn test_parse_destination() {
        let file = FileInfo::new("content", "content/destinations/selous/_index.md");
        let (destination, weight) = Destination::parse(SELOUS, &file).unwrap();

        assert_eq!(weight, 2);
        assert_eq!(destination.id, "selous");
        assert_eq!(destination.slug, "selous");
        assert_eq!(destination.name, "Selous Game Reserve");
        assert_eq!(
            destination.long_description,
            "The Selous is a UNESCO World Heritage Site."
        );
        assert_eq!(
            destination.stats,
            DestinationStats {
                area: "50,000 km²".to_string(),
                species: 350,
                visitors: "10,000+".to_string(),
            }
        );
        assert_eq!(destination.tours.len(), 2);
        assert_eq!(destination.tours[1].price, 80.0);
        assert_eq!(destination.tours[1].highlights, Vec::<String>::new());
        assert_eq!(
            destination.featured_tour().map(|tour| tour.id.as_str()),
            Some("boat-safari")
        );
    }

    #[test]
    fn test_parse_destination_with_explicit_slug() {
        let text = indoc! {r#"
            +++
            id = "dest-7"
            slug = "ugalla"
            name = "Ugalla River Game Reserve"
            description = "Miombo woodland along the Ugalla river."

            [stats]
            area = "5,000 km²"
            species = 120
            visitors = "2,000+"
            +++
        "#};

        let file = FileInfo::new("content", "content/destinations/07-ugalla/_index.md");
        let (destination, weight) = Destination::parse(text, &file).unwrap();

        assert_eq!(weight, 0);
        assert_eq!(destination.id, "dest-7");
        assert_eq!(destination.slug, "ugalla");
        assert_eq!(destination.featured_tour(), None);
    }
}
