use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::{
    ContentKind, Destination, EventItem, FileInfo, NewsItem, ParseContentError,
};
use crate::date::parse_date;

/// Read access to the three independently authored content collections.
pub trait ContentRepository {
    /// Destinations in authored order, each with its nested tours and news.
    fn list_destinations(&self) -> &[Destination];

    /// News that isn't attached to any destination.
    fn list_general_news(&self) -> &[NewsItem];

    fn list_events(&self) -> &[EventItem];
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidateContentError {
    #[error("duplicate destination id '{id}'")]
    DuplicateDestinationId { id: String },

    #[error("duplicate destination slug '{slug}'")]
    DuplicateDestinationSlug { slug: String },

    #[error("destination slug '{slug}' is not URL-safe")]
    InvalidSlug { slug: String },

    #[error("duplicate tour id '{id}' in destination '{destination}'")]
    DuplicateTourId { destination: String, id: String },

    #[error("duplicate news id '{id}'")]
    DuplicateNewsId { id: String },

    #[error("duplicate event id '{id}'")]
    DuplicateEventId { id: String },
}

#[derive(Error, Debug)]
pub enum LoadContentError {
    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Parse(#[from] ParseContentError),

    #[error("invalid content: {0}")]
    Validate(#[from] ValidateContentError),
}

/// The content of the site, validated once when it is built.
#[derive(Debug, Default)]
pub struct Repository {
    destinations: Vec<Destination>,
    news: Vec<NewsItem>,
    events: Vec<EventItem>,
}

impl ContentRepository for Repository {
    fn list_destinations(&self) -> &[Destination] {
        &self.destinations
    }

    fn list_general_news(&self) -> &[NewsItem] {
        &self.news
    }

    fn list_events(&self) -> &[EventItem] {
        &self.events
    }
}

impl Repository {
    /// Returns a new [`Repository`] over the given collections.
    ///
    /// Fails on the first duplicate id or invalid slug.
    pub fn new(
        destinations: Vec<Destination>,
        news: Vec<NewsItem>,
        events: Vec<EventItem>,
    ) -> Result<Self, ValidateContentError> {
        let repository = Self {
            destinations,
            news,
            events,
        };

        repository.validate()?;

        Ok(repository)
    }

    /// Loads and validates all content under `content_path`.
    pub fn load(content_path: impl AsRef<Path>) -> Result<Self, LoadContentError> {
        let content_path = content_path.as_ref();

        let mut destinations: Vec<(i64, String, Destination)> = Vec::new();
        let mut destination_news: HashMap<String, Vec<NewsItem>> = HashMap::new();
        let mut news = Vec::new();
        let mut events = Vec::new();

        if content_path.is_dir() {
            for path in content_files(content_path)? {
                let file = FileInfo::new(content_path, &path);

                match file.kind() {
                    ContentKind::Destination { dir } => {
                        let (destination, weight) = Destination::from_path(&file)?;
                        debug!(path = %path.display(), slug = %destination.slug, "loaded destination");
                        destinations.push((weight, dir, destination));
                    }
                    ContentKind::DestinationNews { dir } => {
                        let item = NewsItem::from_path(&path)?;
                        debug!(path = %path.display(), id = %item.id, "loaded destination news");
                        destination_news.entry(dir).or_default().push(item);
                    }
                    ContentKind::News => {
                        let item = NewsItem::from_path(&path)?;
                        debug!(path = %path.display(), id = %item.id, "loaded news");
                        news.push(item);
                    }
                    ContentKind::Event => {
                        let event = EventItem::from_path(&path)?;
                        debug!(path = %path.display(), id = %event.id, "loaded event");
                        events.push(event);
                    }
                    ContentKind::Unknown => {
                        debug!(path = %path.display(), "skipping file outside known content folders");
                    }
                }
            }
        } else {
            warn!(path = %content_path.display(), "content directory not found");
        }

        destinations.sort_by(|(a_weight, a_dir, _), (b_weight, b_dir, _)| {
            a_weight.cmp(b_weight).then_with(|| a_dir.cmp(b_dir))
        });

        let destinations = destinations
            .into_iter()
            .map(|(_, dir, mut destination)| {
                destination.news = destination_news.remove(&dir).unwrap_or_default();
                destination
            })
            .collect::<Vec<_>>();

        for dir in destination_news.keys() {
            warn!(dir = %dir, "news found for a destination without an _index.md");
        }

        let repository = Self::new(destinations, news, events)?;

        info!(
            destinations = repository.destinations.len(),
            news = repository.news.len(),
            events = repository.events.len(),
            "loaded content"
        );

        Ok(repository)
    }

    fn validate(&self) -> Result<(), ValidateContentError> {
        let mut destination_ids = HashSet::new();
        let mut destination_slugs = HashSet::new();
        let mut news_ids = HashSet::new();
        let mut event_ids = HashSet::new();

        for item in &self.news {
            if !news_ids.insert(item.id.as_str()) {
                return Err(ValidateContentError::DuplicateNewsId {
                    id: item.id.clone(),
                });
            }
            warn_on_unparseable_date("news", &item.id, &item.date);
        }

        for destination in &self.destinations {
            if !destination_ids.insert(destination.id.as_str()) {
                return Err(ValidateContentError::DuplicateDestinationId {
                    id: destination.id.clone(),
                });
            }

            if destination.slug.is_empty() || slug::slugify(&destination.slug) != destination.slug
            {
                return Err(ValidateContentError::InvalidSlug {
                    slug: destination.slug.clone(),
                });
            }

            if !destination_slugs.insert(destination.slug.as_str()) {
                return Err(ValidateContentError::DuplicateDestinationSlug {
                    slug: destination.slug.clone(),
                });
            }

            let mut tour_ids = HashSet::new();
            for tour in &destination.tours {
                if !tour_ids.insert(tour.id.as_str()) {
                    return Err(ValidateContentError::DuplicateTourId {
                        destination: destination.slug.clone(),
                        id: tour.id.clone(),
                    });
                }
            }

            for item in &destination.news {
                if !news_ids.insert(item.id.as_str()) {
                    return Err(ValidateContentError::DuplicateNewsId {
                        id: item.id.clone(),
                    });
                }
                warn_on_unparseable_date("news", &item.id, &item.date);
            }
        }

        for event in &self.events {
            if !event_ids.insert(event.id.as_str()) {
                return Err(ValidateContentError::DuplicateEventId {
                    id: event.id.clone(),
                });
            }
            warn_on_unparseable_date("event", &event.id, &event.date);
        }

        Ok(())
    }
}

fn warn_on_unparseable_date(kind: &str, id: &str, date: &str) {
    if parse_date(date).is_none() {
        warn!(kind, id, date, "unparseable date; item will sort last");
    }
}

fn content_files(content_path: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(content_path)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;

        let Some(filename) = entry.file_name().to_str() else {
            continue;
        };

        if entry.file_type().is_dir() || !filename.ends_with(".md") || filename.starts_with('.') {
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}
