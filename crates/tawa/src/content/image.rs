use indexmap::IndexMap;
use serde::Deserialize;

/// Maps symbolic image keys used in content to bundled asset paths, and
/// knows where bare image filenames live.
///
/// Nothing here checks that a resolved path exists; a missing asset shows up
/// as a broken image at render time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageRegistry {
    /// Folder that bare filenames on news items resolve into.
    pub news_folder: String,
    /// Folder that bare filenames on events resolve into.
    pub events_folder: String,
    pub registry: IndexMap<String, String>,
}

impl Default for ImageRegistry {
    fn default() -> Self {
        Self {
            news_folder: "/images/news".to_string(),
            events_folder: "/images/events".to_string(),
            registry: IndexMap::new(),
        }
    }
}

impl ImageRegistry {
    /// Registers a bundled asset under a symbolic key.
    pub fn insert(&mut self, key: impl Into<String>, asset: impl Into<String>) {
        self.registry.insert(key.into(), asset.into());
    }

    pub fn resolve_news_image(&self, image: Option<&str>) -> Option<String> {
        resolve(&self.registry, image, &self.news_folder)
    }

    pub fn resolve_event_image(&self, image: Option<&str>) -> Option<String> {
        resolve(&self.registry, image, &self.events_folder)
    }
}

/// Resolves an image reference in order of precedence:
///
/// 1. a key in the registry resolves to its asset,
/// 2. a root-relative path (or absolute URL) is used as-is,
/// 3. anything else is a filename under `folder`.
///
/// A missing or blank reference resolves to `None` so the caller can render
/// a placeholder.
fn resolve(registry: &IndexMap<String, String>, image: Option<&str>, folder: &str) -> Option<String> {
    let image = image.map(str::trim).filter(|image| !image.is_empty())?;

    if let Some(asset) = registry.get(image) {
        return Some(asset.clone());
    }

    if image.starts_with('/') || image.starts_with("http://") || image.starts_with("https://") {
        return Some(image.to_string());
    }

    Some(format!(
        "{}/{}",
        folder.trim_end_matches('/'),
        image.trim_start_matches("./")
    ))
}
