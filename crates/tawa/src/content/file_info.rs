use std::path::{Path, PathBuf};

/// What a file in the content tree holds, based on where it sits.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ContentKind {
    /// `destinations/<dir>/_index.md`
    Destination { dir: String },
    /// `destinations/<dir>/news/*.md`
    DestinationNews { dir: String },
    /// `news/*.md`
    News,
    /// `events/*.md`
    Event,
    Unknown,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub parent: PathBuf,
    /// The directories between the content root and the file.
    pub components: Vec<String>,
}

impl FileInfo {
    pub fn new(root_path: impl AsRef<Path>, path: impl AsRef<Path>) -> Self {
        let root_path = root_path.as_ref();
        let path = path.as_ref();
        Self {
            path: path.to_owned(),
            parent: path.parent().unwrap_or(root_path).to_owned(),
            components: Self::components(root_path, path),
        }
    }

    fn components(root_path: &Path, path: &Path) -> Vec<String> {
        path.strip_prefix(root_path)
            .unwrap_or(path)
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn kind(&self) -> ContentKind {
        let is_index = self
            .path
            .file_name()
            .map_or(false, |filename| filename == "_index.md");

        let components = self
            .components
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();

        match components.as_slice() {
            ["destinations", dir] if is_index => ContentKind::Destination {
                dir: dir.to_string(),
            },
            ["destinations", dir, "news"] if !is_index => ContentKind::DestinationNews {
                dir: dir.to_string(),
            },
            ["news"] if !is_index => ContentKind::News,
            ["events"] if !is_index => ContentKind::Event,
            _ => ContentKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_info() {
        let file = FileInfo::new("content", "content/destinations/selous/_index.md");
        assert_eq!(
            file,
            FileInfo {
                path: PathBuf::from("content/destinations/selous/_index.md"),
                parent: PathBuf::from("content/destinations/selous"),
                components: vec!["destinations".into(), "selous".into()]
            }
        );

        let file = FileInfo::new("site/content", "site/content/news/2024-rangers.md");
        assert_eq!(file.components, vec!["news".to_string()]);
    }

    #[test]
    fn test_content_kind() {
        let kind = |path: &str| FileInfo::new("content", path).kind();

        assert_eq!(
            kind("content/destinations/selous/_index.md"),
            ContentKind::Destination {
                dir: "selous".to_string()
            }
        );
        assert_eq!(
            kind("content/destinations/selous/news/census.md"),
            ContentKind::DestinationNews {
                dir: "selous".to_string()
            }
        );
        assert_eq!(kind("content/news/rangers.md"), ContentKind::News);
        assert_eq!(kind("content/events/expo.md"), ContentKind::Event);
        assert_eq!(kind("content/destinations/selous/notes.md"), ContentKind::Unknown);
        assert_eq!(kind("content/news/_index.md"), ContentKind::Unknown);
        assert_eq!(kind("content/about.md"), ContentKind::Unknown);
    }
}
