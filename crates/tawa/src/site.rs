use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::chat::{Conversation, Responder};
use crate::content::{ContentAggregator, ContentRepository, LoadContentError, Repository};
use crate::date::today_in;
use crate::i18n::{Locale, LoadTranslationsError, LocaleSelection, Translations};
use crate::render::RenderContext;
use crate::storage::PreferenceStore;
use crate::{LoadConfigError, SiteConfig, CONFIG_FILE_NAME};

#[derive(Error, Debug)]
pub enum LoadSiteError {
    #[error("failed to load config: {0}")]
    Config(#[from] LoadConfigError),

    #[error("failed to load content: {0}")]
    Content(#[from] LoadContentError),

    #[error("failed to load translations: {0}")]
    Translations(#[from] LoadTranslationsError),
}

struct SitePaths {
    root_path: PathBuf,
    content_path: PathBuf,
    locales_path: PathBuf,
}

/// A loaded site: its configuration, content, and UI translations.
pub struct Site {
    paths: Option<SitePaths>,
    config: SiteConfig,
    repository: Repository,
    translations: Translations,
}

impl Site {
    pub fn builder() -> SiteBuilder<()> {
        SiteBuilder::new()
    }

    /// Assembles a site from already-loaded parts. Such a site has nothing
    /// on disk to [`reload`](Self::reload) from.
    pub fn from_parts(config: SiteConfig, repository: Repository, translations: Translations) -> Self {
        Self {
            paths: None,
            config,
            repository,
            translations,
        }
    }

    fn load_from(paths: SitePaths) -> Result<Self, LoadSiteError> {
        let config = SiteConfig::from_path(paths.root_path.join(CONFIG_FILE_NAME))?;
        let repository = Repository::load(&paths.content_path)?;
        let translations = Translations::load(&paths.locales_path)?;

        info!(
            root = %paths.root_path.display(),
            base_url = %config.base_url,
            "loaded site"
        );

        Ok(Self {
            paths: Some(paths),
            config,
            repository,
            translations,
        })
    }

    /// Re-reads content and translations from disk.
    ///
    /// On failure the previously loaded content is kept.
    pub fn reload(&mut self) -> Result<(), LoadSiteError> {
        let Some(paths) = &self.paths else {
            debug!("site was not loaded from disk, nothing to reload");
            return Ok(());
        };

        let repository = Repository::load(&paths.content_path)?;
        let translations = Translations::load(&paths.locales_path)?;

        self.repository = repository;
        self.translations = translations;

        info!(root = %paths.root_path.display(), "reloaded site");

        Ok(())
    }

    pub fn root_path(&self) -> Option<&Path> {
        self.paths.as_ref().map(|paths| paths.root_path.as_path())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn aggregator(&self) -> ContentAggregator<'_> {
        ContentAggregator::new(&self.repository)
    }

    /// A responder that knows every loaded destination.
    pub fn responder(&self) -> Responder<'_> {
        Responder::new(self.repository.list_destinations())
    }

    /// Starts a conversation with the configured welcome message and delay.
    pub fn conversation(&self) -> Conversation<'_> {
        let conversation =
            Conversation::new(self.responder()).with_reply_delay(self.config.chat.reply_delay());

        match &self.config.chat.welcome {
            Some(welcome) if !welcome.trim().is_empty() => conversation.with_welcome(welcome),
            _ => conversation,
        }
    }

    pub fn render_context(&self, locale: Locale) -> RenderContext<'_> {
        RenderContext::new(&self.config, &self.translations, &self.repository, locale)
    }

    /// Restores the visitor's locale from `store`, defaulting to the
    /// configured locale.
    pub fn locale_selection<S: PreferenceStore>(&self, store: S) -> LocaleSelection<S> {
        LocaleSelection::restore(store, self.config.default_locale)
    }

    /// Today's date in the site's timezone.
    pub fn today(&self) -> NaiveDate {
        today_in(self.config.timezone)
    }
}

pub struct SiteBuilder<T> {
    state: T,
}

impl SiteBuilder<()> {
    pub fn new() -> Self {
        Self { state: () }
    }

    pub fn root(self, root_path: impl AsRef<Path>) -> SiteBuilder<WithRootPath> {
        SiteBuilder {
            state: WithRootPath {
                root_path: root_path.as_ref().to_owned(),
                content_dir: None,
                locales_dir: None,
            },
        }
    }
}

impl Default for SiteBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WithRootPath {
    root_path: PathBuf,
    content_dir: Option<PathBuf>,
    locales_dir: Option<PathBuf>,
}

impl SiteBuilder<WithRootPath> {
    /// Overrides the content directory, relative to the root. Defaults to
    /// `content`.
    pub fn content_dir(mut self, content_dir: impl AsRef<Path>) -> Self {
        self.state.content_dir = Some(content_dir.as_ref().to_owned());
        self
    }

    /// Overrides the locales directory, relative to the root. Defaults to
    /// `locales`.
    pub fn locales_dir(mut self, locales_dir: impl AsRef<Path>) -> Self {
        self.state.locales_dir = Some(locales_dir.as_ref().to_owned());
        self
    }

    pub fn load(self) -> Result<Site, LoadSiteError> {
        let WithRootPath {
            root_path,
            content_dir,
            locales_dir,
        } = self.state;

        let content_path = root_path.join(content_dir.unwrap_or_else(|| "content".into()));
        let locales_path = root_path.join(locales_dir.unwrap_or_else(|| "locales".into()));

        Site::load_from(SitePaths {
            root_path,
            content_path,
            locales_path,
        })
    }
}
