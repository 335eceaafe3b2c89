use chrono::NaiveDate;

use crate::content::{
    ContentAggregator, ContentRepository, DestinationRef, EventItem, NewsEntry,
};
use crate::date::format_date;
use crate::i18n::{Locale, TextDirection, Translations, Translator};
use crate::permalink::{Permalink, Route};
use crate::SiteConfig;

/// Everything a page needs to render in one locale.
///
/// The locale is fixed for the lifetime of the context. To switch language,
/// build a new context; the content it reads is the same in every locale.
pub struct RenderContext<'a> {
    config: &'a SiteConfig,
    translator: Translator<'a>,
    content: ContentAggregator<'a>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        config: &'a SiteConfig,
        translations: &'a Translations,
        repository: &'a dyn ContentRepository,
        locale: Locale,
    ) -> Self {
        Self {
            config,
            translator: translations.translator(locale),
            content: ContentAggregator::new(repository),
        }
    }

    pub fn config(&self) -> &'a SiteConfig {
        self.config
    }

    pub fn locale(&self) -> Locale {
        self.translator.locale()
    }

    /// The value for the document's `lang` attribute.
    pub fn lang(&self) -> &'static str {
        self.locale().code()
    }

    /// The value for the document's `dir` attribute.
    pub fn direction(&self) -> TextDirection {
        self.translator.direction()
    }

    pub fn t<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.translator.t(key)
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.translator.t_with(key, args)
    }

    pub fn content(&self) -> &ContentAggregator<'a> {
        &self.content
    }

    pub fn permalink(&self, route: &Route) -> Result<Permalink, url::ParseError> {
        Permalink::from_route(self.config, route)
    }

    /// Formats a date for display, or returns it as authored if it can't be
    /// parsed or formatted.
    pub fn format_date(&self, date: &str) -> String {
        format_date(date, &self.config.date_format, self.config.timezone)
            .unwrap_or_else(|| date.to_string())
    }

    pub fn news_to_render(&self, entry: NewsEntry<'a>) -> NewsToRender<'a> {
        NewsToRender {
            id: &entry.item.id,
            title: &entry.item.title,
            date: self.format_date(&entry.item.date),
            excerpt: &entry.item.excerpt,
            content: &entry.item.content,
            image: entry.image(&self.config.images),
            path: Route::NewsDetail {
                id: entry.item.id.clone(),
            }
            .path(),
            destination: entry.destination,
        }
    }

    pub fn event_to_render(&self, event: &'a EventItem) -> EventToRender<'a> {
        EventToRender {
            id: &event.id,
            title: &event.title,
            date: self.format_date(&event.date),
            location: &event.location,
            excerpt: &event.excerpt,
            description: event.description.as_deref(),
            image: self
                .config
                .images
                .resolve_event_image(event.image.as_deref()),
            path: Route::EventDetail {
                id: event.id.clone(),
            }
            .path(),
        }
    }

    /// The newest `limit` news items, ready to render.
    pub fn latest_news(&self, limit: usize) -> Vec<NewsToRender<'a>> {
        self.content
            .latest_news(limit)
            .into_iter()
            .map(|entry| self.news_to_render(entry))
            .collect()
    }

    /// Every event, oldest first, ready to render.
    pub fn events(&self) -> Vec<EventToRender<'a>> {
        self.content
            .events()
            .into_iter()
            .map(|event| self.event_to_render(event))
            .collect()
    }

    /// Events on or after `today` in the site's timezone, ready to render.
    pub fn upcoming_events(&self, today: NaiveDate) -> Vec<EventToRender<'a>> {
        self.content
            .upcoming_events(today, self.config.timezone)
            .into_iter()
            .map(|event| self.event_to_render(event))
            .collect()
    }
}

#[derive(Debug, PartialEq)]
pub struct NewsToRender<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub date: String,
    pub excerpt: &'a str,
    pub content: &'a str,
    /// `None` means the page shows a placeholder.
    pub image: Option<String>,
    pub path: String,
    pub destination: Option<DestinationRef<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct EventToRender<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub date: String,
    pub location: &'a str,
    pub excerpt: &'a str,
    pub description: Option<&'a str>,
    pub image: Option<String>,
    pub path: String,
}
