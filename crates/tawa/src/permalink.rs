use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::SiteConfig;

/// The tabs of a destination's mini-site. The set is closed; any other tab
/// in a path is a not-found.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum DestinationTab {
    #[default]
    Home,
    About,
    Tours,
    News,
    Contact,
}

impl DestinationTab {
    pub const ALL: [DestinationTab; 5] = [
        DestinationTab::Home,
        DestinationTab::About,
        DestinationTab::Tours,
        DestinationTab::News,
        DestinationTab::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationTab::Home => "home",
            DestinationTab::About => "about",
            DestinationTab::Tours => "tours",
            DestinationTab::News => "news",
            DestinationTab::Contact => "contact",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.as_str() == segment)
    }
}

/// A page of the site.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Route {
    Home,
    Destinations,
    Destination { slug: String, tab: DestinationTab },
    News,
    NewsDetail { id: String },
    Events,
    EventDetail { id: String },
    Investment,
    About,
    Contact,
}

impl Route {
    /// Parses a site path such as `/news/elephant-census` or
    /// `/destination/selous/tours`.
    ///
    /// Returns `None` for paths that don't name a page.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["destinations"] => Route::Destinations,
            ["destination", slug] => Route::Destination {
                slug: slug.to_string(),
                tab: DestinationTab::Home,
            },
            ["destination", slug, tab] => Route::Destination {
                slug: slug.to_string(),
                tab: DestinationTab::from_segment(tab)?,
            },
            ["news"] => Route::News,
            ["news", id] => Route::NewsDetail { id: id.to_string() },
            ["events"] => Route::Events,
            ["events", id] => Route::EventDetail { id: id.to_string() },
            ["investment"] => Route::Investment,
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            _ => return None,
        };

        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Destinations => "/destinations".to_string(),
            Route::Destination {
                slug,
                tab: DestinationTab::Home,
            } => format!("/destination/{slug}"),
            Route::Destination { slug, tab } => format!("/destination/{slug}/{}", tab.as_str()),
            Route::News => "/news".to_string(),
            Route::NewsDetail { id } => format!("/news/{id}"),
            Route::Events => "/events".to_string(),
            Route::EventDetail { id } => format!("/events/{id}"),
            Route::Investment => "/investment".to_string(),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Permalink(Url);

impl Permalink {
    pub fn from_route(config: &SiteConfig, route: &Route) -> Result<Self, url::ParseError> {
        Self::from_path(config, &route.path())
    }

    pub fn from_path(config: &SiteConfig, path: &str) -> Result<Self, url::ParseError> {
        let base_url = config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');

        Url::from_str(&format!("{base_url}/{path}")).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
