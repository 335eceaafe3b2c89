use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::content::{
    sort_by_date, ContentRepository, Dated, Destination, EventItem, ImageRegistry, NewsItem,
    SortOrder, Tour,
};
use crate::date::local_date;
use crate::permalink::{DestinationTab, Route};

/// The destination a nested item was merged from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DestinationRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
}

impl<'a> From<&'a Destination> for DestinationRef<'a> {
    fn from(destination: &'a Destination) -> Self {
        Self {
            id: &destination.id,
            name: &destination.name,
            slug: &destination.slug,
        }
    }
}

/// A news item together with the destination it belongs to, if any.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct NewsEntry<'a> {
    pub item: &'a NewsItem,
    pub destination: Option<DestinationRef<'a>>,
}

impl<'a> NewsEntry<'a> {
    pub fn image(&self, images: &ImageRegistry) -> Option<String> {
        images.resolve_news_image(self.item.image.as_deref())
    }
}

impl Dated for NewsEntry<'_> {
    fn date(&self) -> &str {
        &self.item.date
    }
}

/// The first authored tour of a destination.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct FeaturedTour<'a> {
    pub tour: &'a Tour,
    pub destination: DestinationRef<'a>,
}

/// What a [`Route`] points at.
#[derive(Debug, PartialEq)]
pub enum Resolved<'a> {
    /// A listing or static page with nothing to look up.
    Page(Route),
    Destination {
        destination: &'a Destination,
        tab: DestinationTab,
    },
    News(NewsEntry<'a>),
    Event(&'a EventItem),
    /// Nothing matched; `listing` is the page to link back to.
    NotFound { listing: Route },
}

/// Builds the merged, sorted, and sliced views of the content that pages
/// display.
pub struct ContentAggregator<'a> {
    repository: &'a dyn ContentRepository,
}

impl<'a> ContentAggregator<'a> {
    /// Returns a new [`ContentAggregator`].
    pub fn new(repository: &'a dyn ContentRepository) -> Self {
        Self { repository }
    }

    pub fn destinations(&self) -> &'a [Destination] {
        self.repository.list_destinations()
    }

    /// Concatenates general news with every destination's news, in that
    /// order, without sorting.
    ///
    /// Destinations contribute in their authored order.
    pub fn merged_news(&self) -> Vec<NewsEntry<'a>> {
        let general = self
            .repository
            .list_general_news()
            .iter()
            .map(|item| NewsEntry {
                item,
                destination: None,
            });

        let nested = self
            .repository
            .list_destinations()
            .iter()
            .flat_map(|destination| {
                destination.news.iter().map(move |item| NewsEntry {
                    item,
                    destination: Some(DestinationRef::from(destination)),
                })
            });

        general.chain(nested).collect()
    }

    /// All news, newest first. Ties keep the order of [`merged_news`](Self::merged_news).
    pub fn all_news(&self) -> Vec<NewsEntry<'a>> {
        sort_by_date(self.merged_news(), SortOrder::Descending)
    }

    /// The `limit` newest news items.
    pub fn latest_news(&self, limit: usize) -> Vec<NewsEntry<'a>> {
        self.news_window(0, Some(limit))
    }

    /// Skips the `skip` newest items and returns up to `limit` of the rest.
    ///
    /// Pages that show the newest items in one section and "more news" in
    /// another use the same `skip` as the first section's limit, which keeps
    /// the two sections disjoint.
    pub fn news_window(&self, skip: usize, limit: Option<usize>) -> Vec<NewsEntry<'a>> {
        self.all_news()
            .into_iter()
            .skip(skip)
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// The news of a single destination, newest first.
    pub fn destination_news(&self, slug: &str) -> Option<Vec<NewsEntry<'a>>> {
        let destination = self.find_destination(slug)?;

        let entries = destination
            .news
            .iter()
            .map(|item| NewsEntry {
                item,
                destination: Some(DestinationRef::from(destination)),
            })
            .collect();

        Some(sort_by_date(entries, SortOrder::Descending))
    }

    /// The first authored tour of each destination that has any.
    pub fn featured_tours(&self) -> Vec<FeaturedTour<'a>> {
        self.repository
            .list_destinations()
            .iter()
            .filter_map(|destination| {
                destination.featured_tour().map(|tour| FeaturedTour {
                    tour,
                    destination: DestinationRef::from(destination),
                })
            })
            .collect()
    }

    /// Every event, oldest first. Past events are included.
    pub fn events(&self) -> Vec<&'a EventItem> {
        sort_by_date(
            self.repository.list_events().iter().collect(),
            SortOrder::Ascending,
        )
    }

    /// Events on or after `today`, oldest first. Event datetimes are compared
    /// by the day they fall on in `timezone`. Events with unparseable dates
    /// are left out.
    pub fn upcoming_events(&self, today: NaiveDate, timezone: Tz) -> Vec<&'a EventItem> {
        self.events()
            .into_iter()
            .filter(|event| local_date(&event.date, timezone).map_or(false, |date| date >= today))
            .collect()
    }

    pub fn find_destination(&self, slug: &str) -> Option<&'a Destination> {
        self.repository
            .list_destinations()
            .iter()
            .find(|destination| destination.slug == slug)
    }

    pub fn find_tour(&self, slug: &str, tour_id: &str) -> Option<FeaturedTour<'a>> {
        let destination = self.find_destination(slug)?;
        let tour = destination.tours.iter().find(|tour| tour.id == tour_id)?;

        Some(FeaturedTour {
            tour,
            destination: DestinationRef::from(destination),
        })
    }

    /// Looks up a news item by id across general and destination news.
    pub fn find_news(&self, id: &str) -> Option<NewsEntry<'a>> {
        self.merged_news().into_iter().find(|entry| entry.item.id == id)
    }

    pub fn find_event(&self, id: &str) -> Option<&'a EventItem> {
        self.repository
            .list_events()
            .iter()
            .find(|event| event.id == id)
    }

    /// Resolves a route to the content it addresses.
    pub fn resolve(&self, route: &Route) -> Resolved<'a> {
        match route {
            Route::Destination { slug, tab } => match self.find_destination(slug) {
                Some(destination) => Resolved::Destination {
                    destination,
                    tab: *tab,
                },
                None => Resolved::NotFound {
                    listing: Route::Destinations,
                },
            },
            Route::NewsDetail { id } => match self.find_news(id) {
                Some(entry) => Resolved::News(entry),
                None => Resolved::NotFound {
                    listing: Route::News,
                },
            },
            Route::EventDetail { id } => match self.find_event(id) {
                Some(event) => Resolved::Event(event),
                None => Resolved::NotFound {
                    listing: Route::Events,
                },
            },
            route => Resolved::Page(route.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::fixtures::{destination, event, news, tour};
    use crate::content::Repository;

    fn news_ids(entries: &[NewsEntry]) -> Vec<String> {
        entries.iter().map(|entry| entry.item.id.clone()).collect()
    }

    fn make_repository() -> Repository {
        let mut selous = destination("selous", "Selous Game Reserve");
        selous.news = vec![news("selous-census", "2024-12-05"), news("selous-road", "2024-06-01")];
        selous.tours = vec![tour("boat", "Boat Safari"), tour("walk", "Walking Safari")];

        let mut ugalla = destination("ugalla", "Ugalla River Game Reserve");
        ugalla.news = vec![news("ugalla-fire", "2024-09-10")];

        let pande = destination("pande", "Pande Game Reserve");

        Repository::new(
            vec![selous, ugalla, pande],
            vec![
                news("rangers", "2024-12-01"),
                news("poaching", "2024-03-15"),
                news("undated", "TBA"),
            ],
            vec![
                event("forum", "2025-03-20"),
                event("open-day", "2025-01-15"),
                event("expo", "2026-11-02"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_latest_news_merges_and_sorts() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        let latest = aggregator.latest_news(3);

        assert_eq!(news_ids(&latest), vec!["selous-census", "rangers", "ugalla-fire"]);
        assert_eq!(latest[1].destination, None);
        assert_eq!(
            latest[0].destination,
            Some(DestinationRef {
                id: "selous",
                name: "Selous Game Reserve",
                slug: "selous",
            })
        );
    }

    #[test]
    fn test_all_news_puts_unparseable_dates_last() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        assert_eq!(
            news_ids(&aggregator.all_news()),
            vec![
                "selous-census",
                "rangers",
                "ugalla-fire",
                "selous-road",
                "poaching",
                "undated"
            ]
        );
    }

    #[test]
    fn test_equal_dates_keep_general_news_first() {
        let mut d1 = destination("d1", "D1");
        d1.news = vec![news("B", "2024-01-01")];
        let repository = Repository::new(vec![d1], vec![news("A", "2024-01-01")], vec![]).unwrap();
        let aggregator = ContentAggregator::new(&repository);

        assert_eq!(news_ids(&aggregator.all_news()), vec!["A", "B"]);
    }

    #[test]
    fn test_news_window_does_not_overlap_latest() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        let shown = news_ids(&aggregator.latest_news(4));
        let more = news_ids(&aggregator.news_window(4, None));

        assert_eq!(more, vec!["poaching", "undated"]);
        assert!(more.iter().all(|id| !shown.contains(id)));
        assert_eq!(shown.len() + more.len(), aggregator.merged_news().len());

        assert_eq!(news_ids(&aggregator.news_window(1, Some(2))), vec!["rangers", "ugalla-fire"]);
        assert!(aggregator.news_window(50, Some(3)).is_empty());
    }

    #[test]
    fn test_featured_tours_take_the_first_tour() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        let featured = aggregator.featured_tours();

        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].tour.id, "boat");
        assert_eq!(featured[0].destination.slug, "selous");
    }

    #[test]
    fn test_events_include_past_events_in_ascending_order() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        let ids = aggregator
            .events()
            .iter()
            .map(|event| event.id.as_str())
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["open-day", "forum", "expo"]);
    }

    #[test]
    fn test_upcoming_events_filters_explicitly() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

        let ids = aggregator
            .upcoming_events(today, Tz::UTC)
            .iter()
            .map(|event| event.id.as_str())
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["forum", "expo"]);
    }

    #[test]
    fn test_upcoming_events_use_the_local_day() {
        let repository = Repository::new(
            vec![],
            vec![],
            vec![
                event("early", "2025-03-20T01:00:00+03:00"),
                event("late", "2025-03-19T23:00:00+03:00"),
            ],
        )
        .unwrap();
        let aggregator = ContentAggregator::new(&repository);
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

        let ids = aggregator
            .upcoming_events(today, chrono_tz::Africa::Dar_es_Salaam)
            .iter()
            .map(|event| event.id.as_str())
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["early"]);
    }

    #[test]
    fn test_lookups() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        let entry = aggregator.find_news("ugalla-fire").unwrap();
        assert_eq!(entry.destination.map(|destination| destination.slug), Some("ugalla"));
        assert_eq!(aggregator.find_news("rangers").unwrap().destination, None);
        assert_eq!(aggregator.find_news("missing"), None);

        assert_eq!(aggregator.find_event("expo").map(|event| event.id.as_str()), Some("expo"));
        assert_eq!(aggregator.find_event("missing"), None);

        assert_eq!(
            aggregator.find_tour("selous", "walk").map(|featured| featured.tour.name.as_str()),
            Some("Walking Safari")
        );
        assert_eq!(aggregator.find_tour("ugalla", "walk"), None);
        assert_eq!(aggregator.find_destination("serengeti"), None);
    }

    #[test]
    fn test_destination_news() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        assert_eq!(
            news_ids(&aggregator.destination_news("selous").unwrap()),
            vec!["selous-census", "selous-road"]
        );
        assert_eq!(aggregator.destination_news("pande"), Some(Vec::new()));
        assert_eq!(aggregator.destination_news("nowhere"), None);
    }

    #[test]
    fn test_resolve_routes() {
        let repository = make_repository();
        let aggregator = ContentAggregator::new(&repository);

        assert!(matches!(
            aggregator.resolve(&Route::Destination {
                slug: "selous".to_string(),
                tab: DestinationTab::Tours,
            }),
            Resolved::Destination {
                tab: DestinationTab::Tours,
                ..
            }
        ));
        assert_eq!(
            aggregator.resolve(&Route::NewsDetail {
                id: "missing".to_string()
            }),
            Resolved::NotFound {
                listing: Route::News
            }
        );
        assert_eq!(
            aggregator.resolve(&Route::EventDetail {
                id: "missing".to_string()
            }),
            Resolved::NotFound {
                listing: Route::Events
            }
        );
        assert_eq!(
            aggregator.resolve(&Route::Destination {
                slug: "missing".to_string(),
                tab: DestinationTab::Home,
            }),
            Resolved::NotFound {
                listing: Route::Destinations
            }
        );
        assert_eq!(aggregator.resolve(&Route::Investment), Resolved::Page(Route::Investment));
    }
}
