use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::content::{EventItem, NewsItem};
use crate::date::parse_date;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest to newest.
    Ascending,
    /// Newest to oldest.
    Descending,
}

/// Anything that carries an authored date.
pub trait Dated {
    fn date(&self) -> &str;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> &str {
        (**self).date()
    }
}

impl Dated for NewsItem {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for EventItem {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Sorts items by date in the given order.
///
/// The sort is stable: items with equal dates keep their input order.
/// Items whose date doesn't parse are moved to the end, in input order,
/// regardless of `order`.
pub fn sort_by_date<T: Dated>(items: Vec<T>, order: SortOrder) -> Vec<T> {
    let (mut sortable, not_sortable): (Vec<(Option<NaiveDateTime>, T)>, Vec<_>) = items
        .into_iter()
        .map(|item| (parse_date(item.date()), item))
        .partition(|(date, _)| date.is_some());

    sortable.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Ascending => a.cmp(b),
        SortOrder::Descending => b.cmp(a),
    });

    sortable
        .into_iter()
        .chain(not_sortable)
        .map(|(_, item)| item)
        .collect()
}
