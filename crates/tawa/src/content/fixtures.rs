//! Builders for content used across the test suites.

use crate::content::{Destination, DestinationStats, EventItem, NewsItem, Tour};

pub fn destination(slug: &str, name: &str) -> Destination {
    Destination {
        id: slug.to_string(),
        slug: slug.to_string(),
        name: name.to_string(),
        tagline: String::new(),
        description: format!("{name} is a protected area."),
        long_description: String::new(),
        image: format!("/images/destinations/{slug}.jpg"),
        wildlife: Vec::new(),
        area: "1,000 km²".to_string(),
        established: "1974".to_string(),
        stats: DestinationStats {
            area: "1,000 km²".to_string(),
            species: 100,
            visitors: "1,000+".to_string(),
        },
        tours: Vec::new(),
        news: Vec::new(),
    }
}

pub fn tour(id: &str, name: &str) -> Tour {
    Tour {
        id: id.to_string(),
        name: name.to_string(),
        duration: "1 day".to_string(),
        price: 100.0,
        highlights: Vec::new(),
        description: String::new(),
    }
}

pub fn news(id: &str, date: &str) -> NewsItem {
    NewsItem {
        id: id.to_string(),
        title: format!("News {id}"),
        date: date.to_string(),
        excerpt: String::new(),
        image: None,
        content: String::new(),
    }
}

pub fn event(id: &str, date: &str) -> EventItem {
    EventItem {
        id: id.to_string(),
        title: format!("Event {id}"),
        date: date.to_string(),
        location: "Dodoma".to_string(),
        excerpt: String::new(),
        description: None,
        image: None,
    }
}
