use std::fmt;

use crate::content::Destination;

/// The fixed topics the assistant recognizes, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Greeting,
    About,
    Destinations,
    Tours,
    Contact,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topic::Greeting => "greeting",
            Topic::About => "about",
            Topic::Destinations => "destinations",
            Topic::Tours => "tours",
            Topic::Contact => "contact",
        };

        write!(f, "{name}")
    }
}

/// A topic, the substrings that trigger it, and its canned reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub topic: Topic,
    triggers: Vec<String>,
    reply: String,
}

impl KeywordRule {
    /// Returns a new [`KeywordRule`]. Triggers are lowercased; empty ones are
    /// dropped.
    pub fn new<T>(topic: Topic, triggers: impl IntoIterator<Item = T>, reply: impl Into<String>) -> Self
    where
        T: AsRef<str>,
    {
        Self {
            topic,
            triggers: triggers
                .into_iter()
                .map(|trigger| trigger.as_ref().trim().to_lowercase())
                .filter(|trigger| !trigger.is_empty())
                .collect(),
            reply: reply.into(),
        }
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// Whether any trigger occurs in `input`, which must already be lowercase.
    fn matches(&self, input: &str) -> bool {
        !self.reply.is_empty() && self.triggers.iter().any(|trigger| input.contains(trigger.as_str()))
    }
}

/// The rules the assistant ships with, in priority order.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            Topic::Greeting,
            ["hello", "hi", "hey", "jambo", "habari", "good morning", "good afternoon"],
            "Jambo! Welcome to TAWA. I can tell you about our game reserves, tours, \
             and how to reach us. What would you like to know?",
        ),
        KeywordRule::new(
            Topic::About,
            ["about", "tawa", "authority", "who are you", "mission"],
            "The Tanzania Wildlife Management Authority conserves and manages wildlife \
             in game reserves, game controlled areas, and wildlife management areas \
             across Tanzania.",
        ),
        KeywordRule::new(
            Topic::Destinations,
            ["destination", "reserve", "park", "where", "place", "visit"],
            "We manage reserves across the country, each with its own landscapes and \
             wildlife. Name one and I'll tell you more, or open the Destinations page \
             to browse them all.",
        ),
        KeywordRule::new(
            Topic::Tours,
            ["tour", "safari", "price", "cost", "book", "package", "trip"],
            "Every destination offers guided tours, from boat and walking safaris to \
             multi-day game drives. See a destination's Tours tab for durations and \
             prices.",
        ),
        KeywordRule::new(
            Topic::Contact,
            ["contact", "phone", "email", "call", "address", "office"],
            "You can reach our head office in Morogoro by phone or email. All contact \
             details are on the Contact page.",
        ),
    ]
}

pub const DEFAULT_FALLBACK: &str = "I can help with information about our destinations, \
    tours and safaris, contacting us, and the authority itself. Try asking about a \
    game reserve by name!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    Topic(Topic),
    Destination { slug: String },
    Fallback,
}

/// A reply and what produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub kind: ResponseKind,
    pub text: String,
}

/// Answers free-text questions with canned replies.
///
/// Matching is plain, case-insensitive substring search:
///
/// 1. the first rule (in order) with any trigger in the input wins,
/// 2. otherwise the first destination (in authored order) whose slug or
///    name appears in the input gets a reply describing it,
/// 3. otherwise the fallback reply.
pub struct Responder<'a> {
    rules: Vec<KeywordRule>,
    destinations: &'a [Destination],
    fallback: String,
}

impl<'a> Responder<'a> {
    /// Returns a new [`Responder`] with the default rules.
    pub fn new(destinations: &'a [Destination]) -> Self {
        Self {
            rules: default_rules(),
            destinations,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    /// Replaces the rules. Their order is their priority.
    pub fn with_rules(mut self, rules: Vec<KeywordRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Replaces the fallback reply. An empty fallback is ignored.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        if !fallback.trim().is_empty() {
            self.fallback = fallback;
        }
        self
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn respond(&self, input: &str) -> Response {
        let input = input.to_lowercase();

        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(&input)) {
            return Response {
                kind: ResponseKind::Topic(rule.topic),
                text: rule.reply.clone(),
            };
        }

        if let Some(destination) = self
            .destinations
            .iter()
            .find(|destination| mentions_destination(&input, destination))
        {
            return Response {
                kind: ResponseKind::Destination {
                    slug: destination.slug.clone(),
                },
                text: describe_destination(destination),
            };
        }

        Response {
            kind: ResponseKind::Fallback,
            text: self.fallback.clone(),
        }
    }
}

fn mentions_destination(input: &str, destination: &Destination) -> bool {
    let slug = destination.slug.to_lowercase();
    let name = destination.name.to_lowercase();

    (!slug.is_empty() && input.contains(&slug)) || (!name.is_empty() && input.contains(&name))
}

fn describe_destination(destination: &Destination) -> String {
    let mut reply = format!(
        "{}: {} It covers {} and is home to more than {} species.",
        destination.name,
        destination.description.trim(),
        destination.stats.area,
        destination.stats.species
    );

    let highlights = destination
        .wildlife
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>();

    if !highlights.is_empty() {
        reply.push_str(&format!(" Look out for {}.", highlights.join(", ")));
    }

    reply
}
