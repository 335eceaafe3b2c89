//! Locales, translation dictionaries, and the visitor's language choice.
//!
//! Content (destinations, news, events) is the same in every locale; only
//! the UI strings around it are translated. Lookups fall back to English,
//! then to the key itself, so a missing translation never breaks a page.

mod locale;
mod selection;
mod translations;

pub use locale::*;
pub use selection::*;
pub use translations::*;
