//! Content engine for the Tanzania Wildlife Management Authority site.
//!
//! Loads destinations, news, and events from markdown files with TOML front
//! matter, merges and orders them for display, answers visitor questions
//! with a keyword responder, and translates the UI into the supported
//! locales.
//!
//! ```no_run
//! use tawa::Site;
//!
//! let site = Site::builder().root("site").load()?;
//! let ctx = site.render_context(site.config().default_locale);
//!
//! for news in ctx.latest_news(4) {
//!     println!("{} ({})", news.title, news.date);
//! }
//! # Ok::<(), tawa::LoadSiteError>(())
//! ```

pub mod chat;
mod config;
pub mod content;
pub mod date;
pub mod i18n;
pub mod permalink;
pub mod render;
mod site;
pub mod storage;

pub use config::*;
pub use site::*;
