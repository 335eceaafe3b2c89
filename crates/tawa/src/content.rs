mod aggregator;
mod destination;
mod event;
mod file_info;
mod front_matter;
mod image;
mod news;
mod repository;
mod sorting;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregator::*;
pub use destination::*;
pub use event::*;
pub use file_info::*;
pub use front_matter::*;
pub use image::*;
pub use news::*;
pub use repository::*;
pub use sorting::*;
