//! Discovery view pipeline: facets, sort and search text in, rows and
//! page state out.

mod controller;
mod latest;

pub use controller::DiscoverController;
pub use latest::LatestSlot;
