//! A typed pipeline for browsing legislation.
//!
//! Loads a static bills document, derives the visible subset from a query
//! (search, status, jurisdiction, sort), and renders it as escaped HTML cards,
//! a complete static page, or an RSS feed.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod loader;
pub mod logging;
pub mod page;
pub mod query;
pub mod render;
pub mod stats;
pub mod status;
pub mod surface;
pub mod types;

pub use app::{BillStore, Tracker};
pub use config::{Config, ConfigBuilder};
pub use engine::filter_sort;
pub use error::{Error, LoadError, Result};
pub use loader::BillSource;
pub use query::{Coverage, JurisdictionFilter, QueryState, SortOrder, StatusFilter};
pub use stats::Statistics;
pub use status::StatusCategory;
pub use surface::{DisplaySurface, PageSurface};
pub use types::{Bill, BillCollection, Sponsor};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::app::Tracker;
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::error::{Error, LoadError, Result};
    pub use crate::loader::BillSource;
    pub use crate::query::{Coverage, QueryState, SortOrder};
    pub use crate::surface::{DisplaySurface, PageSurface};
    pub use crate::types::{Bill, BillCollection};
}
