//! A typed filter/sort/render pipeline for legislative bill feeds.
//!
//! The library loads a bill feed once, derives the filter options and summary
//! statistics, and redraws a card list on a [`Surface`] every time one of the
//! search, jurisdiction, status or sort controls changes.

pub mod config;
pub mod controller;
pub mod dates;
pub mod error;
pub mod feed;
pub mod filter;
pub mod render;
pub mod sort;
pub mod stats;
pub mod surface;
pub mod types;

pub use config::{
    Config, ConfigBuilder, FileConfig, FilterCriteria, JurisdictionFilter, SortKey, StatusFilter,
};
pub use controller::{BillBoard, ControlEvent, LoadState};
pub use error::{Error, LoadError, Result};
pub use feed::{decode_feed, load_collection, FeedLocation, FeedSource, FileSource, HttpSource, StaticSource};
pub use filter::{apply, jurisdiction_options, BillFilter, FilterManager, FilterResult};
pub use render::StatusClass;
pub use stats::Statistics;
pub use surface::{HtmlSurface, Surface};
pub use types::{BillCollection, BillRecord, Sponsor, FEDERAL_CODE, FEDERAL_NAME};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, FilterCriteria, SortKey};
    pub use crate::controller::{BillBoard, ControlEvent};
    pub use crate::error::{Error, LoadError, Result};
    pub use crate::feed::{FeedLocation, FeedSource};
    pub use crate::surface::{HtmlSurface, Surface};
    pub use crate::types::{BillCollection, BillRecord};
}
