//! Data-to-visual pipeline for the world choropleth / bubble map.
//!
//! ```text
//!  raw records ──► data::filter ──► scale ──► map::enrich ──► map::index ──┐
//!       │                                                                  ▼
//!       └──────────────► map::seed ─────────────────────────────► MapSurface
//! ```

pub mod color;
pub mod data;
pub mod error;
pub mod format;
pub mod map;
pub mod scale;

pub use error::MapError;
