//! Map layer: everything between the filtered records and a drawing surface.
//!
//! ```text
//!   Vec<CountryRecord> ──► enrich ──► Vec<EnrichedRecord> ──► index ──► CountryIndex
//!   &[RawRecord] ──────────────────────────────────────────► seed ───► ProjectionSeed
//!                                                                 │
//!                                         render ◄────────────────┘
//!                                           │
//!                                           ▼
//!                                      MapSurface (egui canvas, JSON payload, …)
//! ```

pub mod enrich;
pub mod index;
pub mod payload;
pub mod render;
pub mod seed;
