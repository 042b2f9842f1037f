//! Data layer: record types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  .parquet / .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<RawRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  drop unknown countries → Vec<CountryRecord>
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
