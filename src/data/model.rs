use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RawRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single country/metric observation exactly as it was loaded.
///
/// Rows are expected in descending order of `m1`; nothing downstream sorts
/// them again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// ISO-like country code. `None` when the source cell was empty or null.
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Primary metric (choropleth colour).
    pub m1: f64,
    /// Secondary metric (bubble size).
    pub m2: f64,
}

impl RawRecord {
    /// Convenience constructor for a record with a known country code.
    pub fn new(
        country: &str,
        latitude: f64,
        longitude: f64,
        name: &str,
        m1: f64,
        m2: f64,
    ) -> Self {
        RawRecord {
            country: Some(country.to_string()),
            latitude,
            longitude,
            name: name.to_string(),
            m1,
            m2,
        }
    }
}

// ---------------------------------------------------------------------------
// CountryRecord – a raw record that survived filtering
// ---------------------------------------------------------------------------

/// A record whose country code is present and known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub m1: f64,
    pub m2: f64,
}

// ---------------------------------------------------------------------------
// ProjectionSeed – initial map centre
// ---------------------------------------------------------------------------

/// Geographic coordinate the projection is centred on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeed {
    pub latitude: f64,
    pub longitude: f64,
}
