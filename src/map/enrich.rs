use palette::Srgb;

use crate::data::model::CountryRecord;
use crate::scale::Scales;

// ---------------------------------------------------------------------------
// EnrichedRecord – a country record with its derived visual values
// ---------------------------------------------------------------------------

/// A filtered record plus the values both scales derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: CountryRecord,
    /// Bubble radius in pixels, from `m2`.
    pub radius: f64,
    /// Choropleth fill, from `m1`.
    pub fill_color: Srgb<u8>,
}

impl EnrichedRecord {
    pub fn country(&self) -> &str {
        &self.record.country
    }
}

/// Apply both scales to every record, one output per input, order kept.
pub fn enrich(records: &[CountryRecord], scales: &Scales) -> Vec<EnrichedRecord> {
    records
        .iter()
        .map(|rec| EnrichedRecord {
            radius: scales.radius.apply(rec.m2),
            fill_color: scales.color.apply(rec.m1),
            record: rec.clone(),
        })
        .collect()
}
