use super::model::{CountryRecord, RawRecord};

// ---------------------------------------------------------------------------
// Record filter: drop rows without a usable country code
// ---------------------------------------------------------------------------

/// Country code used by the source query for rows it could not attribute.
pub const UNKNOWN_COUNTRY: &str = "XXX";

/// Whether `country` names a real country.
///
/// A country passes when:
/// * it is present and non-empty
/// * it is not the [`UNKNOWN_COUNTRY`] sentinel
pub fn is_known_country(country: Option<&str>) -> bool {
    matches!(country, Some(code) if !code.is_empty() && code != UNKNOWN_COUNTRY)
}

/// Keep the records with a known country, in input order.
///
/// Unknown rows are excluded so they do not stretch the metric extents.
pub fn filter_records(records: &[RawRecord]) -> Vec<CountryRecord> {
    records
        .iter()
        .filter_map(|rec| {
            let country = rec.country.as_deref()?;
            if !is_known_country(Some(country)) {
                return None;
            }
            Some(CountryRecord {
                country: country.to_string(),
                latitude: rec.latitude,
                longitude: rec.longitude,
                name: rec.name.clone(),
                m1: rec.m1,
                m2: rec.m2,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(country: Option<&str>, m1: f64) -> RawRecord {
        RawRecord {
            country: country.map(str::to_string),
            latitude: 0.0,
            longitude: 0.0,
            name: country.unwrap_or("none").to_string(),
            m1,
            m2: 1.0,
        }
    }

    #[test]
    fn drops_missing_empty_and_sentinel_countries() {
        let records = vec![
            raw(Some("USA"), 5.0),
            raw(None, 4.0),
            raw(Some(""), 3.0),
            raw(Some(UNKNOWN_COUNTRY), 2.0),
            raw(Some("FRA"), 1.0),
        ];

        let filtered = filter_records(&records);
        let codes: Vec<&str> = filtered.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(codes, ["USA", "FRA"]);
    }

    #[test]
    fn preserves_input_order_and_duplicates() {
        let records = vec![
            raw(Some("DEU"), 1.0),
            raw(Some("BRA"), 9.0),
            raw(Some("DEU"), 3.0),
        ];

        let filtered = filter_records(&records);
        let m1s: Vec<f64> = filtered.iter().map(|r| r.m1).collect();
        assert_eq!(m1s, [1.0, 9.0, 3.0]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(filter_records(&[]).is_empty());
    }

    #[test]
    fn sentinel_is_case_sensitive() {
        assert!(is_known_country(Some("xxx")));
        assert!(!is_known_country(Some("XXX")));
        assert!(!is_known_country(None));
    }
}
