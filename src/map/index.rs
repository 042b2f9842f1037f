use std::collections::BTreeMap;

use super::enrich::EnrichedRecord;

// ---------------------------------------------------------------------------
// CountryIndex – country code → enriched record
// ---------------------------------------------------------------------------

/// Per-country lookup used for choropleth fills.
///
/// Keys are unique. When several records share a country code the one that
/// came last wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryIndex {
    entries: BTreeMap<String, EnrichedRecord>,
}

impl CountryIndex {
    pub fn get(&self, country: &str) -> Option<&EnrichedRecord> {
        self.entries.get(country)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.entries.contains_key(country)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Country codes in sorted order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnrichedRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Fold enriched records into a [`CountryIndex`], last write wins.
pub fn build_country_index(records: &[EnrichedRecord]) -> CountryIndex {
    let mut entries = BTreeMap::new();
    for rec in records {
        if let Some(previous) = entries.insert(rec.record.country.clone(), rec.clone()) {
            log::debug!(
                "country index: '{}' overwritten ({} replaced by {})",
                previous.record.country,
                previous.record.name,
                rec.record.name
            );
        }
    }
    CountryIndex { entries }
}

#[cfg(test)]
mod tests {
    use palette::Srgb;

    use super::*;
    use crate::data::model::CountryRecord;

    fn enriched(country: &str, name: &str, radius: f64) -> EnrichedRecord {
        EnrichedRecord {
            record: CountryRecord {
                country: country.to_string(),
                latitude: 0.0,
                longitude: 0.0,
                name: name.to_string(),
                m1: 0.0,
                m2: 0.0,
            },
            radius,
            fill_color: Srgb::new(0, 0, 0),
        }
    }

    #[test]
    fn later_record_wins_on_duplicate_country() {
        let records = vec![
            enriched("DEU", "first", 1.0),
            enriched("ITA", "italy", 2.0),
            enriched("DEU", "second", 3.0),
        ];

        let index = build_country_index(&records);
        assert_eq!(index.len(), 2);

        let deu = index.get("DEU").unwrap();
        assert_eq!(deu.record.name, "second");
        assert_eq!(deu.radius, 3.0);
    }

    #[test]
    fn keys_are_sorted_country_codes() {
        let records = vec![enriched("USA", "a", 1.0), enriched("FRA", "b", 1.0)];
        let index = build_country_index(&records);

        let keys: Vec<&str> = index.countries().collect();
        assert_eq!(keys, ["FRA", "USA"]);
        assert!(index.contains("USA"));
        assert!(!index.contains("XXX"));
    }

    #[test]
    fn empty_input_gives_empty_index() {
        assert!(build_country_index(&[]).is_empty());
    }
}
