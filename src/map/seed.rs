use crate::data::model::{ProjectionSeed, RawRecord};
use crate::error::MapError;

/// Centre the projection on the first raw record.
///
/// Reads the unfiltered input: with rows sorted by `m1` descending this is
/// the largest value, even when its country is unknown.
pub fn select_seed(records: &[RawRecord]) -> Result<ProjectionSeed, MapError> {
    let first = records
        .first()
        .ok_or(MapError::EmptyDataset { stage: "projection seed selection" })?;
    validate_seed(ProjectionSeed {
        latitude: first.latitude,
        longitude: first.longitude,
    })
}

/// Reject a seed with a NaN or infinite coordinate.
pub fn validate_seed(seed: ProjectionSeed) -> Result<ProjectionSeed, MapError> {
    if seed.latitude.is_finite() && seed.longitude.is_finite() {
        Ok(seed)
    } else {
        log::warn!(
            "projection seed ({}, {}) is not a finite coordinate",
            seed.latitude,
            seed.longitude
        );
        Err(MapError::InvalidSeed {
            latitude: seed.latitude,
            longitude: seed.longitude,
        })
    }
}

/// Whether `records` are in non-increasing order of `m1`.
///
/// NaN values are skipped.
pub fn is_sorted_by_primary_metric(records: &[RawRecord]) -> bool {
    records
        .iter()
        .map(|r| r.m1)
        .filter(|m| !m.is_nan())
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| w[0] >= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_first_raw_coordinate() {
        let records = vec![
            RawRecord {
                country: None,
                latitude: -12.5,
                longitude: 130.0,
                name: "unattributed".into(),
                m1: 999.0,
                m2: 1.0,
            },
            RawRecord::new("FRA", 46.0, 2.0, "France", 10.0, 5.0),
        ];

        let seed = select_seed(&records).unwrap();
        assert_eq!(seed, ProjectionSeed { latitude: -12.5, longitude: 130.0 });
    }

    #[test]
    fn empty_input_has_no_seed() {
        assert_eq!(
            select_seed(&[]),
            Err(MapError::EmptyDataset { stage: "projection seed selection" })
        );
    }

    #[test]
    fn missing_first_coordinate_is_rejected() {
        let mut first = RawRecord::new("USA", 38.0, -97.0, "United States", 100.0, 50.0);
        first.longitude = f64::NAN;
        let records = vec![first, RawRecord::new("FRA", 46.0, 2.0, "France", 10.0, 5.0)];

        match select_seed(&records) {
            Err(MapError::InvalidSeed { latitude, longitude }) => {
                assert_eq!(latitude, 38.0);
                assert!(longitude.is_nan());
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let infinite = ProjectionSeed { latitude: f64::INFINITY, longitude: 0.0 };
        assert!(validate_seed(infinite).is_err());
    }

    #[test]
    fn detects_unsorted_input() {
        let sorted = vec![
            RawRecord::new("USA", 0.0, 0.0, "", 100.0, 0.0),
            RawRecord::new("FRA", 0.0, 0.0, "", 10.0, 0.0),
            RawRecord::new("ITA", 0.0, 0.0, "", 10.0, 0.0),
        ];
        assert!(is_sorted_by_primary_metric(&sorted));

        let unsorted = vec![
            RawRecord::new("FRA", 0.0, 0.0, "", 10.0, 0.0),
            RawRecord::new("USA", 0.0, 0.0, "", 100.0, 0.0),
        ];
        assert!(!is_sorted_by_primary_metric(&unsorted));
        assert!(is_sorted_by_primary_metric(&[]));
    }
}
