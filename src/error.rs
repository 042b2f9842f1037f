use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Which metric column a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Primary metric, drives the choropleth colour.
    M1,
    /// Secondary metric, drives the bubble radius.
    M2,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::M1 => write!(f, "m1"),
            Metric::M2 => write!(f, "m2"),
        }
    }
}

/// Errors raised by the render pipeline. None of them are recoverable inside
/// the pipeline; they are handed back to the render caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// No records were left for a stage that needs at least one.
    #[error("empty dataset: no records available for {stage}")]
    EmptyDataset { stage: &'static str },

    /// A metric reaching enrichment is NaN or infinite.
    #[error("invalid {metric} value {value} for country '{country}'")]
    InvalidMetric {
        country: String,
        metric: Metric,
        value: f64,
    },

    /// The projection centre has a NaN or infinite coordinate.
    #[error("invalid projection seed ({latitude}, {longitude})")]
    InvalidSeed { latitude: f64, longitude: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_stage_and_metric() {
        let err = MapError::EmptyDataset { stage: "scale construction" };
        assert_eq!(
            err.to_string(),
            "empty dataset: no records available for scale construction"
        );

        let err = MapError::InvalidMetric {
            country: "FRA".into(),
            metric: Metric::M2,
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "invalid m2 value inf for country 'FRA'");

        let err = MapError::InvalidSeed { latitude: f64::NAN, longitude: 2.0 };
        assert_eq!(err.to_string(), "invalid projection seed (NaN, 2)");
    }
}
