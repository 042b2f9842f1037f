use palette::Srgb;

use crate::color::Gradient;
use crate::data::model::CountryRecord;
use crate::error::{MapError, Metric};

/// Smallest bubble radius, in pixels.
pub const MIN_BUBBLE_RADIUS: f64 = 1.0;

// ---------------------------------------------------------------------------
// Extent – [min, max] of a metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Extent of `metric` over `records`.
    ///
    /// Fails on an empty slice and on the first non-finite value.
    pub fn of(records: &[CountryRecord], metric: Metric) -> Result<Self, MapError> {
        let mut extent: Option<Extent> = None;
        for rec in records {
            let value = match metric {
                Metric::M1 => rec.m1,
                Metric::M2 => rec.m2,
            };
            if !value.is_finite() {
                return Err(MapError::InvalidMetric {
                    country: rec.country.clone(),
                    metric,
                    value,
                });
            }
            extent = Some(match extent {
                None => Extent { min: value, max: value },
                Some(e) => Extent {
                    min: e.min.min(value),
                    max: e.max.max(value),
                },
            });
        }
        extent.ok_or(MapError::EmptyDataset { stage: "scale construction" })
    }

    /// A single-valued extent cannot be normalized against.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Position of `value` in the extent; `0.0` at `min`, `1.0` at `max`.
    /// Not clamped. `None` for a degenerate extent.
    fn normalize(&self, value: f64) -> Option<f64> {
        if self.is_degenerate() {
            None
        } else {
            Some((value - self.min) / (self.max - self.min))
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric and colour scales
// ---------------------------------------------------------------------------

/// Linear map from a metric extent onto a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: Extent,
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: Extent, range: [f64; 2]) -> Self {
        LinearScale { domain, range }
    }

    /// Scale `value`. Values outside the domain extrapolate; a degenerate
    /// domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let [lo, hi] = self.range;
        match self.domain.normalize(value) {
            Some(t) => lo + (hi - lo) * t,
            None => (lo + hi) / 2.0,
        }
    }
}

/// Linear map from a metric extent onto a [`Gradient`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub domain: Extent,
    pub gradient: Gradient,
}

impl ColorScale {
    pub fn new(domain: Extent, gradient: Gradient) -> Self {
        ColorScale { domain, gradient }
    }

    /// Colour for `value`; same extrapolation and degenerate rules as
    /// [`LinearScale::apply`].
    pub fn apply(&self, value: f64) -> Srgb<u8> {
        match self.domain.normalize(value) {
            Some(t) => self.gradient.at(t),
            None => self.gradient.midpoint(),
        }
    }

    /// `n` evenly spaced (value, colour) stops across the domain, for legends.
    pub fn legend_entries(&self, n: usize) -> Vec<(f64, Srgb<u8>)> {
        if n == 0 {
            return Vec::new();
        }
        if n == 1 || self.domain.is_degenerate() {
            return vec![(self.domain.min, self.apply(self.domain.min))];
        }
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                let value = self.domain.min + (self.domain.max - self.domain.min) * t;
                (value, self.apply(value))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Scale builder
// ---------------------------------------------------------------------------

/// The two scales one render uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    /// `m1` → choropleth fill.
    pub color: ColorScale,
    /// `m2` → bubble radius.
    pub radius: LinearScale,
}

/// Build the colour scale (from `m1`) and the radius scale (from `m2`, onto
/// `[1, max_bubble_size]`) over the filtered records.
pub fn build_scales(
    records: &[CountryRecord],
    max_bubble_size: f64,
    gradient: Gradient,
) -> Result<Scales, MapError> {
    let color_domain = Extent::of(records, Metric::M1)?;
    let radius_domain = Extent::of(records, Metric::M2)?;

    log::debug!(
        "scales: m1 in [{}, {}], m2 in [{}, {}]",
        color_domain.min,
        color_domain.max,
        radius_domain.min,
        radius_domain.max
    );

    Ok(Scales {
        color: ColorScale::new(color_domain, gradient),
        radius: LinearScale::new(radius_domain, [MIN_BUBBLE_RADIUS, max_bubble_size]),
    })
}
