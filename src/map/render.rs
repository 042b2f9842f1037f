use palette::Srgb;
use serde::{Deserialize, Serialize};

use super::enrich::{EnrichedRecord, enrich};
use super::index::{CountryIndex, build_country_index};
use super::seed::{is_sorted_by_primary_metric, select_seed, validate_seed};
use crate::color::{self, Gradient};
use crate::data::filter::filter_records;
use crate::data::model::{ProjectionSeed, RawRecord};
use crate::error::MapError;
use crate::format::{NumberFormat, TooltipFormatter};
use crate::scale::{Scales, build_scales};

// ---------------------------------------------------------------------------
// Options and styling
// ---------------------------------------------------------------------------

/// Per-render settings chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Surface height in pixels.
    pub height: f32,
    /// Radius of the bubble with the largest `m2`.
    pub max_bubble_size: f64,
    pub show_bubbles: bool,
    /// Explicit projection centre. When unset the first input record is used.
    pub seed: Option<ProjectionSeed>,
    /// Formatting of metric values in hover labels.
    pub number_format: NumberFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            height: 600.0,
            max_bubble_size: 25.0,
            show_bubbles: true,
            seed: None,
            number_format: NumberFormat::default(),
        }
    }
}

/// Stroke and highlight settings for country shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographyStyle {
    pub border_width: f32,
    pub border_color: Srgb<u8>,
    pub highlight_fill: Srgb<u8>,
    pub highlight_border_color: Srgb<u8>,
    pub highlight_border_width: f32,
}

/// Look of the bubble markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleStyle {
    /// Fill for every bubble; the per-country `fill_color` is not used here.
    pub fill: Srgb<u8>,
    pub fill_opacity: f32,
    pub border_width: f32,
    pub border_color: Srgb<u8>,
    pub highlight_fill: Srgb<u8>,
    pub highlight_fill_opacity: f32,
    pub highlight_border_color: Srgb<u8>,
    pub highlight_border_width: f32,
}

/// Fixed renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapStyle {
    pub gradient: Gradient,
    /// Fill for countries absent from the index.
    pub default_fill: Srgb<u8>,
    /// Mercator scale factor.
    pub projection_scale: f64,
    pub geography: GeographyStyle,
    pub bubbles: BubbleStyle,
}

impl Default for MapStyle {
    fn default() -> Self {
        MapStyle {
            gradient: Gradient::default(),
            default_fill: color::DEFAULT_FILL,
            projection_scale: 300.0,
            geography: GeographyStyle {
                border_width: 1.0,
                border_color: Srgb::new(0xff, 0xff, 0xff),
                highlight_fill: Srgb::new(0x14, 0x16, 0x33),
                highlight_border_color: Srgb::new(0xff, 0xff, 0xff),
                highlight_border_width: 1.0,
            },
            bubbles: BubbleStyle {
                fill: color::BUBBLE_ACCENT,
                fill_opacity: 0.5,
                border_width: 1.0,
                border_color: color::BUBBLE_ACCENT,
                highlight_fill: color::BUBBLE_ACCENT,
                highlight_fill_opacity: 0.85,
                highlight_border_color: Srgb::new(0, 0, 0),
                highlight_border_width: 2.0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// What a surface is handed
// ---------------------------------------------------------------------------

/// Mercator projection parameters. Surfaces translate the centre to the
/// middle of their own drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub center: ProjectionSeed,
    pub scale: f64,
}

/// Point feature for one bubble.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleFeature {
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub name: String,
    /// Metric shown in the hover label (`m2`).
    pub value: f64,
}

impl From<&EnrichedRecord> for BubbleFeature {
    fn from(rec: &EnrichedRecord) -> Self {
        BubbleFeature {
            country: rec.record.country.clone(),
            latitude: rec.record.latitude,
            longitude: rec.record.longitude,
            radius: rec.radius,
            name: rec.record.name.clone(),
            value: rec.record.m2,
        }
    }
}

pub struct ChoroplethLayer<'a> {
    pub index: &'a CountryIndex,
    pub default_fill: Srgb<u8>,
    pub style: &'a GeographyStyle,
    pub tooltip: &'a TooltipFormatter,
}

pub struct BubbleLayer<'a> {
    pub features: &'a [BubbleFeature],
    pub style: &'a BubbleStyle,
    pub tooltip: &'a TooltipFormatter,
}

/// A drawing target for the world map.
///
/// Implementations own all projection, rasterization and hit-testing.
pub trait MapSurface {
    fn set_height(&mut self, height: f32);

    /// Drop everything drawn by a previous render.
    fn clear(&mut self);

    fn draw_choropleth(&mut self, projection: &Projection, layer: &ChoroplethLayer<'_>);

    fn draw_bubbles(&mut self, projection: &Projection, layer: &BubbleLayer<'_>);
}

// ---------------------------------------------------------------------------
// Render entry point
// ---------------------------------------------------------------------------

/// Everything one render computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    pub scales: Scales,
    pub records: Vec<EnrichedRecord>,
    pub index: CountryIndex,
    pub seed: ProjectionSeed,
}

/// Draw `records` onto `surface`.
///
/// `records` must be sorted by `m1` in descending order: unless
/// `options.seed` is set, the map is centred on the first record. A warning is
/// logged when the order does not hold.
///
/// All data preparation happens before the surface is touched, so a failed
/// render leaves the surface exactly as it was.
pub fn render<S: MapSurface + ?Sized>(
    surface: &mut S,
    records: &[RawRecord],
    options: &RenderOptions,
    style: &MapStyle,
) -> Result<RenderedMap, MapError> {
    if records.is_empty() {
        return Err(MapError::EmptyDataset { stage: "render" });
    }
    if options.seed.is_none() && !is_sorted_by_primary_metric(records) {
        log::warn!("records are not sorted by m1 descending; map centre may be off");
    }

    let filtered = filter_records(records);
    log::debug!(
        "filter: kept {} of {} records",
        filtered.len(),
        records.len()
    );

    let scales = build_scales(&filtered, options.max_bubble_size, style.gradient)?;
    let enriched = enrich(&filtered, &scales);
    let index = build_country_index(&enriched);
    let seed = match options.seed {
        Some(seed) => validate_seed(seed)?,
        None => select_seed(records)?,
    };

    let projection = Projection {
        center: seed,
        scale: style.projection_scale,
    };
    let tooltip = TooltipFormatter::new(options.number_format);

    surface.set_height(options.height);
    surface.clear();
    surface.draw_choropleth(
        &projection,
        &ChoroplethLayer {
            index: &index,
            default_fill: style.default_fill,
            style: &style.geography,
            tooltip: &tooltip,
        },
    );

    if options.show_bubbles {
        let features: Vec<BubbleFeature> = enriched.iter().map(BubbleFeature::from).collect();
        surface.draw_bubbles(
            &projection,
            &BubbleLayer {
                features: &features,
                style: &style.bubbles,
                tooltip: &tooltip,
            },
        );
    }

    log::info!(
        "rendered {} countries centred on ({}, {})",
        index.len(),
        seed.latitude,
        seed.longitude
    );

    Ok(RenderedMap {
        scales,
        records: enriched,
        index,
        seed,
    })
}
