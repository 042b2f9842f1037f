use serde::Serialize;

use super::render::{BubbleLayer, ChoroplethLayer, MapSurface, Projection};
use crate::color::to_hex;

// ---------------------------------------------------------------------------
// PayloadSurface – captures what a renderer is handed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryFill {
    pub country: String,
    pub fill: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleMark {
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub fill: String,
    pub fill_opacity: f32,
    pub label: String,
}

/// A surface that stores the render payload instead of drawing it.
///
/// Serializes to the JSON a web map widget would consume, and serves as the
/// surface in pipeline tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayloadSurface {
    pub height: Option<f32>,
    pub projection: Option<Projection>,
    pub default_fill: Option<String>,
    pub countries: Vec<CountryFill>,
    pub bubbles: Vec<BubbleMark>,
    /// Number of times the surface was cleared.
    #[serde(skip)]
    pub clears: usize,
}

impl PayloadSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl MapSurface for PayloadSurface {
    fn set_height(&mut self, height: f32) {
        self.height = Some(height);
    }

    fn clear(&mut self) {
        self.projection = None;
        self.default_fill = None;
        self.countries.clear();
        self.bubbles.clear();
        self.clears += 1;
    }

    fn draw_choropleth(&mut self, projection: &Projection, layer: &ChoroplethLayer<'_>) {
        self.projection = Some(*projection);
        self.default_fill = Some(to_hex(layer.default_fill));
        self.countries = layer
            .index
            .iter()
            .map(|(country, rec)| CountryFill {
                country: country.to_string(),
                fill: to_hex(rec.fill_color),
                label: layer.tooltip.country_label(rec),
            })
            .collect();
    }

    fn draw_bubbles(&mut self, projection: &Projection, layer: &BubbleLayer<'_>) {
        self.projection = Some(*projection);
        self.bubbles = layer
            .features
            .iter()
            .map(|b| BubbleMark {
                country: b.country.clone(),
                latitude: b.latitude,
                longitude: b.longitude,
                radius: b.radius,
                fill: to_hex(layer.style.fill),
                fill_opacity: layer.style.fill_opacity,
                label: layer.tooltip.bubble_label(b),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRecord;
    use crate::map::render::{MapStyle, RenderOptions, render};

    #[test]
    fn bubbles_use_accent_fill_not_country_colour() {
        let records = vec![
            RawRecord::new("USA", 38.0, -97.0, "United States", 100.0, 50.0),
            RawRecord::new("FRA", 46.0, 2.0, "France", 10.0, 5.0),
        ];
        let mut surface = PayloadSurface::new();
        render(&mut surface, &records, &RenderOptions::default(), &MapStyle::default()).unwrap();

        assert!(surface.bubbles.iter().all(|b| b.fill == "#005a63"));
        let usa = surface.countries.iter().find(|c| c.country == "USA").unwrap();
        assert_eq!(usa.fill, "#003399");
        assert_eq!(usa.label, "United States\n100");

        let fra_bubble = surface.bubbles.iter().find(|b| b.country == "FRA").unwrap();
        assert_eq!(fra_bubble.label, "France\n5.00");
    }

    #[test]
    fn json_payload_names_layers() {
        let records = vec![RawRecord::new("JPN", 36.0, 138.0, "Japan", 1.0, 1.0)];
        let mut surface = PayloadSurface::new();
        let options = RenderOptions {
            show_bubbles: false,
            ..RenderOptions::default()
        };
        render(&mut surface, &records, &options, &MapStyle::default()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&surface.to_json().unwrap()).unwrap();
        assert_eq!(json["countries"][0]["country"], "JPN");
        assert_eq!(json["default_fill"], "#b4b4b4");
        assert_eq!(json["projection"]["scale"], 300.0);
        assert_eq!(json["bubbles"].as_array().unwrap().len(), 0);
        assert!(json.get("clears").is_none());
    }
}
