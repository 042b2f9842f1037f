use std::f64::consts::PI;

use eframe::egui::{Color32, Ui};
use egui_plot::{MarkerShape, Plot, PlotBounds, PlotPoint, PlotUi, Points};
use palette::Srgb;

use rusty_worldmap::map::render::{BubbleLayer, ChoroplethLayer, MapSurface, Projection};

/// Marker radius for a country, in screen points.
const COUNTRY_MARKER_RADIUS: f32 = 6.0;
/// Web-Mercator latitude limit.
const MAX_LATITUDE: f64 = 85.051_128_78;

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

fn with_opacity(c: Srgb<u8>, opacity: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(c.red, c.green, c.blue, (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Mercator y in degrees, so both plot axes share a unit.
fn mercator_y(latitude: f64) -> f64 {
    let phi = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (PI / 4.0 + phi / 2.0).tan().ln().to_degrees()
}

/// Plot bounds showing `size` screen points around the projection centre.
fn view_bounds(projection: &Projection, size: [f32; 2]) -> PlotBounds {
    // `scale` is screen points per radian.
    let points_per_degree = projection.scale * PI / 180.0;
    let half_w = size[0] as f64 / 2.0 / points_per_degree;
    let half_h = size[1] as f64 / 2.0 / points_per_degree;
    let cx = projection.center.longitude;
    let cy = mercator_y(projection.center.latitude);
    PlotBounds::from_min_max([cx - half_w, cy - half_h], [cx + half_w, cy + half_h])
}

struct CountryMarker {
    x: f64,
    y: f64,
    fill: Color32,
    label: String,
}

struct BubbleMarker {
    x: f64,
    y: f64,
    radius: f32,
    label: String,
}

#[derive(Clone, Copy)]
struct Stroke {
    color: Color32,
    width: f32,
}

// ---------------------------------------------------------------------------
// MapCanvas – egui_plot implementation of MapSurface
// ---------------------------------------------------------------------------

/// World map drawn in an `egui_plot` with Mercator-projected axes.
///
/// Countries are filled square markers at their coordinate; bubbles are
/// translucent circles sized by their radius.
pub struct MapCanvas {
    height: f32,
    projection: Option<Projection>,
    default_fill: Color32,
    countries: Vec<CountryMarker>,
    country_border: Stroke,
    country_highlight: (Color32, Stroke),
    bubbles: Vec<BubbleMarker>,
    bubble_fill: Color32,
    bubble_border: Stroke,
    bubble_highlight: (Color32, Stroke),
    /// Reset the view to the projection on the next frame.
    recenter: bool,
}

impl Default for MapCanvas {
    fn default() -> Self {
        let none = Stroke {
            color: Color32::TRANSPARENT,
            width: 0.0,
        };
        Self {
            height: 600.0,
            projection: None,
            default_fill: Color32::GRAY,
            countries: Vec::new(),
            country_border: none,
            country_highlight: (Color32::TRANSPARENT, none),
            bubbles: Vec::new(),
            bubble_fill: Color32::TRANSPARENT,
            bubble_border: none,
            bubble_highlight: (Color32::TRANSPARENT, none),
            recenter: false,
        }
    }
}

impl MapSurface for MapCanvas {
    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn clear(&mut self) {
        self.projection = None;
        self.countries.clear();
        self.bubbles.clear();
    }

    fn draw_choropleth(&mut self, projection: &Projection, layer: &ChoroplethLayer<'_>) {
        self.projection = Some(*projection);
        self.recenter = true;
        self.default_fill = to_color32(layer.default_fill);
        self.country_border = Stroke {
            color: to_color32(layer.style.border_color),
            width: layer.style.border_width,
        };
        self.country_highlight = (
            to_color32(layer.style.highlight_fill),
            Stroke {
                color: to_color32(layer.style.highlight_border_color),
                width: layer.style.highlight_border_width,
            },
        );
        self.countries = layer
            .index
            .iter()
            .map(|(_, rec)| CountryMarker {
                x: rec.record.longitude,
                y: mercator_y(rec.record.latitude),
                fill: to_color32(rec.fill_color),
                label: layer.tooltip.country_label(rec),
            })
            .collect();
    }

    fn draw_bubbles(&mut self, _projection: &Projection, layer: &BubbleLayer<'_>) {
        let style = layer.style;
        self.bubble_fill = with_opacity(style.fill, style.fill_opacity);
        self.bubble_border = Stroke {
            color: to_color32(style.border_color),
            width: style.border_width,
        };
        self.bubble_highlight = (
            with_opacity(style.highlight_fill, style.highlight_fill_opacity),
            Stroke {
                color: to_color32(style.highlight_border_color),
                width: style.highlight_border_width,
            },
        );
        self.bubbles = layer
            .features
            .iter()
            .map(|b| BubbleMarker {
                x: b.longitude,
                y: mercator_y(b.latitude),
                radius: b.radius as f32,
                label: layer.tooltip.bubble_label(b),
            })
            .collect();
    }
}

impl MapCanvas {
    pub fn default_fill(&self) -> Color32 {
        self.default_fill
    }

    pub fn bubble_fill(&self) -> Color32 {
        self.bubble_fill
    }

    /// Paint the map into `ui`.
    pub fn show(&mut self, ui: &mut Ui) {
        let Some(projection) = self.projection else {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view the map  (File → Open…)");
            });
            return;
        };

        let recenter = std::mem::take(&mut self.recenter);
        let size = [ui.available_width(), self.height];

        Plot::new("world_map")
            .height(self.height)
            .data_aspect(1.0)
            .show_grid(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude (Mercator)")
            .label_formatter(|name, _value| name.to_string())
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true)
            .show(ui, |plot_ui| {
                if recenter {
                    plot_ui.set_plot_bounds(view_bounds(&projection, size));
                }
                self.paint_countries(plot_ui);
                self.paint_bubbles(plot_ui);
            });
    }

    fn paint_countries(&self, plot_ui: &mut PlotUi) {
        let hovered = hovered_index(
            plot_ui,
            self.countries.iter().map(|c| (c.x, c.y, COUNTRY_MARKER_RADIUS)),
        );

        for (i, c) in self.countries.iter().enumerate() {
            let (fill, border) = if Some(i) == hovered {
                self.country_highlight
            } else {
                (c.fill, self.country_border)
            };
            marker(plot_ui, c.x, c.y, MarkerShape::Square, COUNTRY_MARKER_RADIUS, fill, border, &c.label);
        }
    }

    fn paint_bubbles(&self, plot_ui: &mut PlotUi) {
        let hovered = hovered_index(plot_ui, self.bubbles.iter().map(|b| (b.x, b.y, b.radius)));

        for (i, b) in self.bubbles.iter().enumerate() {
            let (fill, border) = if Some(i) == hovered {
                self.bubble_highlight
            } else {
                (self.bubble_fill, self.bubble_border)
            };
            marker(plot_ui, b.x, b.y, MarkerShape::Circle, b.radius, fill, border, &b.label);
        }
    }
}

/// Index of the last marker under the pointer (markers drawn later sit on top).
fn hovered_index(plot_ui: &PlotUi, markers: impl Iterator<Item = (f64, f64, f32)>) -> Option<usize> {
    let pointer = plot_ui.screen_from_plot(plot_ui.pointer_coordinate()?);
    markers
        .enumerate()
        .filter(|(_, (x, y, r))| {
            let pos = plot_ui.screen_from_plot(PlotPoint::new(*x, *y));
            pos.distance(pointer) <= *r
        })
        .map(|(i, _)| i)
        .last()
}

#[allow(clippy::too_many_arguments)]
fn marker(
    plot_ui: &mut PlotUi,
    x: f64,
    y: f64,
    shape: MarkerShape,
    radius: f32,
    fill: Color32,
    border: Stroke,
    label: &str,
) {
    plot_ui.points(
        Points::new(vec![[x, y]])
            .shape(shape)
            .radius(radius)
            .filled(true)
            .color(fill)
            .name(label),
    );
    if border.width > 0.0 {
        plot_ui.points(
            Points::new(vec![[x, y]])
                .shape(shape)
                .radius(radius + border.width / 2.0)
                .filled(false)
                .color(border.color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_worldmap::data::model::{ProjectionSeed, RawRecord};
    use rusty_worldmap::map::render::{MapStyle, RenderOptions, render};

    #[test]
    fn mercator_keeps_equator_and_is_symmetric() {
        assert_eq!(mercator_y(0.0), 0.0);
        assert!((mercator_y(45.0) + mercator_y(-45.0)).abs() < 1e-9);
        assert!(mercator_y(90.0).is_finite());
    }

    #[test]
    fn view_is_centred_on_seed() {
        let projection = Projection {
            center: ProjectionSeed { latitude: 0.0, longitude: 10.0 },
            scale: 300.0,
        };
        let bounds = view_bounds(&projection, [600.0, 400.0]);
        assert!((bounds.min()[0] + bounds.max()[0] - 20.0).abs() < 1e-9);
        assert!((bounds.min()[1] + bounds.max()[1]).abs() < 1e-9);
    }

    #[test]
    fn rendering_fills_canvas_and_requests_recenter() {
        let records = vec![
            RawRecord::new("USA", 38.0, -97.0, "United States", 100.0, 50.0),
            RawRecord::new("FRA", 46.0, 2.0, "France", 10.0, 5.0),
        ];
        let mut canvas = MapCanvas::default();
        let options = RenderOptions {
            height: 420.0,
            ..RenderOptions::default()
        };
        render(&mut canvas, &records, &options, &MapStyle::default()).unwrap();

        assert_eq!(canvas.height, 420.0);
        assert_eq!(canvas.countries.len(), 2);
        assert_eq!(canvas.bubbles.len(), 2);
        assert!(canvas.recenter);
        assert_eq!(canvas.default_fill(), Color32::from_rgb(0xb4, 0xb4, 0xb4));
        assert_eq!(canvas.bubble_fill(), Color32::from_rgba_unmultiplied(0x00, 0x5a, 0x63, 127));
    }
}
