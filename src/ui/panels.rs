use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_worldmap::data::model::ProjectionSeed;
use rusty_worldmap::format::NumberFormat;
use rusty_worldmap::map::index::CountryIndex;

use crate::state::AppState;
use crate::ui::map::to_color32;

// ---------------------------------------------------------------------------
// Left side panel – render options, legend, country table
// ---------------------------------------------------------------------------

/// Render the left options panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Map");
    ui.separator();

    if options_widgets(ui, state) {
        state.rerender();
    }
    ui.separator();

    let Some(map) = &state.rendered else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Legend ----
    ui.strong("Legend");
    let number = state.options.number_format;
    for (value, color) in map.scales.color.legend_entries(5) {
        swatch(ui, to_color32(color), &number.format(value));
    }
    swatch(ui, state.canvas.default_fill(), "no data");
    if state.options.show_bubbles {
        swatch(ui, state.canvas.bubble_fill(), "bubble (m2)");
    }
    ui.separator();

    // ---- Country table ----
    ui.strong(format!("Countries ({})", map.index.len()));
    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        country_table(ui, &map.index, number);
    });
}

/// Option widgets. Returns `true` when anything changed.
fn options_widgets(ui: &mut Ui, state: &mut AppState) -> bool {
    let options = &mut state.options;
    let mut changed = false;

    changed |= ui
        .add(egui::Slider::new(&mut options.height, 200.0..=1600.0).text("Height (px)"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut options.max_bubble_size, 1.0..=100.0).text("Max bubble size"))
        .changed();
    changed |= ui.checkbox(&mut options.show_bubbles, "Show bubbles").changed();

    let mut custom_centre = options.seed.is_some();
    if ui.checkbox(&mut custom_centre, "Custom centre").changed() {
        options.seed = if custom_centre {
            Some(
                state
                    .rendered
                    .as_ref()
                    .map(|m| m.seed)
                    .unwrap_or(ProjectionSeed { latitude: 0.0, longitude: 0.0 }),
            )
        } else {
            None
        };
        changed = true;
    }
    if let Some(seed) = &mut options.seed {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Lat");
            changed |= ui
                .add(egui::DragValue::new(&mut seed.latitude).range(-90.0..=90.0).speed(0.5))
                .changed();
            ui.label("Lon");
            changed |= ui
                .add(egui::DragValue::new(&mut seed.longitude).range(-180.0..=180.0).speed(0.5))
                .changed();
        });
    }

    changed
}

fn swatch(ui: &mut Ui, color: Color32, label: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("■").color(color).size(16.0));
        ui.label(label);
    });
}

fn country_table(ui: &mut Ui, index: &CountryIndex, number: NumberFormat) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto().at_least(100.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            for title in ["Code", "Name", "m1", "m2", "Radius"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (code, rec) in index.iter() {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(code).color(to_color32(rec.fill_color)));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&rec.record.name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(number.format(rec.record.m1));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(number.format(rec.record.m2));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}", rec.radius));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_data = state.rendered.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export payload…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(records), Some(map)) = (&state.records, &state.rendered) {
            ui.label(format!(
                "{} records loaded, {} countries shown",
                records.len(),
                map.index.len()
            ));
        }
        if let Some(path) = &state.source {
            ui.separator();
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open country statistics")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export map payload")
        .set_file_name("worldmap.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.save_payload(&path) {
            log::error!("Failed to export payload: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
