use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rusty_worldmap::data::loader::load_file;
use rusty_worldmap::data::model::RawRecord;
use rusty_worldmap::map::payload::PayloadSurface;
use rusty_worldmap::map::render::{MapStyle, RenderOptions, RenderedMap, render};

use crate::ui::map::MapCanvas;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of egui widgets.
#[derive(Default)]
pub struct AppState {
    /// Loaded records, in file order (None until user loads a file).
    pub records: Option<Vec<RawRecord>>,

    /// File the records came from.
    pub source: Option<PathBuf>,

    /// Settings of the next render.
    pub options: RenderOptions,

    pub style: MapStyle,

    /// Drawing surface for the central panel.
    pub canvas: MapCanvas,

    /// Result of the last successful render.
    pub rendered: Option<RenderedMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    /// Load `path` and render it.
    pub fn open(&mut self, path: &Path) {
        self.loading = true;
        match load_file(path) {
            Ok(records) => {
                log::info!("Loaded {} records from {}", records.len(), path.display());
                self.source = Some(path.to_path_buf());
                self.set_records(records);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Ingest newly loaded records and draw them.
    pub fn set_records(&mut self, records: Vec<RawRecord>) {
        self.records = Some(records);
        self.loading = false;
        self.rerender();
    }

    /// Run the pipeline again with the current options.
    ///
    /// On error the canvas keeps its previous content and the message is shown
    /// in the status line.
    pub fn rerender(&mut self) {
        let Some(records) = &self.records else {
            return;
        };
        match render(&mut self.canvas, records, &self.options, &self.style) {
            Ok(map) => {
                self.rendered = Some(map);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Render failed: {e}");
                self.rendered = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// JSON payload of the current records and options.
    pub fn export_payload(&self) -> Result<String> {
        let records = self.records.as_deref().context("no dataset loaded")?;
        let mut surface = PayloadSurface::new();
        render(&mut surface, records, &self.options, &self.style)?;
        surface.to_json().context("serializing map payload")
    }

    /// Write [`export_payload`](Self::export_payload) to `path`.
    pub fn save_payload(&self, path: &Path) -> Result<()> {
        let json = self.export_payload()?;
        std::fs::write(path, json)
            .with_context(|| format!("writing payload to {}", path.display()))?;
        log::info!("Saved map payload to {}", path.display());
        Ok(())
    }
}
