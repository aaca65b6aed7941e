//! Command handling for the Gridpad UI.
//!
//! `PadController` owns the domain state (grid, sample store, label
//! selector, config) and turns user commands into mutations plus a status
//! update. Every failure is converted to a status message here; nothing
//! escapes a command as an error the UI has to handle.

use std::path::Path;

use egui::Color32;
use rfd::FileDialog;

use crate::config::AppConfig;
use crate::egui_app::state::UiState;
use crate::export;
use crate::grid::{Grid, PaintAction};
use crate::interaction;
use crate::samples::{Sample, SampleStore, ShapeLabel};

/// Maintains the drawing session and bridges core logic to the egui UI.
pub struct PadController {
    pub ui: UiState,
    config: AppConfig,
    grid: Grid,
    samples: SampleStore,
    label: ShapeLabel,
}

impl PadController {
    pub fn new(config: AppConfig) -> Self {
        Self {
            ui: UiState::default(),
            grid: Grid::new(config.grid_size),
            samples: SampleStore::new(),
            label: ShapeLabel::default(),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Whether drawings carry a class label.
    pub fn labeled(&self) -> bool {
        self.config.labeled
    }

    pub fn label(&self) -> ShapeLabel {
        self.label
    }

    pub fn set_label(&mut self, label: ShapeLabel) {
        self.label = label;
    }

    /// Apply a pointer event at canvas-relative coordinates. Out-of-bounds
    /// positions are ignored. Returns `true` when a cell changed.
    pub fn pointer_event(&mut self, x: f32, y: f32, action: PaintAction) -> bool {
        let cell_px = self.config.cell_px as f32;
        match interaction::cell_at(x, y, cell_px, self.config.grid_size) {
            Some(cell) => self.grid.apply(cell, action),
            None => false,
        }
    }

    /// Finalize the current drawing into the store and clear the canvas.
    pub fn commit_current(&mut self) {
        if self.grid.is_empty() {
            self.set_status(
                "The drawing is empty. Draw something before pressing Next.",
                StatusTone::Warning,
            );
            return;
        }
        let sample = Sample::from_grid(&self.grid, self.current_label());
        self.samples.append(sample);
        self.grid.clear();
        self.label = ShapeLabel::default();
        self.set_status(
            format!("Drawing #{} stored. Draw the next one.", self.samples.len()),
            StatusTone::Info,
        );
    }

    /// Clear the canvas and label. Never touches the sample store.
    pub fn reset_canvas(&mut self) {
        self.grid.clear();
        self.label = ShapeLabel::default();
        self.set_status("Canvas cleared", StatusTone::Info);
    }

    /// Export all accumulated drawings, prompting for the destination.
    pub fn export_table_via_dialog(&mut self) {
        if !self.prepare_table_export() {
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("CSV (one vector per row)", &["csv"])
            .set_file_name("samples.csv")
            .save_file()
        else {
            return;
        };
        self.write_table(&path);
    }

    /// Export all accumulated drawings to an explicit path (no dialog).
    pub fn export_table_to(&mut self, path: &Path) {
        if !self.prepare_table_export() {
            return;
        }
        self.write_table(path);
    }

    /// Export the current drawing as a raster, prompting for the destination.
    pub fn export_image_via_dialog(&mut self) {
        if !self.check_image_export() {
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("drawing.png")
            .save_file()
        else {
            return;
        };
        self.write_image(&path);
    }

    /// Export the current drawing to an explicit path (no dialog).
    pub fn export_image_to(&mut self, path: &Path) {
        if !self.check_image_export() {
            return;
        }
        self.write_image(path);
    }

    fn current_label(&self) -> Option<ShapeLabel> {
        self.config.labeled.then_some(self.label)
    }

    /// Fold the unsaved drawing into the store, then validate there is
    /// something to write. The merge happens before the path prompt, so a
    /// cancelled dialog keeps the appended sample (matching the historical
    /// behavior).
    fn prepare_table_export(&mut self) -> bool {
        if !self.grid.is_empty() {
            let sample = Sample::from_grid(&self.grid, self.current_label());
            self.samples.append(sample);
        }
        if self.samples.is_empty() {
            self.set_status("No samples to save.", StatusTone::Warning);
            return false;
        }
        true
    }

    fn write_table(&mut self, path: &Path) {
        match export::write_sample_table(path, &self.samples) {
            Ok(rows) => {
                if self.config.export.clear_after_save {
                    self.samples.clear();
                }
                self.set_status(
                    format!("{rows} drawings saved to {}", path.display()),
                    StatusTone::Info,
                );
            }
            Err(err) => self.set_status(format!("Could not save: {err}"), StatusTone::Error),
        }
    }

    fn check_image_export(&mut self) -> bool {
        if self.grid.is_empty() && !self.config.export.allow_empty_image {
            self.set_status(
                "The drawing is empty. Draw something before exporting an image.",
                StatusTone::Warning,
            );
            return false;
        }
        true
    }

    fn write_image(&mut self, path: &Path) {
        match export::write_grid_image(path, &self.grid, self.config.cell_px, self.config.export.ink)
        {
            Ok(()) => self.set_status(
                format!("Image saved to {}", path.display()),
                StatusTone::Info,
            ),
            Err(err) => self.set_status(format!("Could not save: {err}"), StatusTone::Error),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}

#[derive(Clone, Copy, Debug)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
    Error,
}

fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Idle".into(), Color32::from_rgb(42, 42, 42)),
        StatusTone::Info => ("Info".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(192, 138, 43)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellAddress;

    fn controller() -> PadController {
        PadController::new(AppConfig::default())
    }

    #[test]
    fn commit_on_empty_grid_warns_and_stores_nothing() {
        let mut pad = controller();
        pad.commit_current();
        assert_eq!(pad.sample_count(), 0);
        assert_eq!(pad.ui.status.badge_label, "Warning");
    }

    #[test]
    fn commit_stores_one_sample_and_clears_the_grid() {
        let mut pad = controller();
        assert!(pad.pointer_event(10.0, 10.0, PaintAction::Paint));
        pad.commit_current();
        assert_eq!(pad.sample_count(), 1);
        assert!(pad.grid().is_empty());
        assert_eq!(pad.ui.status.badge_label, "Info");
    }

    #[test]
    fn pointer_events_outside_the_canvas_are_ignored() {
        let mut pad = controller();
        assert!(!pad.pointer_event(-5.0, 10.0, PaintAction::Paint));
        assert!(!pad.pointer_event(10.0, 9_999.0, PaintAction::Paint));
        assert!(pad.grid().is_empty());
    }

    #[test]
    fn pointer_event_maps_by_cell_pixel_size() {
        let mut pad = controller();
        // cell_px defaults to 50, so (120, 70) lands in row 1, col 2.
        pad.pointer_event(120.0, 70.0, PaintAction::Paint);
        assert_eq!(pad.grid().get(CellAddress { row: 1, col: 2 }), 1);
    }

    #[test]
    fn reset_clears_label_but_not_store() {
        let mut pad = PadController::new(AppConfig::labeled_5x5());
        pad.pointer_event(10.0, 10.0, PaintAction::Paint);
        pad.commit_current();
        pad.pointer_event(10.0, 10.0, PaintAction::Paint);
        pad.set_label(ShapeLabel::Cross);
        pad.reset_canvas();
        assert!(pad.grid().is_empty());
        assert_eq!(pad.label(), ShapeLabel::Circle);
        assert_eq!(pad.sample_count(), 1);
    }

    #[test]
    fn commit_resets_label_to_default() {
        let mut pad = PadController::new(AppConfig::labeled_5x5());
        pad.pointer_event(10.0, 10.0, PaintAction::Paint);
        pad.set_label(ShapeLabel::Cross);
        pad.commit_current();
        assert_eq!(pad.label(), ShapeLabel::Circle);
    }
}
