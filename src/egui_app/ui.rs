//! egui renderer for the application UI.

use eframe::egui::{
    self, Align2, Color32, FontId, Frame, PointerButton, Rect, RichText, Sense, Stroke,
    StrokeKind, Ui, Vec2,
};

use crate::config;
use crate::egui_app::controller::PadController;
use crate::grid::{CellAddress, PaintAction};
use crate::samples::ShapeLabel;

/// Smallest usable window.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(420.0, 320.0);

const SIDE_PANEL_WIDTH: f32 = 170.0;

/// Renders the egui UI using the shared controller state.
pub struct PadApp {
    controller: PadController,
    visuals_set: bool,
    viewport_sized: bool,
}

impl PadApp {
    /// Create the app, loading (or seeding) the persisted configuration.
    pub fn new() -> Result<Self, String> {
        let config =
            config::load_or_init().map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller: PadController::new(config),
            visuals_set: false,
            viewport_sized: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Size the window to the configured grid once, on the first frame.
    fn size_viewport(&mut self, ctx: &egui::Context) {
        if self.viewport_sized {
            return;
        }
        let config = self.controller.config();
        let canvas = config.cell_px as f32 * config.grid_size as f32;
        let desired = Vec2::new(canvas + SIDE_PANEL_WIDTH + 48.0, canvas + 96.0);
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(desired.max(
            MIN_VIEWPORT_SIZE,
        )));
        self.viewport_sized = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::none().fill(Color32::from_rgb(24, 24, 24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Gridpad").color(Color32::WHITE));
                    ui.add_space(8.0);
                    ui.separator();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Close").color(Color32::WHITE))
                            .clicked()
                        {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                });
            });
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("Stored samples: {}", self.controller.sample_count()))
                .color(Color32::WHITE),
        );
        ui.add_space(8.0);

        if self.controller.labeled() {
            ui.label(RichText::new("Shape label:").color(Color32::WHITE));
            let mut label = self.controller.label();
            ui.radio_value(&mut label, ShapeLabel::Circle, "Circle (0)");
            ui.radio_value(&mut label, ShapeLabel::Cross, "Cross (1)");
            if label != self.controller.label() {
                self.controller.set_label(label);
            }
            ui.add_space(8.0);
        }

        if ui.button("Next").clicked() {
            self.controller.commit_current();
        }
        if ui.button("Save CSV").clicked() {
            self.controller.export_table_via_dialog();
        }
        if ui.button("Save PNG").clicked() {
            self.controller.export_image_via_dialog();
        }
        if ui.button("Reset").clicked() {
            self.controller.reset_canvas();
        }
        ui.add_space(12.0);
        if ui.button("Exit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn render_canvas(&mut self, ui: &mut Ui) {
        let cell_px = self.controller.config().cell_px as f32;
        let grid_size = self.controller.grid().size();
        let desired = Vec2::splat(cell_px * grid_size as f32);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

        // Handle input before painting so mutations show in the same frame.
        if response.clicked() {
            self.apply_pointer(&response, rect, PaintAction::Toggle);
        }
        if response.dragged_by(PointerButton::Primary) {
            self.apply_pointer(&response, rect, PaintAction::Paint);
        }
        if response.secondary_clicked() || response.dragged_by(PointerButton::Secondary) {
            self.apply_pointer(&response, rect, PaintAction::Erase);
        }

        let painter = ui.painter_at(rect);
        let line = Stroke::new(1.0, Color32::from_gray(120));
        for row in 0..grid_size {
            for col in 0..grid_size {
                let min = rect.min + egui::vec2(col as f32 * cell_px, row as f32 * cell_px);
                let cell_rect = Rect::from_min_size(min, Vec2::splat(cell_px));
                let set = self.controller.grid().get(CellAddress { row, col }) != 0;
                let fill = if set { Color32::BLACK } else { Color32::WHITE };
                painter.rect_filled(cell_rect, 0.0, fill);
                painter.rect_stroke(cell_rect, 0.0, line, StrokeKind::Inside);
                // Faint row-major index, mirroring the exported vector order.
                painter.text(
                    cell_rect.center(),
                    Align2::CENTER_CENTER,
                    (row * grid_size + col).to_string(),
                    FontId::proportional(cell_px * 0.3),
                    Color32::from_gray(140),
                );
            }
        }
    }

    fn apply_pointer(&mut self, response: &egui::Response, rect: Rect, action: PaintAction) {
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        self.controller
            .pointer_event(pos.x - rect.left(), pos.y - rect.top(), action);
    }
}

impl eframe::App for PadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.size_viewport(ctx);
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::SidePanel::right("controls")
            .exact_width(SIDE_PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| self.render_controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            self.render_canvas(ui);
        });
    }
}
