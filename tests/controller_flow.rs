//! Headless controller flows: commit, reset, and both export paths.

use gridpad::config::AppConfig;
use gridpad::egui_app::controller::PadController;
use gridpad::grid::PaintAction;
use gridpad::samples::ShapeLabel;
use tempfile::tempdir;

fn draw_cell(pad: &mut PadController, row: usize, col: usize) {
    let cell_px = pad.config().cell_px as f32;
    let x = col as f32 * cell_px + cell_px / 2.0;
    let y = row as f32 * cell_px + cell_px / 2.0;
    assert!(pad.pointer_event(x, y, PaintAction::Paint));
}

#[test]
fn table_export_merges_the_unsaved_drawing_last() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("samples.csv");
    let mut pad = PadController::new(AppConfig::default());

    draw_cell(&mut pad, 0, 0);
    pad.commit_current();
    draw_cell(&mut pad, 0, 1);
    pad.commit_current();
    // Third drawing is left uncommitted; export should absorb it.
    draw_cell(&mut pad, 0, 2);
    pad.export_table_to(&path);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert_eq!(line.split(',').count(), 64);
    }
    assert!(lines[0].starts_with("1,0"));
    assert!(lines[1].starts_with("0,1"));
    assert!(lines[2].starts_with("0,0,1"));
    // Default policy clears the store after a successful save.
    assert_eq!(pad.sample_count(), 0);
    assert_eq!(pad.ui.status.badge_label, "Info");
}

#[test]
fn table_export_with_nothing_to_save_warns_without_io() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("samples.csv");
    let mut pad = PadController::new(AppConfig::default());

    pad.export_table_to(&path);

    assert!(!path.exists());
    assert_eq!(pad.ui.status.badge_label, "Warning");
}

#[test]
fn keep_store_policy_leaves_samples_after_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("samples.csv");
    let mut pad = PadController::new(AppConfig::labeled_5x5());

    draw_cell(&mut pad, 4, 4);
    pad.set_label(ShapeLabel::Cross);
    pad.export_table_to(&path);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    // 25 pixels plus the trailing class id.
    assert_eq!(lines[0].split(',').count(), 26);
    assert!(lines[0].ends_with(",1,1"));
    // labeled_5x5 keeps the store intact after saving.
    assert_eq!(pad.sample_count(), 1);
}

#[test]
fn table_export_failure_keeps_the_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("samples.csv");
    let mut pad = PadController::new(AppConfig::default());

    draw_cell(&mut pad, 0, 0);
    pad.export_table_to(&path);

    assert_eq!(pad.ui.status.badge_label, "Error");
    assert_eq!(pad.sample_count(), 1);
}

#[test]
fn image_export_writes_the_scaled_grid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drawing.png");
    let mut pad = PadController::new(AppConfig::default());

    draw_cell(&mut pad, 0, 0);
    pad.export_image_to(&path);

    let image = image::open(&path).unwrap().to_luma8();
    assert_eq!(image.dimensions(), (400, 400));
    // Default ink is black on white.
    assert_eq!(image.get_pixel(0, 0).0[0], 0);
    assert_eq!(image.get_pixel(49, 49).0[0], 0);
    assert_eq!(image.get_pixel(50, 0).0[0], 255);
    // Image export never drains the drawing.
    assert!(!pad.grid().is_empty());
}

#[test]
fn empty_image_export_is_policy_dependent() {
    let dir = tempdir().unwrap();

    // The labeled preset rejects empty drawings.
    let rejected = dir.path().join("rejected.png");
    let mut strict = PadController::new(AppConfig::labeled_5x5());
    strict.export_image_to(&rejected);
    assert!(!rejected.exists());
    assert_eq!(strict.ui.status.badge_label, "Warning");

    // The default preset writes an all-background raster.
    let blank = dir.path().join("blank.png");
    let mut lax = PadController::new(AppConfig::default());
    lax.export_image_to(&blank);
    let image = image::open(&blank).unwrap().to_luma8();
    assert!(image.pixels().all(|pixel| pixel.0[0] == 255));
}

#[test]
fn white_ink_polarity_inverts_the_raster() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drawing.png");
    let mut pad = PadController::new(AppConfig::labeled_5x5());

    draw_cell(&mut pad, 0, 0);
    pad.export_image_to(&path);

    let image = image::open(&path).unwrap().to_luma8();
    assert_eq!(image.dimensions(), (250, 250));
    assert_eq!(image.get_pixel(0, 0).0[0], 255);
    assert_eq!(image.get_pixel(50, 50).0[0], 0);
}

#[test]
fn toggle_then_toggle_returns_the_cell_to_zero() {
    let mut pad = PadController::new(AppConfig::default());
    assert!(pad.pointer_event(10.0, 10.0, PaintAction::Toggle));
    assert!(pad.pointer_event(10.0, 10.0, PaintAction::Toggle));
    assert!(pad.grid().is_empty());
}
