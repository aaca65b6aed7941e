//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Persisted configuration.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Sample table and raster export.
pub mod export;
/// Binary drawing grid.
pub mod grid;
/// Pointer-to-cell mapping.
pub mod interaction;
/// Logging setup.
pub mod logging;
/// Finalized samples and the session store.
pub mod samples;
