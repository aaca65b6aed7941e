//! egui controller, UI state, and renderer for the Gridpad window.

pub mod controller;
pub mod state;
pub mod ui;
