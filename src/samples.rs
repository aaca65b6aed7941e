//! Finalized drawings and the in-session store that accumulates them.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Class label attached to a drawing in the labeled variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeLabel {
    #[default]
    Circle,
    Cross,
}

impl ShapeLabel {
    /// Integer class id stored as the trailing vector entry.
    pub fn class_id(self) -> u8 {
        match self {
            ShapeLabel::Circle => 0,
            ShapeLabel::Cross => 1,
        }
    }
}

/// One finalized drawing: the grid flattened row-major, with the class id
/// appended when a label is present. Immutable once appended to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    values: Vec<u8>,
}

impl Sample {
    /// Flatten a grid into a sample, appending `label` as the last entry
    /// when the labeled variant is active.
    pub fn from_grid(grid: &Grid, label: Option<ShapeLabel>) -> Self {
        let mut values = grid.flatten();
        if let Some(label) = label {
            values.push(label.class_id());
        }
        Self { values }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

/// Ordered, append-only collection of samples for the current session.
///
/// Cleared only by a successful table export when the clear-after-save
/// policy is enabled; never persisted between runs except via export.
#[derive(Debug, Default)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
