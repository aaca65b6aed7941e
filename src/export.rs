//! Serialize accumulated samples to a CSV row table and the current drawing
//! to a grayscale raster.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{CellAddress, Grid};
use crate::samples::SampleStore;

/// Mapping between a set cell and the exported pixel color.
///
/// The two historical variants disagree here, so the choice is a config
/// switch rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Set cells render black on a white background.
    #[default]
    Black,
    /// Set cells render white on a black background.
    White,
}

impl Polarity {
    /// Grayscale byte for a cell value under this polarity.
    pub fn luma(self, cell: u8) -> u8 {
        let set = cell != 0;
        match self {
            Polarity::Black => {
                if set {
                    0
                } else {
                    255
                }
            }
            Polarity::White => {
                if set {
                    255
                } else {
                    0
                }
            }
        }
    }
}

/// Errors surfaced by the export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The raster encoder rejected the write.
    #[error("Failed to encode image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Write one comma-separated line of integers per sample, store order,
/// newline-terminated, no header. Returns the number of rows written.
pub fn write_sample_table(path: &Path, store: &SampleStore) -> Result<usize, ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let mut rows = 0usize;
    for sample in store.iter() {
        let line = sample
            .values()
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writer.write_all(line.as_bytes()).map_err(io_err)?;
        writer.write_all(b"\n").map_err(io_err)?;
        rows += 1;
    }
    writer.flush().map_err(io_err)?;
    tracing::info!("Wrote {rows} sample rows to {}", path.display());
    Ok(rows)
}

/// Render the grid as an 8-bit grayscale raster, each cell expanded to a
/// `cell_px`-sided block. No interpolation: every pixel of a block takes the
/// block's value, keeping cell edges hard.
pub fn render_grid_image(grid: &Grid, cell_px: u32, ink: Polarity) -> GrayImage {
    let side = grid.size() as u32 * cell_px;
    GrayImage::from_fn(side, side, |x, y| {
        let cell = CellAddress {
            row: (y / cell_px) as usize,
            col: (x / cell_px) as usize,
        };
        Luma([ink.luma(grid.get(cell))])
    })
}

/// Render the current grid and save it to `path`; the format follows the
/// file extension (conventionally `.png`).
pub fn write_grid_image(
    path: &Path,
    grid: &Grid,
    cell_px: u32,
    ink: Polarity,
) -> Result<(), ExportError> {
    let image = render_grid_image(grid, cell_px, ink);
    image.save(path).map_err(|source| ExportError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "Wrote {}x{} grid image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PaintAction;
    use crate::samples::{Sample, ShapeLabel};
    use std::fs;
    use tempfile::tempdir;

    fn grid_with(cells: &[(usize, usize)], size: usize) -> Grid {
        let mut grid = Grid::new(size);
        for &(row, col) in cells {
            grid.apply(CellAddress { row, col }, PaintAction::Paint);
        }
        grid
    }

    #[test]
    fn table_rows_match_store_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        let mut store = SampleStore::new();
        store.append(Sample::from_grid(&grid_with(&[(0, 0)], 5), None));
        store.append(Sample::from_grid(
            &grid_with(&[(4, 4)], 5),
            Some(ShapeLabel::Cross),
        ));

        let rows = write_sample_table(&path, &store).unwrap();
        assert_eq!(rows, 2);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1,0,0"));
        assert_eq!(lines[0].split(',').count(), 25);
        assert_eq!(lines[1].split(',').count(), 26);
        assert!(lines[1].ends_with(",1,1"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn black_ink_maps_set_cells_to_zero() {
        let image = render_grid_image(&grid_with(&[(0, 0)], 2), 10, Polarity::Black);
        assert_eq!(image.dimensions(), (20, 20));
        assert_eq!(image.get_pixel(0, 0).0[0], 0);
        assert_eq!(image.get_pixel(9, 9).0[0], 0);
        assert_eq!(image.get_pixel(10, 0).0[0], 255);
    }

    #[test]
    fn white_ink_inverts_the_mapping() {
        let image = render_grid_image(&grid_with(&[(0, 0)], 2), 4, Polarity::White);
        assert_eq!(image.get_pixel(0, 0).0[0], 255);
        assert_eq!(image.get_pixel(4, 4).0[0], 0);
    }

    #[test]
    fn blocks_are_uniform() {
        let image = render_grid_image(&grid_with(&[(1, 0)], 2), 8, Polarity::Black);
        for y in 8..16 {
            for x in 0..8 {
                assert_eq!(image.get_pixel(x, y).0[0], 0);
            }
        }
    }

    #[test]
    fn image_file_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.png");
        write_grid_image(&path, &grid_with(&[(0, 1)], 2), 5, Polarity::Black).unwrap();
        let reloaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(reloaded.dimensions(), (10, 10));
        assert_eq!(reloaded.get_pixel(5, 0).0[0], 0);
        assert_eq!(reloaded.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn unwritable_destination_reports_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("samples.csv");
        let mut store = SampleStore::new();
        store.append(Sample::from_grid(&grid_with(&[(0, 0)], 5), None));
        let err = write_sample_table(&path, &store).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
