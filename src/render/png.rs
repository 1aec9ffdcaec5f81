//! PNG output for classified maps.
//!
//! Each grid cell becomes a `cell_size` square filled with its category
//! colour. Modifiers are drawn as nested borders inside the square.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::classify::{classify_grid, ClassifiedCell};
use crate::error::{MapError, Result};
use crate::parser::MapSnapshot;
use crate::types::{Colour, Theme, GRID_SIZE};

/// Largest accepted `cell_size`; keeps the image within a few thousand pixels a side.
pub const MAX_CELL_SIZE: u32 = 128;

/// Render a snapshot to an image, `cell_size` pixels per cell.
pub fn render_image(snapshot: &MapSnapshot, theme: &Theme, cell_size: u32) -> Result<RgbaImage> {
    if cell_size > MAX_CELL_SIZE {
        return Err(MapError::Build {
            message: format!("Cell size {} is too large", cell_size),
            help: Some(format!("Use a cell size between 1 and {}", MAX_CELL_SIZE)),
        });
    }

    let cell_size = cell_size.max(1); // Minimum of one pixel per cell
    let side = GRID_SIZE as u32 * cell_size;
    let mut img: RgbaImage = ImageBuffer::new(side, side);

    for cell in classify_grid(snapshot) {
        let x0 = cell.coord.col() as u32 * cell_size;
        let y0 = cell.coord.row() as u32 * cell_size;
        fill_rect(&mut img, x0, y0, cell_size, theme.fill(cell.category));

        let width = border_width(cell_size);
        for (ring, colour) in borders(&cell, theme).into_iter().enumerate() {
            let inset = ring as u32 * width;
            if inset * 2 >= cell_size {
                break;
            }
            draw_ring(&mut img, x0 + inset, y0 + inset, cell_size - inset * 2, width, colour);
        }
    }

    Ok(img)
}

/// Write a snapshot to a PNG file.
pub fn write_png(snapshot: &MapSnapshot, theme: &Theme, path: &Path, cell_size: u32) -> Result<()> {
    render_image(snapshot, theme, cell_size)?
        .save(path)
        .map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}

/// Border thickness: an eighth of the cell, at least one pixel.
fn border_width(cell_size: u32) -> u32 {
    (cell_size / 8).max(1)
}

/// Border colours from the outside in.
fn borders(cell: &ClassifiedCell, theme: &Theme) -> Vec<Colour> {
    let m = cell.modifiers;
    let mut rings = Vec::new();
    if m.is_current {
        rings.push(theme.current);
    }
    if m.special_completed {
        rings.push(theme.special_completed);
    }
    if m.collected_treasure {
        rings.push(theme.collected_treasure);
    }
    rings
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, size: u32, colour: Colour) {
    let rgba = Rgba(colour.to_rgba());
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            img.put_pixel(x, y, rgba);
        }
    }
}

/// Draw a square outline of the given thickness.
fn draw_ring(img: &mut RgbaImage, x0: u32, y0: u32, size: u32, width: u32, colour: Colour) {
    let rgba = Rgba(colour.to_rgba());
    let width = width.min(size);
    for dy in 0..size {
        for dx in 0..size {
            let edge = dx < width || dy < width || dx >= size - width || dy >= size - width;
            if edge {
                img.put_pixel(x0 + dx, y0 + dy, rgba);
            }
        }
    }
}
