//! Terminal rendering of the annotated grid.
//!
//! Each cell is a marker column followed by a right-aligned body. The body
//! is three columns wide, or wider when a label needs it. Column numbers run
//! along the top and bottom, row numbers down both sides.

use std::fmt::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::classify::{classify_grid, CellCategory, ClassifiedCell};
use crate::parser::MapSnapshot;
use crate::stats::MapStats;
use crate::types::{Colour, Theme, GRID_SIZE};

const RESET: &str = "\x1b[0m";

/// Narrowest cell body, after the marker column.
const BODY_WIDTH: usize = 3;

/// Widest cell body; longer labels are cut and end in [`ELLIPSIS`].
const MAX_BODY_WIDTH: usize = 12;

const ELLIPSIS: char = '…';

/// Marker for the player's position.
pub const CURRENT_MARKER: char = '@';
/// Marker for a collected treasure room.
pub const COLLECTED_MARKER: char = '$';
/// Marker for a completed special room.
pub const SPECIAL_COMPLETED_MARKER: char = '*';

/// Renders a snapshot as a text grid.
pub struct TextRenderer<'a> {
    theme: &'a Theme,
    colour: bool,
}

impl<'a> TextRenderer<'a> {
    pub fn new(theme: &'a Theme, colour: bool) -> Self {
        Self { theme, colour }
    }

    /// Render the grid followed by the summary lines.
    pub fn render(&self, snapshot: &MapSnapshot) -> String {
        let cells = classify_grid(snapshot);
        let width = body_width(&cells);
        let mut out = String::new();

        let axis = axis_line(width + 1);
        out.push_str(&axis);
        out.push('\n');

        for (row, row_cells) in cells.chunks(GRID_SIZE).enumerate() {
            let _ = write!(out, "{:>3} ", row);
            for cell in row_cells {
                out.push_str(&self.cell(cell, width));
            }
            let _ = writeln!(out, " {:<3}", row);
        }

        out.push_str(&axis);
        out.push_str("\n\n");
        let _ = writeln!(out, "{}", MapStats::compute(snapshot));
        out
    }

    /// Legend lines describing categories and markers.
    pub fn legend(&self) -> String {
        let mut out = String::new();
        for category in CellCategory::ALL {
            let sample = match category {
                CellCategory::Gate => "ID",
                CellCategory::Treasure => "ID",
                CellCategory::Boss => "ID",
                _ => body_glyph(category),
            };
            let swatch = self.paint(&format!(" {:>BODY_WIDTH$}", sample), self.theme.fill(category));
            let _ = writeln!(out, "  {}  {}", swatch, legend_text(category));
        }
        let markers = [
            (CURRENT_MARKER, "current position"),
            (COLLECTED_MARKER, "collected treasure"),
            (SPECIAL_COMPLETED_MARKER, "completed gate, treasure or boss room"),
        ];
        for (marker, text) in markers {
            let _ = writeln!(out, "  {:<4}  {}", marker, text);
        }
        out
    }

    fn cell(&self, cell: &ClassifiedCell, width: usize) -> String {
        let body = match &cell.label {
            Some(label) => fit_label(label, width),
            None => body_glyph(cell.category).to_string(),
        };
        let text = format!("{}{}", marker(cell), pad_left(&body, width));
        self.paint(&text, self.theme.fill(cell.category))
    }

    fn paint(&self, text: &str, background: Colour) -> String {
        if !self.colour {
            return text.to_string();
        }
        let fg = background.contrast_text();
        format!(
            "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{}{}",
            background.r, background.g, background.b, fg.r, fg.g, fg.b, text, RESET
        )
    }
}

/// Marker column for a cell; the current position wins over other highlights.
fn marker(cell: &ClassifiedCell) -> char {
    let m = cell.modifiers;
    if m.is_current {
        CURRENT_MARKER
    } else if m.collected_treasure {
        COLLECTED_MARKER
    } else if m.special_completed {
        SPECIAL_COMPLETED_MARKER
    } else {
        ' '
    }
}

fn body_glyph(category: CellCategory) -> &'static str {
    match category {
        CellCategory::Empty => ".",
        CellCategory::Room => "o",
        CellCategory::Completed => "x",
        CellCategory::Gate | CellCategory::Treasure | CellCategory::Boss => "",
    }
}

fn legend_text(category: CellCategory) -> &'static str {
    match category {
        CellCategory::Gate => "gate (label is the gate pair ID)",
        CellCategory::Treasure => "treasure room",
        CellCategory::Boss => "boss room",
        CellCategory::Empty => "empty cell (15)",
        CellCategory::Completed => "completed room",
        CellCategory::Room => "room not yet completed",
    }
}

/// Body width for a grid: the widest label in terminal columns, within bounds.
fn body_width(cells: &[ClassifiedCell]) -> usize {
    cells
        .iter()
        .filter_map(|cell| cell.label.as_deref())
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
        .clamp(BODY_WIDTH, MAX_BODY_WIDTH)
}

/// Cut a label to `width` terminal columns, ending in an ellipsis when cut.
fn fit_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Right-align by display width; `format!` padding counts chars.
fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(pad), text)
}

fn axis_line(cell_width: usize) -> String {
    let mut line = String::from("    ");
    for col in 0..GRID_SIZE {
        let _ = write!(line, "{:>cell_width$}", col);
    }
    line
}
