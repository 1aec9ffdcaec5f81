//! Rendering of classified maps.
//!
//! Three outputs share the same classification: an annotated text grid for
//! the terminal, a JSON report, and a PNG image.

mod png;
mod report;
mod text;

pub use png::{render_image, write_png, MAX_CELL_SIZE};
pub use report::MapReport;
pub use text::{TextRenderer, COLLECTED_MARKER, CURRENT_MARKER, SPECIAL_COMPLETED_MARKER};

/// Output format for `underspire render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
    Png,
}
