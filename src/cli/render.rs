//! Render command implementation.
//!
//! Loads each snapshot and writes it as a text grid (stdout), a JSON report
//! (stdout, or a file with `--output`) or a PNG (always a file).

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use notify::{RecursiveMode, Watcher};

use crate::config::Config;
use crate::discovery::{collect_inputs, Input};
use crate::error::{MapError, Result};
use crate::loader::load_snapshot;
use crate::output::{display_path, plural, Printer};
use crate::render::{write_png, Format, MapReport, TextRenderer, MAX_CELL_SIZE};
use crate::validation::{print_diagnostics, validate_snapshot};

/// Render snapshots as a text grid, JSON report or PNG
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Snapshot files or directories (`-` reads stdin)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Output directory for file output
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pixels per grid cell in PNG output
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_CELL_SIZE as i64))]
    pub cell_size: Option<u32>,

    /// Print the legend after the grid
    #[arg(long)]
    pub legend: bool,

    /// Re-render when the snapshot file changes
    #[arg(long)]
    pub watch: bool,

    /// Report skipped entries
    #[arg(long, short)]
    pub verbose: bool,
}

pub fn run(args: RenderArgs, config: &Config, printer: &Printer) -> Result<()> {
    let inputs = collect_inputs(&args.inputs, config)?;
    if inputs.is_empty() {
        return Err(MapError::Build {
            message: "No snapshot files found".to_string(),
            help: Some("Snapshots are *.json files".to_string()),
        });
    }

    if args.watch {
        return watch(&args, config, printer, &inputs);
    }

    for input in &inputs {
        render_one(&args, config, printer, input)?;
    }

    if inputs.len() > 1 {
        printer.status("Finished", &plural(inputs.len(), "map", "maps"));
    }
    Ok(())
}

fn render_one(args: &RenderArgs, config: &Config, printer: &Printer, input: &Input) -> Result<()> {
    printer.status("Rendering", &input.to_string());
    let snapshot = load_snapshot(input, config)?;

    if args.verbose {
        print_diagnostics(&validate_snapshot(&snapshot), printer);
    }

    match args.format {
        Format::Text => {
            let colour = config.colour.enabled(io::stdout().is_terminal());
            let renderer = TextRenderer::new(&config.theme, colour);
            print!("{}", renderer.render(&snapshot));
            if args.legend {
                print!("\n{}", renderer.legend());
            }
        }
        Format::Json => {
            let json = MapReport::new(&snapshot).to_json()?;
            match &args.output {
                Some(dir) => {
                    let path = output_path(dir, input, "json")?;
                    fs::write(&path, json + "\n").map_err(|e| MapError::Io {
                        path: path.clone(),
                        message: format!("Failed to write report: {}", e),
                    })?;
                    printer.status("Wrote", &display_path(&path));
                }
                None => println!("{}", json),
            }
        }
        Format::Png => {
            let dir = args.output.as_ref().unwrap_or(&config.output);
            let path = output_path(dir, input, "png")?;
            let cell_size = args.cell_size.unwrap_or(config.cell_size);
            write_png(&snapshot, &config.theme, &path, cell_size)?;
            printer.status("Wrote", &display_path(&path));
        }
    }

    Ok(())
}

/// `<dir>/<input stem>.<ext>`, creating `dir` if needed.
fn output_path(dir: &Path, input: &Input, ext: &str) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| MapError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    Ok(dir.join(format!("{}.{}", input.stem(), ext)))
}

/// Render once, then again on every change to the file.
fn watch(args: &RenderArgs, config: &Config, printer: &Printer, inputs: &[Input]) -> Result<()> {
    let [Input::File(path)] = inputs else {
        return Err(MapError::Build {
            message: "--watch needs exactly one snapshot file".to_string(),
            help: None,
        });
    };

    let input = Input::File(path.clone());
    if let Err(e) = render_one(args, config, printer, &input) {
        printer.error("Failed", &e.to_string());
    }

    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| watch_error(path, e))?;
    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .map_err(|e| watch_error(path, e))?;
    printer.info("Watching", &display_path(path));

    for event in rx {
        match event {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                if let Err(e) = render_one(args, config, printer, &input) {
                    printer.error("Failed", &e.to_string());
                }
            }
            Ok(_) => {}
            Err(e) => printer.warning("Watch", &e.to_string()),
        }
    }

    Ok(())
}

fn watch_error(path: &Path, err: notify::Error) -> MapError {
    MapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to watch file: {}", err),
    }
}
