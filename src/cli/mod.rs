pub mod completions;
pub mod init;
pub mod render;
pub mod stats;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::{ColourMode, Printer};

/// underspire - Underspire dungeon map viewer
#[derive(Parser, Debug)]
#[command(name = "underspire")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./underspire.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// When to use colour
    #[arg(long, global = true, value_enum)]
    pub colour: Option<ColourMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render snapshots as a text grid, JSON report or PNG
    Render(render::RenderArgs),

    /// Print room and feature counts
    Stats(stats::StatsArgs),

    /// Check snapshots for dropped or inconsistent entries
    Validate(validate::ValidateArgs),

    /// Write a default underspire.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Resolve config and a matching printer for commands that read snapshots.
pub fn context(config: Option<&Path>, colour: Option<ColourMode>) -> Result<(Config, Printer)> {
    let mut config = Config::resolve(config, Path::new("."))?;
    if let Some(colour) = colour {
        config.colour = colour;
    }
    let printer = Printer::with_mode(config.colour);
    Ok((config, printer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::parse_from([
            "underspire",
            "--colour",
            "never",
            "render",
            "state.json",
            "--format",
            "png",
            "--cell-size",
            "8",
        ]);
        assert_eq!(cli.colour, Some(ColourMode::Never));
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.format, crate::render::Format::Png);
                assert_eq!(args.cell_size, Some(8));
                assert!(!args.watch);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cell_size_is_bounded() {
        let parse = |size: &str| {
            Cli::try_parse_from(["underspire", "render", "state.json", "--cell-size", size])
        };
        assert!(parse("128").is_ok());
        assert!(parse("0").is_err());
        assert!(parse("429496729").is_err());
    }

    #[test]
    fn test_context_colour_override() {
        let (config, _) = context(None, Some(ColourMode::Always)).unwrap();
        assert_eq!(config.colour, ColourMode::Always);
    }
}
