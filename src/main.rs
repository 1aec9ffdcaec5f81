use clap::Parser;
use miette::Result;
use underspire_map::cli::{self, Cli, Commands};
use underspire_map::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Render(args) => {
            let (config, printer) = cli::context(config, cli.colour)?;
            cli::render::run(args, &config, &printer)?
        }
        Commands::Stats(args) => {
            let (config, printer) = cli::context(config, cli.colour)?;
            cli::stats::run(args, &config, &printer)?
        }
        Commands::Validate(args) => {
            let (config, printer) = cli::context(config, cli.colour)?;
            cli::validate::run(args, &config, &printer)?
        }
        Commands::Init(args) => {
            let printer = Printer::with_mode(cli.colour.unwrap_or_default());
            cli::init::run(args, &printer)?
        }
        Commands::Completions(args) => cli::completions::run(args)?,
    }

    Ok(())
}
