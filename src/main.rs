use anyhow::Context;
use clap::Parser;
use tracing::error;

use tripwire::cli::command::{Cli, Commands};
use tripwire::cli::{check, output, replay};
use tripwire::infrastructure::config::settings::Config;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = run(cli) {
        error!(error = %e, "Command failed");
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_logging(config_path: &std::path::Path, verbose: u8) {
    let logging = Config::load(config_path)
        .map(|config| config.logging)
        .unwrap_or_default();
    logging.with_verbosity(verbose).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check(args) => {
            init_logging(&args.config, cli.verbose);
            check::execute(&args.config)
                .with_context(|| format!("check failed for {}", args.config.display()))
        }
        Commands::Replay(args) => {
            init_logging(&args.config.config, cli.verbose);
            replay::execute(&args)
                .with_context(|| format!("replay of {} failed", args.script.display()))
        }
    }
}
