//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tripwire binary using `clap`. The CLI
//! validates configuration and replays scripted keeper sessions against an
//! in-memory engine.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conditional order trigger engine
#[derive(Parser, Debug)]
#[command(name = "tripwire")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration file and summarize the engine it builds
    Check(ConfigPathArg),

    /// Run a JSON script of order operations against an in-memory engine
    Replay(ReplayArgs),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `replay` subcommand.
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Path to the JSON step script.
    pub script: PathBuf,

    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Unix time the replay clock starts at.
    #[arg(long, default_value_t = 0)]
    pub start_time: u64,

    /// Stop at the first rejected step and exit with an error.
    #[arg(long)]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "tripwire");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["tripwire", "check"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.config, PathBuf::from("config.toml")),
            Commands::Replay(_) => panic!("expected check"),
        }
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_replay_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tripwire",
            "replay",
            "steps.json",
            "--config",
            "alt.toml",
            "--json",
            "-vv",
            "--strict",
            "--start-time",
            "1000",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Replay(args) => {
                assert_eq!(args.script, PathBuf::from("steps.json"));
                assert_eq!(args.config.config, PathBuf::from("alt.toml"));
                assert!(args.strict);
                assert_eq!(args.start_time, 1_000);
            }
            Commands::Check(_) => panic!("expected replay"),
        }
    }

    #[test]
    fn test_replay_requires_script() {
        assert!(Cli::try_parse_from(["tripwire", "replay"]).is_err());
    }
}
