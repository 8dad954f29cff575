//! Command-line interface definitions.

pub mod add;
pub mod check;
pub mod list;
pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::infrastructure::config::settings::{Config, DEFAULT_CONFIG_PATH};

/// Farewatch - round-trip fare sweeps with alerts on new lows.
#[derive(Parser, Debug)]
#[command(name = "farewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log alerts instead of sending them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Defaults to `run`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep every destination once and alert on new lows
    Run(RunArgs),

    /// Show the destination table
    List,

    /// Start tracking a destination
    Add(AddArgs),

    /// Validate configuration, credentials and the destination store
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Seed for uniform sampling (overrides `[search].seed`)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `add` subcommand.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// City name, e.g. "Lisbon"
    pub city: String,

    /// Three-letter airport code, e.g. LIS
    pub iata: String,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Also call the messaging API to verify the account
    #[arg(long)]
    pub live: bool,
}

/// Apply command-line overrides to the loaded configuration.
pub fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
}

/// Dispatch the parsed command.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        None => run::execute(config, cli.dry_run, &RunArgs::default())
            .await
            .map(|_| ()),
        Some(Commands::Run(args)) => run::execute(config, cli.dry_run, args).await.map(|_| ()),
        Some(Commands::List) => list::execute(config),
        Some(Commands::Add(args)) => add::execute(config, args),
        Some(Commands::Check(args)) => check::execute(config, cli.dry_run, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_defaults_to_run() {
        let cli = Cli::try_parse_from(["farewatch"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.dry_run);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli =
            Cli::try_parse_from(["farewatch", "run", "--dry-run", "--seed", "7", "-c", "x.toml"])
                .unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.seed, Some(7)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_takes_city_and_code() {
        let cli = Cli::try_parse_from(["farewatch", "add", "Lisbon", "LIS"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.city, "Lisbon");
                assert_eq!(args.iata, "LIS");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["farewatch", "add", "Lisbon"]).is_err());
    }

    #[test]
    fn log_level_override_is_applied() {
        let cli = Cli::try_parse_from(["farewatch", "--log-level", "debug", "list"]).unwrap();
        let mut config = Config::default();
        apply_overrides(&cli, &mut config);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn check_live_flag() {
        let cli = Cli::try_parse_from(["farewatch", "check", "--live"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check(CheckArgs { live: true }))));
    }
}
