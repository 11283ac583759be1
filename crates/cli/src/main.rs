//! Eratos CLI: the main entry point.
//!
//! Commands:
//! - `run`      Sieve, self-test, and project run times (the default flow)
//! - `factor`   Factorize numbers using the witness table
//! - `primes`   List or count primes below the bound
//! - `timeline` Project run times from a known measurement
//! - `config`   Show, validate, or initialise configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "eratos",
    about = "Eratos: prime sieve with instant factorization",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.eratos/config.toml
    #[arg(short, long, global = true, env = "ERATOS_CONFIG")]
    config: Option<PathBuf>,
}

/// Sieve bound overrides shared by several commands.
#[derive(Args, Clone, Debug, Default)]
pub struct RangeArgs {
    /// Sieve numbers below 2^BITS
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Sieve numbers below this exact bound
    #[arg(long, conflicts_with = "bits")]
    pub max_range: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sieve, run the self-test, and project larger runs
    Run {
        #[command(flatten)]
        range: RangeArgs,

        /// Numbers to sample in the self-test
        #[arg(short, long)]
        samples: Option<usize>,

        /// Seed for reproducible self-test sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the factorization self-test
        #[arg(long)]
        no_self_test: bool,

        /// Skip the run time projection
        #[arg(long)]
        no_timeline: bool,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Factorize one or more numbers
    Factor {
        /// Numbers to factorize
        #[arg(required = true)]
        numbers: Vec<u64>,

        #[command(flatten)]
        range: RangeArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the primes below the bound
    Primes {
        #[command(flatten)]
        range: RangeArgs,

        /// Only print how many primes there are
        #[arg(long)]
        count: bool,

        /// Print at most this many primes
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Project run times from a measured sieve
    Timeline {
        /// Bit width of the measured run
        #[arg(short, long)]
        bits: u32,

        /// Seconds the measured run took
        #[arg(short, long)]
        seconds: f64,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Check the configuration for errors
    Validate,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            range,
            samples,
            seed,
            no_self_test,
            no_timeline,
            json,
        } => commands::run::run(
            config_path,
            &range,
            commands::run::RunOptions {
                samples,
                seed,
                self_test: !no_self_test,
                timeline: !no_timeline,
                json,
            },
        )?,
        Commands::Factor {
            numbers,
            range,
            json,
        } => commands::factor::run(config_path, &range, &numbers, json)?,
        Commands::Primes {
            range,
            count,
            limit,
        } => commands::primes::run(config_path, &range, count, limit)?,
        Commands::Timeline { bits, seconds } => {
            commands::timeline::run(config_path, bits, seconds)?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path)?,
            ConfigAction::Validate => commands::config_cmd::validate(config_path)?,
            ConfigAction::Path => commands::config_cmd::path(config_path)?,
            ConfigAction::Init { force } => commands::config_cmd::init(config_path, force)?,
        },
    }

    Ok(())
}
