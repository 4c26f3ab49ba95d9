//! symnav CLI - Symbol outlines from the command line.
//!
//! Parses one source file into its declaration tree, prints per-kind
//! statistics, or serves a single JSON parse request.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use symnav::Config;
use tracing_subscriber::EnvFilter;

mod cli;

/// symnav: Symbol outlines for source files.
#[derive(Parser)]
#[command(name = "symnav")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .symnav.yaml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the symbol outline of a file
    Outline {
        /// Source file to parse
        file: PathBuf,

        /// Language tag (detected from the file extension by default)
        #[arg(short, long)]
        language: Option<String>,

        /// Print the full parse response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show symbol counts by kind for a file
    Stats {
        /// Source file to parse
        file: PathBuf,

        /// Language tag (detected from the file extension by default)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Answer one JSON parse request
    Request {
        /// File holding the request (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the parser manifest
    Manifest,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Outline {
            file,
            language,
            json,
        } => cli::outline::run(&file, language.as_deref(), json, &config),
        Commands::Stats { file, language } => {
            cli::stats::run(&file, language.as_deref(), &config)
        }
        Commands::Request { input } => cli::request::run(input.as_deref(), &config),
        Commands::Manifest => cli::manifest::run(),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> symnav::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_default(&std::env::current_dir()?),
    }
}
