//! # Cupcake Calibration Tool
//!
//! Checks, prints and initialises the servo calibration file before the
//! animatronic controller is started.
//!
//! # Usage
//!
//! ```bash
//! # Validate a file, reporting every miscalibrated channel
//! cupcake_calibrate check --config /etc/cupcake/servo.toml
//!
//! # Print the table
//! cupcake_calibrate show --config servo.toml --format json
//!
//! # Write factory defaults
//! cupcake_calibrate init --output servo.toml
//! ```

#![deny(warnings)]

use clap::{Parser, Subcommand};
use cupcake_calibrate::commands::{self, OutputFormat};
use cupcake_common::consts::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Cupcake Calibration Tool - servo limits, timing and bus address
#[derive(Parser, Debug)]
#[command(name = "cupcake_calibrate")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Check, inspect and initialise servo calibration files")]
#[command(long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a calibration file
    Check {
        /// Path to the calibration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Print the calibration table, timing and bus address
    Show {
        /// Path to the calibration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the factory calibration to a file
    Init {
        /// Destination path
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_tracing(&args);

    match args.command {
        Command::Check { config } => {
            commands::check(&config)?;
        }
        Command::Show { config, format } => {
            let rendered = commands::show(&config, format)?;
            println!("{rendered}");
        }
        Command::Init { output, force } => {
            commands::init(&output, force)?;
            info!("Wrote factory calibration to {}", output.display());
        }
    }

    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
