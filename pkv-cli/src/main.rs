//! PKV command-line shell
//!
//! Generates serials from seeds and classifies serials with a configured
//! verifier.
//!
//! Usage:
//!   pkv generate --count 3
//!   pkv check A279-1717-7D7A-CA2E-7154
//!   pkv demo
//!
//! A scheme file (`--config`) selects the key byte parameters, the checked
//! slots, and the blacklist. Without one the reference scheme is used.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pkv_cli::{
    check_serials, exit_code, generate_serials, random_seeds, render_checks, render_generated,
    DEMO_SERIALS, EXIT_ERROR, EXIT_GOOD,
};
use pkv_license::{parse_seed, KeyGenerator, KeyVerifier, SchemeConfig};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pkv")]
#[command(about = "Generate and check partial key verification serials")]
struct Args {
    /// Path to a TOML scheme file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate serials from given or random seeds
    Generate {
        /// Seed as hex (repeatable); random seeds are drawn when omitted
        #[arg(short, long = "seed")]
        seeds: Vec<String>,

        /// Number of random seeds to draw
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },
    /// Check one or more serials
    Check {
        /// Serials, with or without hyphens
        #[arg(required = true)]
        serials: Vec<String>,
    },
    /// Check the serials shipped with the reference application
    Demo,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(EXIT_ERROR);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let scheme = match &args.config {
        Some(path) => SchemeConfig::load(path)
            .with_context(|| format!("Failed to load scheme from {}", path.display()))?,
        None => SchemeConfig::default(),
    };
    debug!("Scheme: {:?}", scheme);

    match args.command {
        Command::Generate { seeds, count } => {
            let generator = KeyGenerator::from_config(&scheme)?;
            let seeds = if seeds.is_empty() {
                random_seeds(&mut rand::thread_rng(), count)
            } else {
                seeds
                    .iter()
                    .map(|s| parse_seed(s))
                    .collect::<Result<Vec<_>, _>>()
                    .context("Invalid --seed")?
            };
            info!("Generating {} serial(s)", seeds.len());

            let keys = generate_serials(&generator, &seeds);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&keys)?);
            } else {
                print!("{}", render_generated(&keys));
            }
        }
        Command::Check { serials } => {
            let verifier = KeyVerifier::from_config(&scheme)?;
            report_checks(&verifier, serials.as_slice(), args.json)?;
        }
        Command::Demo => {
            let verifier = KeyVerifier::from_config(&scheme)?;
            report_checks(&verifier, &DEMO_SERIALS[..], args.json)?;
        }
    }

    Ok(())
}

fn report_checks<S: AsRef<str>>(verifier: &KeyVerifier, serials: &[S], json: bool) -> Result<()> {
    info!(
        "Checking {} serial(s) against slots {:?}",
        serials.len(),
        verifier.enabled_slots().collect::<Vec<_>>()
    );

    let reports = check_serials(verifier, serials);
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", render_checks(&reports));
    }

    let code = exit_code(&reports);
    if code != EXIT_GOOD {
        process::exit(code);
    }
    Ok(())
}
