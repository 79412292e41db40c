#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Twin Elements in a terminal.
//!
//! Keys come from `--input` or, line by line, from standard input. Logging
//! goes to standard error so it never interleaves with the rendered frames.

mod config;
mod driver;
mod session_transfer;
mod store;
mod terminal;

use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use twin_elements_rendering::Presentation;
use twin_elements_world::WorldConfig;

use crate::{
    config::CliConfig,
    driver::{Driver, Flow},
    store::SaveStore,
    terminal::TerminalBackend,
};

#[derive(Debug, Parser)]
#[command(name = "twin-elements")]
#[command(about = "Guide the fire and water actors out of a generated temple")]
#[command(version)]
struct Cli {
    /// Keystrokes to play instead of reading standard input (e.g. N42SDDW:Q)
    #[arg(short, long)]
    input: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save file location, overriding the configuration file
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Draw glyphs with ANSI colors
    #[arg(long)]
    color: bool,

    /// Verbose logging (-v, -vv, -vvv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the Twin Elements command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(save) = cli.save {
        config.save_path = save;
    }
    config.color |= cli.color;
    log::debug!("using {config:?}");

    let presentation = Presentation::new("Twin Elements", config.show_hud, config.color);
    let mut driver = Driver::new(
        WorldConfig::default(),
        SaveStore::new(config.save_path),
        presentation,
        TerminalBackend::new(io::stdout()),
    );

    match cli.input {
        Some(input) => {
            if driver.run_batch(input.chars())? == Flow::Exit {
                log::debug!("session ended before the input was exhausted");
            }
        }
        None => {
            driver.present()?;
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read from standard input")?;
                if driver.run_batch(line.chars())? == Flow::Exit {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    let _ = builder.filter_level(level).parse_default_env();
    if let Err(error) = builder.try_init() {
        eprintln!("failed to initialise logging: {error}");
    }
}
