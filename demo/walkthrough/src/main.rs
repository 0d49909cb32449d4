//! Apply Toolkit Walkthrough
//!
//! Runs the tutorial sections on the apply family and seeded simulation.
//!
//! # Sections
//!
//! - `walkthrough loops` - `lapply`, `sapply` and `vapply` over containers
//! - `walkthrough margins` - `apply` over matrix and array margins
//! - `walkthrough groups` - `split`, `tapply` and `unsplit`
//! - `walkthrough mapply` - multi-container application
//! - `walkthrough simulate` - seeded draws and sampling
//! - `walkthrough all` - every section in order

use std::path::PathBuf;

use anyhow::{Context, Result};
use apply_core::ApplyConfig;
use apply_engine::Toolkit;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod sections;

const DEFAULT_CONFIG: &str = "walkthrough.toml";

/// Apply Toolkit Walkthrough
#[derive(Parser)]
#[command(name = "walkthrough")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML); `APPLY_*` variables override it.
    /// Defaults to `walkthrough.toml` when that file exists.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for every random draw
    #[arg(short, long, global = true, default_value = "1")]
    seed: u64,

    #[command(subcommand)]
    command: Option<Section>,
}

#[derive(Subcommand, Clone, Copy)]
enum Section {
    /// Element-wise application over containers
    Loops,
    /// Application over matrix and array margins
    Margins,
    /// Splitting and grouped application
    Groups,
    /// Multi-container application
    Mapply,
    /// Seeded draws and sampling
    Simulate,
    /// Every section in order
    All,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("walkthrough=info".parse()?))
        .init();

    let cli = Cli::parse();
    let path = cli.config.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG);
        default.exists().then_some(default)
    });
    let config = ApplyConfig::load(path.as_deref()).context("loading configuration")?;
    info!(?config, seed = cli.seed, "Walkthrough starting");

    let toolkit = Toolkit::new(config);
    let section = cli.command.unwrap_or(Section::All);
    match section {
        Section::Loops => sections::loops(&toolkit)?,
        Section::Margins => sections::margins(&toolkit, cli.seed)?,
        Section::Groups => sections::groups(&toolkit, cli.seed)?,
        Section::Mapply => sections::mapply(&toolkit)?,
        Section::Simulate => sections::simulate(cli.seed)?,
        Section::All => {
            sections::loops(&toolkit)?;
            sections::margins(&toolkit, cli.seed)?;
            sections::groups(&toolkit, cli.seed)?;
            sections::mapply(&toolkit)?;
            sections::simulate(cli.seed)?;
        }
    }

    info!("Walkthrough complete");
    Ok(())
}
