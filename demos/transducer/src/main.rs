//! transducer: print an inventory before and after the vehicle transform.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use transducer_demo::{SAMPLE_VEHICLES, load_inventory, transform};

/// Filter, enrich and sort a vehicle inventory
#[derive(Parser, Debug)]
#[command(name = "transducer", version, about)]
struct Cli {
    /// JSON inventory file (default: bundled sample)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let raw = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => SAMPLE_VEHICLES.to_string(),
    };

    let vehicles = load_inventory(&raw).context("parsing inventory")?;
    tracing::info!(count = vehicles.len(), "Loaded inventory");
    let transformed = transform(vehicles.clone());
    tracing::info!(count = transformed.len(), "Transformed inventory");

    let render = |value: &transducer_demo::Inventory| -> Result<String> {
        Ok(if cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        })
    };

    println!("Initial data:");
    println!("{}", render(&vehicles)?);
    println!("\nTransformed data:");
    println!("{}", render(&transformed)?);
    Ok(())
}
