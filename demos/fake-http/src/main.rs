//! fake-http: run request bodies through the seqfold endpoint.
//!
//! # Usage
//! - `fake-http` - run every canned scenario concurrently
//! - `fake-http --body '{"collection":[1],"bool":true}'` - run one body
//! - `fake-http --typed ...` - use the typed pipeline instead

use anyhow::{Context, Result};
use clap::Parser;
use fake_http_demo::{
    EndpointConfig, SCENARIOS, Stage, endpoint_pipeline, handle, init_tracing,
};
use seqfold::std_lib::payload::ErrorPayload;
use seqfold::{Bus, Outcome};
use serde_json::Value;
use std::path::PathBuf;
use tokio::task::JoinSet;

/// Fake HTTP endpoint driven by a sequential reducer
#[derive(Parser, Debug)]
#[command(name = "fake-http", version, about)]
struct Cli {
    /// Request body to handle (default: run the canned scenarios)
    #[arg(short, long)]
    body: Option<String>,

    /// TOML config file
    #[arg(short, long, default_value = "fake-http.toml")]
    config: PathBuf,

    /// Override the simulated save latency
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Use the typed Outcome pipeline
    #[arg(long)]
    typed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = EndpointConfig::load(Some(&cli.config))
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(delay) = cli.delay_ms {
        config.save_delay_ms = delay;
    }
    tracing::debug!(?config, "Endpoint configured");

    match cli.body {
        Some(body) => {
            let (ok, rendered) = respond(&body, &config, cli.typed).await?;
            println!("{} {rendered}", mark(ok));
        }
        None => run_scenarios(config, cli.typed).await?,
    }
    Ok(())
}

async fn run_scenarios(config: EndpointConfig, typed: bool) -> Result<()> {
    let mut set = JoinSet::new();
    for (index, (name, body)) in SCENARIOS.iter().enumerate() {
        let config = config.clone();
        set.spawn(async move {
            let outcome = respond(body, &config, typed).await;
            (index, *name, outcome)
        });
    }

    let mut results = Vec::with_capacity(SCENARIOS.len());
    while let Some(joined) = set.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|(index, _, _)| *index);

    for (_, name, outcome) in results {
        let (ok, rendered) = outcome?;
        println!("{} {name}: {rendered}", mark(ok));
    }
    Ok(())
}

/// Handle one body. Returns whether it settled successfully and the
/// response rendered as JSON.
async fn respond(body: &str, config: &EndpointConfig, typed: bool) -> Result<(bool, String)> {
    let mut bus = Bus::new().with(config.clone());

    if typed {
        let outcome = endpoint_pipeline(config)
            .execute(Stage::Received(body.to_string()), &mut bus)
            .await?;
        return Ok(match outcome {
            Outcome::Next(Stage::Saved(status)) => (true, status.to_string()),
            Outcome::Next(other) => (false, format!("{other:?}")),
            Outcome::Fault(payload) => (false, serde_json::to_string(&payload)?),
        });
    }

    let settled: Value = handle(body, &mut bus).await?;
    let ok = ErrorPayload::from_value(&settled).is_none();
    Ok((ok, settled.to_string()))
}

fn mark(ok: bool) -> &'static str {
    if ok { "✅" } else { "❌" }
}
