//! A fake HTTP endpoint built as a seqfold reduction.
//!
//! [`steps::handle`] runs the untyped form: a JSON accumulator with an
//! `errors` exit property. [`typed::endpoint_pipeline`] runs the same four
//! steps with a [`seqfold::Outcome`] per step.

pub mod config;
pub mod steps;
pub mod typed;

pub use config::{ConfigError, EndpointConfig};
pub use steps::{endpoint_steps, handle};
pub use typed::{Stage, endpoint_pipeline};

use tracing_subscriber::EnvFilter;

/// Initialize a stdout tracing subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seqfold_runtime=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Request bodies exercising every branch of the endpoint.
pub static SCENARIOS: [(&str, &str); 7] = [
    ("valid body", r#"{"collection":[1,2,3,-4,0],"bool":true}"#),
    ("fractional entries", r#"{"collection":[1.5,2],"bool":true}"#),
    ("not json", "fail"),
    ("missing collection", r#"{"bool":true}"#),
    ("missing bool", r#"{"collection":[1,2,3]}"#),
    ("empty object", "{}"),
    ("save refused", r#"{"collection":[5,6],"bool":false}"#),
];
