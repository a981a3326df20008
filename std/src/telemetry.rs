//! # Telemetry: Observability Decorators
//!
//! Wrap any [`Transition`] or [`Step`] to trace its input, duration and result.

use async_trait::async_trait;
use seqfold_core::bus::Bus;
use seqfold_core::outcome::Outcome;
use seqfold_core::step::Step;
use seqfold_core::transition::Transition;
use std::fmt::Debug;
use std::time::Instant;
use tracing::{Instrument, Span, info_span};

/// Runs the inner step inside a `Step` span and reports how it went.
#[derive(Clone)]
pub struct Traced<S> {
    inner: S,
    name: String,
}

impl<S> Traced<S> {
    pub fn new(inner: S, name: &str) -> Self {
        Self {
            inner,
            name: name.to_string(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn span(&self) -> Span {
        info_span!("Step", seqfold.step = %self.name)
    }
}

#[async_trait]
impl<S, T> Transition<T> for Traced<S>
where
    S: Transition<T>,
    T: Send + Debug + 'static,
{
    async fn run(&self, input: T, bus: &mut Bus) -> anyhow::Result<T> {
        async move {
            tracing::debug!(?input, "Entering step");
            let start = Instant::now();

            let result = self.inner.run(input, bus).await;

            let duration = start.elapsed();
            match &result {
                Ok(val) => tracing::info!(?val, ?duration, "Step completed"),
                Err(e) => tracing::error!(error = %e, ?duration, "Step failed"),
            }
            result
        }
        .instrument(self.span())
        .await
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[async_trait]
impl<S, T, E> Step<T, E> for Traced<S>
where
    S: Step<T, E>,
    T: Send + Debug + 'static,
    E: Send + Debug + 'static,
{
    async fn run(&self, input: T, bus: &mut Bus) -> anyhow::Result<Outcome<T, E>> {
        async move {
            tracing::debug!(?input, "Entering step");
            let start = Instant::now();

            let result = self.inner.run(input, bus).await;

            let duration = start.elapsed();
            match &result {
                Ok(Outcome::Next(val)) => tracing::info!(?val, ?duration, "Step completed"),
                Ok(Outcome::Fault(fault)) => tracing::warn!(?fault, ?duration, "Step faulted"),
                Err(e) => tracing::error!(error = %e, ?duration, "Step failed"),
            }
            result
        }
        .instrument(self.span())
        .await
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
