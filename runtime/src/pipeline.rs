//! # Pipeline: Typed Fault-Aware Reduction
//!
//! A `Pipeline<T, E>` is a named, ordered list of [`Step`]s. It threads an
//! [`Outcome<T, E>`] through [`reduce_async`] and halts on the first
//! `Outcome::Fault`, so failures travel as typed values instead of an exit
//! key on an untyped record.
//!
//! ## Example
//!
//! ```rust
//! use seqfold_core::prelude::*;
//! use seqfold_runtime::{OutcomeFn, Pipeline};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = Pipeline::<i32, String>::new("Checked")
//!     .then(OutcomeFn::new(|n: i32| async move { anyhow::Ok(Outcome::Next(n + 1)) }))
//!     .then(OutcomeFn::new(|n: i32| async move {
//!         anyhow::Ok(if n > 1 {
//!             Outcome::Fault(format!("{n} too big"))
//!         } else {
//!             Outcome::Next(n)
//!         })
//!     }));
//!
//! let mut bus = Bus::new();
//! assert_eq!(pipeline.execute(0, &mut bus).await?, Outcome::Next(1));
//! assert_eq!(pipeline.execute(5, &mut bus).await?, Outcome::Fault("6 too big".to_string()));
//! # Ok(())
//! # }
//! ```

use crate::reduce::reduce_async;
use async_trait::async_trait;
use seqfold_core::bus::Bus;
use seqfold_core::outcome::Outcome;
use seqfold_core::schematic::Schematic;
use seqfold_core::step::Step;
use seqfold_core::stop::StopCondition;
use seqfold_core::transition::{ANONYMOUS_STEP, Transition};

/// Lifts a [`Step`] over `T` into a [`Transition`] over `Outcome<T, E>`.
struct Lifted<S> {
    step: S,
    label: String,
}

#[async_trait]
impl<T, E, S> Transition<Outcome<T, E>> for Lifted<S>
where
    T: Send + 'static,
    E: Send + 'static,
    S: Step<T, E>,
{
    async fn run(&self, state: Outcome<T, E>, bus: &mut Bus) -> anyhow::Result<Outcome<T, E>> {
        match state {
            Outcome::Next(value) => self.step.run(value, bus).await,
            // The fault stop condition settles before this is reached.
            fault @ Outcome::Fault(_) => Ok(fault),
        }
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

pub struct Pipeline<T, E> {
    schematic: Schematic,
    steps: Vec<Box<dyn Transition<Outcome<T, E>>>>,
}

impl<T, E> Pipeline<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub fn new(label: &str) -> Self {
        Self {
            schematic: Schematic::new(label),
            steps: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.schematic.description = Some(desc.into());
        self
    }

    /// Append a step. Unnamed closure steps are labelled by position.
    pub fn then<S>(mut self, step: S) -> Self
    where
        S: Step<T, E> + 'static,
    {
        let label = match step.label() {
            label if label == ANONYMOUS_STEP => format!("step-{}", self.steps.len() + 1),
            label => label,
        };
        self.schematic.push(label.clone());
        self.steps.push(Box::new(Lifted { step, label }));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, settling on the first `Fault`.
    ///
    /// `Err` is only returned when a step itself fails.
    pub async fn execute(&self, initial: T, bus: &mut Bus) -> anyhow::Result<Outcome<T, E>> {
        let name = self.schematic.name.as_str();
        tracing::debug!(pipeline = %name, steps = self.steps.len(), "Executing pipeline");

        let settled = reduce_async(
            Outcome::Next(initial),
            &self.steps,
            &StopCondition::fault(),
            bus,
        )
        .await?;

        if settled.is_fault() {
            tracing::debug!(pipeline = %name, "Pipeline settled with fault");
        }
        Ok(settled)
    }

    /// Get a reference to the Schematic (structural view).
    pub fn schematic(&self) -> &Schematic {
        &self.schematic
    }

    /// Consume and return the Schematic.
    pub fn into_schematic(self) -> Schematic {
        self.schematic
    }
}
