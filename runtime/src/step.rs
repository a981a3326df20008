//! Closure adapters.
//!
//! Wrap plain functions so they can sit in a step slice next to hand-written
//! [`Transition`] and [`Step`] implementations. None of these adapters touch
//! the [`Bus`]; implement the traits directly when a step needs resources.

use async_trait::async_trait;
use seqfold_core::bus::Bus;
use seqfold_core::outcome::Outcome;
use seqfold_core::step::Step;
use seqfold_core::transition::{Transition, type_name_of};
use std::future::Future;

/// A synchronous `Fn(T) -> T` used as an async step.
///
/// The returned value is treated as already completed.
#[derive(Clone)]
pub struct SyncStep<F> {
    f: F,
    label: String,
}

impl<F> SyncStep<F> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            label: type_name_of::<F>(),
        }
    }

    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[async_trait]
impl<T, F> Transition<T> for SyncStep<F>
where
    T: Send + 'static,
    F: Fn(T) -> T + Send + Sync,
{
    async fn run(&self, state: T, _bus: &mut Bus) -> anyhow::Result<T> {
        Ok((self.f)(state))
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// An async closure `Fn(T) -> Future<Output = anyhow::Result<T>>` used as a step.
#[derive(Clone)]
pub struct FnStep<F> {
    f: F,
    label: String,
}

impl<F> FnStep<F> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            label: type_name_of::<F>(),
        }
    }

    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[async_trait]
impl<T, F, Fut> Transition<T> for FnStep<F>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    async fn run(&self, state: T, _bus: &mut Bus) -> anyhow::Result<T> {
        (self.f)(state).await
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// An async closure returning an [`Outcome`], used as a pipeline [`Step`].
#[derive(Clone)]
pub struct OutcomeFn<F> {
    f: F,
    label: String,
}

impl<F> OutcomeFn<F> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            label: type_name_of::<F>(),
        }
    }

    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[async_trait]
impl<T, E, F, Fut> Step<T, E> for OutcomeFn<F>
where
    T: Send + 'static,
    E: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Outcome<T, E>>> + Send + 'static,
{
    async fn run(&self, state: T, _bus: &mut Bus) -> anyhow::Result<Outcome<T, E>> {
        (self.f)(state).await
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// Box a synchronous closure as a [`Transition`].
pub fn sync_step<T, F>(f: F) -> Box<dyn Transition<T>>
where
    T: Send + 'static,
    F: Fn(T) -> T + Send + Sync + 'static,
{
    Box::new(SyncStep::new(f))
}

/// Box an async closure as a [`Transition`].
pub fn async_step<T, F, Fut>(f: F) -> Box<dyn Transition<T>>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    Box::new(FnStep::new(f))
}
