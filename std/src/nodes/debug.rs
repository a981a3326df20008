use async_trait::async_trait;
use seqfold_core::{bus::Bus, outcome::Outcome, step::Step, transition::Transition};
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::Level;

/// Logs the accumulator at a fixed level and passes it on unchanged.
///
/// Usable both as a [`Transition`] and as a pass-through pipeline [`Step`].
#[derive(Debug, Clone)]
pub struct LogNode<T> {
    message: String,
    level: Level,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> LogNode<T> {
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
            _marker: PhantomData,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Level::INFO)
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(message, Level::DEBUG)
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl<T: Debug> LogNode<T> {
    fn emit(&self, value: &T) {
        let message = self.message.as_str();
        // `tracing` macros need the level at compile time.
        if self.level == Level::ERROR {
            tracing::error!(?value, "{message}");
        } else if self.level == Level::WARN {
            tracing::warn!(?value, "{message}");
        } else if self.level == Level::INFO {
            tracing::info!(?value, "{message}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(?value, "{message}");
        } else {
            tracing::trace!(?value, "{message}");
        }
    }
}

#[async_trait]
impl<T> Transition<T> for LogNode<T>
where
    T: Debug + Send + 'static,
{
    async fn run(&self, input: T, _bus: &mut Bus) -> anyhow::Result<T> {
        self.emit(&input);
        Ok(input)
    }
}

#[async_trait]
impl<T, E> Step<T, E> for LogNode<T>
where
    T: Debug + Send + 'static,
    E: Send + 'static,
{
    async fn run(&self, input: T, _bus: &mut Bus) -> anyhow::Result<Outcome<T, E>> {
        self.emit(&input);
        Ok(Outcome::Next(input))
    }
}

/// Faults every value it receives with a clone of `fault`.
#[derive(Debug, Clone)]
pub struct ErrorNode<T, E> {
    fault: E,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T, E> ErrorNode<T, E> {
    pub fn new(fault: E) -> Self {
        Self {
            fault,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T, E> Step<T, E> for ErrorNode<T, E>
where
    T: Send + 'static,
    E: Clone + Send + Sync + 'static,
{
    async fn run(&self, _input: T, _bus: &mut Bus) -> anyhow::Result<Outcome<T, E>> {
        Ok(Outcome::Fault(self.fault.clone()))
    }
}
