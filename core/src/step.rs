use crate::bus::Bus;
use crate::outcome::Outcome;
use crate::transition::type_name_of;
use async_trait::async_trait;

/// A step that may fault in-band.
///
/// Where [`Transition`](crate::Transition) maps `T -> T` and relies on a stop
/// condition to inspect the value, a `Step` states its verdict explicitly:
/// `Outcome::Next` to continue, `Outcome::Fault` to halt with a typed error.
/// `Err` remains reserved for step-level failures that abort the run.
#[async_trait]
pub trait Step<T, E>: Send + Sync
where
    T: Send + 'static,
    E: Send + 'static,
{
    async fn run(&self, state: T, bus: &mut Bus) -> anyhow::Result<Outcome<T, E>>;

    fn label(&self) -> String {
        type_name_of::<Self>()
    }
}
