use crate::bus::Bus;
use async_trait::async_trait;
use std::any::type_name;

/// The contract for a single asynchronous step.
///
/// A `Transition<T>` maps the accumulator value `T` to the next accumulator
/// value. Returning `Err` is a step-level failure: the reducer propagates it
/// unchanged and runs no further steps.
///
/// In-band halting is expressed through the value itself (a stop predicate,
/// an exit property, or an [`Outcome::Fault`](crate::Outcome::Fault)), never through `Err`.
#[async_trait]
pub trait Transition<T>: Send + Sync
where
    T: Send + 'static,
{
    /// Execute the step
    async fn run(&self, state: T, bus: &mut Bus) -> anyhow::Result<T>;

    /// Human readable name used in schematics and traces.
    fn label(&self) -> String {
        type_name_of::<Self>()
    }
}

/// Label reported for closure types, which have no usable name.
pub const ANONYMOUS_STEP: &str = "anonymous";

/// Helper to extract a readable type name from a type.
///
/// Closures yield [`ANONYMOUS_STEP`]; named functions and types yield their
/// last path segment.
pub fn type_name_of<T: ?Sized>() -> String {
    let full = type_name::<T>();
    // Generic arguments contain `::` too, so only look at the outer path.
    let outer = full.split('<').next().unwrap_or(full);
    match outer.rsplit("::").next().unwrap_or(outer) {
        "{{closure}}" => ANONYMOUS_STEP.to_string(),
        last => last.to_string(),
    }
}
