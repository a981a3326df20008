//! # Reduce: Sequential Step Application
//!
//! Applies an ordered slice of steps to an initial value, one at a time,
//! settling early when the stop condition holds.
//!
//! A reduction has two states: advancing (cursor inside the slice and stop
//! condition false) and settled. The stop condition is checked before every
//! step; reaching the end of the slice settles with the last produced value.
//! The slice is only borrowed, never modified.

use seqfold_core::bus::Bus;
use seqfold_core::stop::StopCondition;
use seqfold_core::transition::Transition;
use tracing::Instrument;

/// Synchronous reduction with an optional stop predicate.
///
/// ```rust
/// use seqfold_runtime::reduce;
///
/// let steps: [fn(i32) -> i32; 3] = [|x| x + 1, |x| x * 10, |x| x - 3];
/// assert_eq!(reduce(1, &steps, None), 17);
///
/// let stop = |x: &i32| *x >= 20;
/// assert_eq!(reduce(1, &steps, Some(&stop)), 20);
/// ```
pub fn reduce<T, F>(initial: T, steps: &[F], stop: Option<&dyn Fn(&T) -> bool>) -> T
where
    F: Fn(T) -> T,
{
    fold_steps(initial, steps, |value| stop.is_some_and(|halt| halt(value)))
}

/// Synchronous reduction with any [`StopCondition`], including exit properties.
pub fn reduce_with<T, F>(initial: T, steps: &[F], stop: &StopCondition<T>) -> T
where
    F: Fn(T) -> T,
{
    fold_steps(initial, steps, |value| stop.should_stop(value))
}

fn fold_steps<T, F>(initial: T, steps: &[F], halt: impl Fn(&T) -> bool) -> T
where
    F: Fn(T) -> T,
{
    let mut value = initial;
    for step in steps {
        if halt(&value) {
            return value;
        }
        value = step(value);
    }
    value
}

/// Asynchronous reduction.
///
/// Each step's future is awaited before the next step starts. A step that
/// returns `Err` aborts the reduction and the error is returned unchanged;
/// the reducer itself never fails.
pub async fn reduce_async<T>(
    initial: T,
    steps: &[Box<dyn Transition<T>>],
    stop: &StopCondition<T>,
    bus: &mut Bus,
) -> anyhow::Result<T>
where
    T: Send + 'static,
{
    let span = tracing::info_span!(
        "Reduce",
        seqfold.steps = steps.len(),
        seqfold.stop = stop.kind()
    );

    async move {
        let mut value = initial;
        for (cursor, step) in steps.iter().enumerate() {
            if stop.should_stop(&value) {
                tracing::debug!(cursor, stop = ?stop, "Stop condition met, settling early");
                return Ok(value);
            }

            tracing::trace!(cursor, step = %step.label(), "Running step");
            value = step.run(value, bus).await.inspect_err(|e| {
                tracing::debug!(cursor, error = %e, "Step failed, aborting reduction");
            })?;
        }

        tracing::trace!("Steps exhausted");
        Ok(value)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_reduce_empty_returns_initial() {
        let steps: Vec<fn(String) -> String> = vec![];
        assert_eq!(reduce("seed".to_string(), &steps, None), "seed");
        assert_eq!(
            reduce_with("seed".to_string(), &steps, &StopCondition::when(|_| true)),
            "seed"
        );
    }

    #[test]
    fn test_reduce_matches_left_to_right_application() {
        let steps: Vec<Box<dyn Fn(i64) -> i64>> = vec![
            Box::new(|x: i64| x + 2),
            Box::new(|x: i64| x * 3),
            Box::new(|x: i64| x - 1),
        ];
        let composed = |x: i64| ((x + 2) * 3) - 1;

        for seed in [-5, 0, 7, 100] {
            assert_eq!(reduce(seed, &steps, None), composed(seed));
        }
    }

    #[test]
    fn test_reduce_stops_after_first_satisfying_step() {
        let calls = RefCell::new(Vec::new());
        let record = |n: usize, out: i32| {
            calls.borrow_mut().push(n);
            out
        };
        let steps: Vec<Box<dyn Fn(i32) -> i32 + '_>> = vec![
            Box::new(|_: i32| record(1, 5)),
            Box::new(|_: i32| record(2, -1)),
            Box::new(|_: i32| record(3, 9)),
        ];

        let stop = |v: &i32| *v < 0;
        assert_eq!(reduce(0, &steps, Some(&stop)), -1);
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_reduce_checks_initial_value() {
        let steps: [fn(i32) -> i32; 1] = [|_: i32| -> i32 {
            unreachable!("stop holds for the initial value")
        }];
        let stop = |v: &i32| *v == 0;
        assert_eq!(reduce(0, &steps, Some(&stop)), 0);
    }

    #[test]
    fn test_reduce_with_exit_property_halts_midway() {
        let calls = Cell::new(0);
        let steps: Vec<Box<dyn Fn(Value) -> Value + '_>> = vec![
            Box::new(|_: Value| {
                calls.set(calls.get() + 1);
                json!({ "errors": [1] })
            }),
            Box::new(|_: Value| {
                calls.set(calls.get() + 1);
                json!({ "saved": true })
            }),
        ];

        let out = reduce_with(json!({}), &steps, &StopCondition::exit_property("errors"));

        assert_eq!(out, json!({ "errors": [1] }));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_reduce_with_predicate_skips_remaining_steps() {
        let steps: [fn(u32) -> u32; 3] = [|x| x + 5, |x| x * 100, |x| x + 1];
        let stop = StopCondition::when(|x: &u32| *x > 3);
        assert_eq!(reduce_with(0, &steps, &stop), 5);
        assert_eq!(reduce_with(0, &steps, &StopCondition::never()), 501);
    }
}
