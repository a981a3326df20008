//! # Stop conditions
//!
//! A reduction settles early when its stop condition holds for the current
//! accumulator. The condition is checked *before* each step, so a step whose
//! output satisfies it is the last one to run.

use crate::outcome::Outcome;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Predicate over the accumulator value.
pub type StopPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Accumulators that can carry an in-band exit flag under a string key.
pub trait ExitSignal {
    /// `true` when the value holds a truthy entry at `key`.
    fn exit_flag(&self, key: &str) -> bool;
}

impl ExitSignal for Value {
    fn exit_flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }
}

/// Truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy. Arrays and objects are truthy
/// even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// When a reduction should halt before running the next step.
pub enum StopCondition<T> {
    /// Run until the steps are exhausted.
    Never,
    /// Halt as soon as the predicate returns `true`.
    Predicate(StopPredicate<T>),
    /// Halt when the accumulator carries a truthy value at `key`.
    ExitProperty {
        key: String,
        check: fn(&T, &str) -> bool,
    },
}

impl<T> StopCondition<T> {
    pub fn never() -> Self {
        StopCondition::Never
    }

    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        StopCondition::Predicate(Arc::new(predicate))
    }

    /// Check the condition against the current accumulator.
    pub fn should_stop(&self, value: &T) -> bool {
        match self {
            StopCondition::Never => false,
            StopCondition::Predicate(predicate) => predicate(value),
            StopCondition::ExitProperty { key, check } => check(value, key),
        }
    }

    /// Short tag for traces.
    pub fn kind(&self) -> &'static str {
        match self {
            StopCondition::Never => "never",
            StopCondition::Predicate(_) => "predicate",
            StopCondition::ExitProperty { .. } => "exit_property",
        }
    }
}

impl<T: ExitSignal> StopCondition<T> {
    pub fn exit_property(key: impl Into<String>) -> Self {
        StopCondition::ExitProperty {
            key: key.into(),
            check: |value, key| value.exit_flag(key),
        }
    }
}

impl<T: 'static, E: 'static> StopCondition<Outcome<T, E>> {
    /// Halt on the first [`Outcome::Fault`].
    pub fn fault() -> Self {
        StopCondition::when(Outcome::is_fault)
    }
}

impl<T> Default for StopCondition<T> {
    fn default() -> Self {
        StopCondition::Never
    }
}

impl<T> Clone for StopCondition<T> {
    fn clone(&self) -> Self {
        match self {
            StopCondition::Never => StopCondition::Never,
            StopCondition::Predicate(p) => StopCondition::Predicate(p.clone()),
            StopCondition::ExitProperty { key, check } => StopCondition::ExitProperty {
                key: key.clone(),
                check: *check,
            },
        }
    }
}

impl<T> fmt::Debug for StopCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCondition::ExitProperty { key, .. } => f
                .debug_struct("ExitProperty")
                .field("key", key)
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}
