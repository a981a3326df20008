use serde::{Deserialize, Serialize};

/// The explicit result of a step in a typed pipeline.
///
/// `Outcome` represents "Control Flow as Data".
/// Instead of tagging an untyped record with an exit key, a step signals
/// a terminal failure by returning `Fault`. The reducer checks for it
/// uniformly between steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome<T, E> {
    /// Proceed to the next step with this value
    Next(T),

    /// A structural fault (in-band error path). Halts the sequence.
    Fault(E),
}

impl<T, E> Outcome<T, E> {
    pub fn next(value: T) -> Self {
        Outcome::Next(value)
    }

    pub fn fault(error: E) -> Self {
        Outcome::Fault(error)
    }

    pub fn is_next(&self) -> bool {
        matches!(self, Outcome::Next(_))
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, op: F) -> Outcome<U, E> {
        match self {
            Outcome::Next(t) => Outcome::Next(op(t)),
            Outcome::Fault(e) => Outcome::Fault(e),
        }
    }

    pub fn map_err<E2, F: FnOnce(E) -> E2>(self, op: F) -> Outcome<T, E2> {
        match self {
            Outcome::Next(t) => Outcome::Next(t),
            Outcome::Fault(e) => Outcome::Fault(op(e)),
        }
    }

    /// Chain a fallible continuation. A `Fault` passes through untouched.
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U, E>>(self, op: F) -> Outcome<U, E> {
        match self {
            Outcome::Next(t) => op(t),
            Outcome::Fault(e) => Outcome::Fault(e),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Next(t) => Ok(t),
            Outcome::Fault(e) => Err(e),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(t) => Outcome::Next(t),
            Err(e) => Outcome::Fault(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_then_short_circuits_on_fault() {
        let fault: Outcome<i32, &str> = Outcome::fault("boom");
        let mut called = false;
        let out = fault.and_then(|v| {
            called = true;
            Outcome::next(v + 1)
        });
        assert!(!called);
        assert_eq!(out, Outcome::Fault("boom"));
    }

    #[test]
    fn test_result_conversion() {
        let ok: Outcome<i32, String> = Ok(3).into();
        assert_eq!(ok.clone().into_result(), Ok(3));
        assert!(ok.is_next());

        let err: Outcome<i32, String> = Err("bad".to_string()).into();
        assert!(err.is_fault());
        assert_eq!(err.map_err(|e| e.len()).into_result(), Err(3));
    }
}
