//! # Error payloads
//!
//! The in-band failure record used with the `"errors"` exit property:
//!
//! ```json
//! { "errors": [ { "code": 0, "message": "Error.Parse.NotValid" } ] }
//! ```
//!
//! A step that fails returns this record instead of its normal output; the
//! reducer sees the truthy `errors` key and settles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Exit property key carried by [`ErrorPayload`].
pub const ERRORS_KEY: &str = "errors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorEntry {
    pub code: u32,
    pub message: String,
}

impl ErrorEntry {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ErrorPayload {
    pub errors: Vec<ErrorEntry>,
}

impl ErrorPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(code: u32, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorEntry::new(code, message)],
        }
    }

    pub fn push(&mut self, code: u32, message: impl Into<String>) {
        self.errors.push(ErrorEntry::new(code, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// JSON form, ready to be returned from a step.
    pub fn into_value(self) -> Value {
        serde_json::json!({ ERRORS_KEY: self.errors })
    }

    /// Read a payload back out of a settled value.
    ///
    /// Returns `None` when the value carries no `errors` array.
    pub fn from_value(value: &Value) -> Option<Self> {
        let errors = value.get(ERRORS_KEY)?;
        serde_json::from_value(errors.clone())
            .ok()
            .map(|errors| Self { errors })
    }

    /// JSON Schema of the payload, for API documentation.
    pub fn json_schema() -> Value {
        serde_json::to_value(schemars::schema_for!(ErrorPayload)).unwrap_or(Value::Null)
    }
}
