//! The four endpoint steps over an untyped JSON accumulator.
//!
//! Every step either returns its normal output or an error record carrying a
//! truthy `errors` key; [`handle`] reduces with that key as exit property.

use crate::config::EndpointConfig;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use seqfold::std_lib::payload::{ERRORS_KEY, ErrorPayload};
use seqfold::std_lib::prelude::{DelayNode, LogNode, Traced};
use seqfold::{Bus, StopCondition, Transition, reduce_async};
use serde_json::{Map, Number, Value, json};
use std::time::Duration;

pub const PARSE_NOT_VALID: (u32, &str) = (0, "Error.Parse.NotValid");
pub const COLLECTION_EMPTY: (u32, &str) = (1, "Error.Validate.Collection.Empty");
pub const BOOL_MISSING: (u32, &str) = (2, "Error.Validate.Bool.Missing");
pub const SAVE_TIMEOUT: (u32, &str) = (3, "Error.Db.SaveToDb.ConnectionTimeout");

fn error_value((code, message): (u32, &str)) -> Value {
    ErrorPayload::single(code, message).into_value()
}

/// Step 1: the accumulator holds the raw body as a JSON string.
pub struct Parse;

#[async_trait]
impl Transition<Value> for Parse {
    async fn run(&self, body: Value, _bus: &mut Bus) -> anyhow::Result<Value> {
        let parsed = match body {
            Value::String(raw) => serde_json::from_str(&raw).ok(),
            _ => None,
        };
        Ok(parsed.unwrap_or_else(|| error_value(PARSE_NOT_VALID)))
    }
}

/// Step 2: `collection` must be a non-empty array and `bool` a boolean.
pub struct Validate;

#[async_trait]
impl Transition<Value> for Validate {
    async fn run(&self, obj: Value, _bus: &mut Bus) -> anyhow::Result<Value> {
        let mut payload = ErrorPayload::new();

        let has_entries = obj
            .get("collection")
            .and_then(Value::as_array)
            .is_some_and(|items| !items.is_empty());
        if !has_entries {
            payload.push(COLLECTION_EMPTY.0, COLLECTION_EMPTY.1);
        }
        if !obj.get("bool").is_some_and(Value::is_boolean) {
            payload.push(BOOL_MISSING.0, BOOL_MISSING.1);
        }

        Ok(if payload.is_empty() {
            obj
        } else {
            payload.into_value()
        })
    }
}

/// Step 3: keep positive entries scaled by the configured multiplier and
/// record the original length and a timestamp under `meta`.
pub struct Transform;

#[async_trait]
impl Transition<Value> for Transform {
    async fn run(&self, obj: Value, bus: &mut Bus) -> anyhow::Result<Value> {
        let multiplier = bus.get_or_default::<EndpointConfig>().multiplier;

        let mut fields = match obj {
            Value::Object(fields) => fields,
            other => anyhow::bail!("transform expects a validated object, got {other}"),
        };
        let items = fields
            .get("collection")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let collection: Vec<Value> = items
            .iter()
            .filter_map(|x| match x {
                Value::Number(n) => scale(n, multiplier).map(Value::Number),
                _ => None,
            })
            .collect();

        let mut meta = Map::new();
        meta.insert("prevLength".into(), json!(items.len()));
        meta.insert(
            "time".into(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        fields.insert("collection".into(), Value::Array(collection));
        fields.insert("meta".into(), Value::Object(meta));
        Ok(Value::Object(fields))
    }
}

/// `Some(n * multiplier)` for positive numbers, `None` otherwise.
pub(crate) fn scale(n: &Number, multiplier: i64) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        return (i > 0).then(|| Number::from(i.saturating_mul(multiplier)));
    }
    let f = n.as_f64().filter(|f| *f > 0.0)?;
    Number::from_f64(f * multiplier as f64)
}

/// Step 4: simulated database write. Succeeds with status `200` when the
/// record's `bool` is true, otherwise reports a connection timeout.
pub struct SaveToDb {
    latency: DelayNode<Value>,
}

impl SaveToDb {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency: DelayNode::new(latency),
        }
    }
}

#[async_trait]
impl Transition<Value> for SaveToDb {
    async fn run(&self, obj: Value, bus: &mut Bus) -> anyhow::Result<Value> {
        let obj = self.latency.run(obj, bus).await?;

        if obj.get("bool").and_then(Value::as_bool) == Some(true) {
            Ok(json!(200))
        } else {
            Ok(error_value(SAVE_TIMEOUT))
        }
    }
}

pub fn endpoint_steps(config: &EndpointConfig) -> Vec<Box<dyn Transition<Value>>> {
    let save = SaveToDb::new(Duration::from_millis(config.save_delay_ms));
    vec![
        Box::new(Traced::new(Parse, "parse")),
        Box::new(Traced::new(Validate, "validate")),
        Box::new(Traced::new(Transform, "transform")),
        Box::new(Traced::new(save, "save")),
        Box::new(LogNode::<Value>::debug("Request settled")),
    ]
}

/// Run a request body through the endpoint.
///
/// Settles with `200` on success or with the first error record produced.
/// Settings come from the [`EndpointConfig`] on the bus, or its defaults.
pub async fn handle(request_body: &str, bus: &mut Bus) -> anyhow::Result<Value> {
    let config = bus.get_or_default::<EndpointConfig>();
    reduce_async(
        Value::String(request_body.to_string()),
        &endpoint_steps(&config),
        &StopCondition::exit_property(ERRORS_KEY),
        bus,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_rejects_invalid_json_and_non_strings() {
        let mut bus = Bus::new();
        let bad = Parse.run(json!("fail"), &mut bus).await.unwrap();
        assert_eq!(bad, error_value(PARSE_NOT_VALID));

        let not_text = Parse.run(json!(12), &mut bus).await.unwrap();
        assert_eq!(not_text, error_value(PARSE_NOT_VALID));

        let ok = Parse.run(json!("{\"a\":1}"), &mut bus).await.unwrap();
        assert_eq!(ok, json!({ "a": 1 }));
    }

    #[tokio::test]
    async fn test_validate_collects_both_errors() {
        let out = Validate.run(json!({}), &mut Bus::new()).await.unwrap();
        let payload = ErrorPayload::from_value(&out).unwrap();
        assert_eq!(payload.errors.len(), 2);
        assert_eq!(payload.errors[0].code, 1);
        assert_eq!(payload.errors[1].code, 2);

        let empty = Validate
            .run(json!({ "collection": [], "bool": false }), &mut Bus::new())
            .await
            .unwrap();
        assert_eq!(empty, error_value(COLLECTION_EMPTY));
    }

    #[tokio::test]
    async fn test_transform_filters_and_scales() {
        let mut bus = Bus::new().with(EndpointConfig {
            save_delay_ms: 0,
            multiplier: 10,
        });
        let out = Transform
            .run(
                json!({ "collection": [3, -1, 0, 2.5, "x"], "bool": true }),
                &mut bus,
            )
            .await
            .unwrap();

        assert_eq!(out["collection"], json!([30, 25.0]));
        assert_eq!(out["meta"]["prevLength"], 5);
        assert!(out["meta"]["time"].as_str().is_some_and(|t| t.ends_with('Z')));
        assert_eq!(out["bool"], true);
    }

    #[tokio::test]
    async fn test_transform_rejects_non_objects() {
        let err = Transform.run(json!(7), &mut Bus::new()).await.unwrap_err();
        assert!(err.to_string().contains("validated object"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_waits_for_its_latency() {
        let save = SaveToDb::new(Duration::from_millis(1_000));
        let start = tokio::time::Instant::now();
        let out = save.run(json!({ "bool": true }), &mut Bus::new()).await.unwrap();
        assert_eq!(out, json!(200));
        assert!(start.elapsed() >= Duration::from_millis(1_000));
    }

    #[test]
    fn test_endpoint_steps_are_traced_in_order() {
        let labels: Vec<String> = endpoint_steps(&EndpointConfig::default())
            .iter()
            .map(|step| step.label())
            .collect();
        assert_eq!(labels, ["parse", "validate", "transform", "save", "LogNode"]);
    }

    #[test]
    fn test_scale_keeps_positive_numbers_only() {
        let n = |v: Value| match v {
            Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        };
        assert_eq!(scale(&n(json!(4)), 3), Some(Number::from(12)));
        assert_eq!(scale(&n(json!(1.5)), 2), Number::from_f64(3.0));
        assert_eq!(scale(&n(json!(0)), 2), None);
        assert_eq!(scale(&n(json!(-2.5)), 2), None);
    }
}
