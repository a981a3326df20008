//! The same endpoint as a typed [`Pipeline`].
//!
//! Instead of an `errors` key on an untyped record, every step returns an
//! [`Outcome`] whose fault is an [`ErrorPayload`]. The accumulator is a
//! [`Stage`] enum, so a step receiving the wrong stage is a programming error
//! and surfaces as `Err`.

use crate::config::EndpointConfig;
use crate::steps::{BOOL_MISSING, COLLECTION_EMPTY, PARSE_NOT_VALID, SAVE_TIMEOUT, scale};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use seqfold::std_lib::payload::ErrorPayload;
use seqfold::std_lib::prelude::{DelayNode, ErrorNode, LogNode, Traced};
use seqfold::{Bus, Outcome, Pipeline, Step, Transition};
use serde_json::{Number, Value};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Numeric entries of the request collection
    pub collection: Vec<Number>,
    /// Entries dropped because they were not numbers
    pub skipped: usize,
    pub flag: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    pub prev_length: usize,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Received(String),
    Parsed(Value),
    Validated(Body),
    Transformed(Body, Meta),
    Saved(u16),
}

type StageOutcome = anyhow::Result<Outcome<Stage, ErrorPayload>>;

fn fault((code, message): (u32, &str)) -> StageOutcome {
    Ok(Outcome::Fault(ErrorPayload::single(code, message)))
}

pub struct ParseBody;

#[async_trait]
impl Step<Stage, ErrorPayload> for ParseBody {
    async fn run(&self, stage: Stage, _bus: &mut Bus) -> StageOutcome {
        let Stage::Received(raw) = stage else {
            anyhow::bail!("ParseBody expects a received body");
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Outcome::Next(Stage::Parsed(value))),
            Err(_) => fault(PARSE_NOT_VALID),
        }
    }
}

pub struct ValidateBody;

#[async_trait]
impl Step<Stage, ErrorPayload> for ValidateBody {
    async fn run(&self, stage: Stage, _bus: &mut Bus) -> StageOutcome {
        let Stage::Parsed(value) = stage else {
            anyhow::bail!("ValidateBody expects a parsed body");
        };
        let items = value
            .get("collection")
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty());
        let flag = value.get("bool").and_then(Value::as_bool);

        let mut errors = ErrorPayload::new();
        if items.is_none() {
            errors.push(COLLECTION_EMPTY.0, COLLECTION_EMPTY.1);
        }
        if flag.is_none() {
            errors.push(BOOL_MISSING.0, BOOL_MISSING.1);
        }

        let (Some(items), Some(flag)) = (items, flag) else {
            return Ok(Outcome::Fault(errors));
        };
        let collection: Vec<Number> = items
            .iter()
            .filter_map(|x| match x {
                Value::Number(n) => Some(n.clone()),
                _ => None,
            })
            .collect();
        let skipped = items.len() - collection.len();

        Ok(Outcome::Next(Stage::Validated(Body {
            collection,
            skipped,
            flag,
        })))
    }
}

pub struct TransformBody;

#[async_trait]
impl Step<Stage, ErrorPayload> for TransformBody {
    async fn run(&self, stage: Stage, bus: &mut Bus) -> StageOutcome {
        let Stage::Validated(body) = stage else {
            anyhow::bail!("TransformBody expects a validated body");
        };
        let multiplier = bus.get_or_default::<EndpointConfig>().multiplier;

        let meta = Meta {
            prev_length: body.collection.len() + body.skipped,
            time: Utc::now(),
        };
        let collection = body
            .collection
            .iter()
            .filter_map(|n| scale(n, multiplier))
            .collect();

        Ok(Outcome::Next(Stage::Transformed(
            Body {
                collection,
                skipped: 0,
                flag: body.flag,
            },
            meta,
        )))
    }
}

/// Simulated write: waits out the latency, then saves or refuses.
pub struct SaveBody {
    latency: DelayNode<Stage>,
    refused: ErrorNode<Stage, ErrorPayload>,
}

impl SaveBody {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency: DelayNode::new(latency),
            refused: ErrorNode::new(ErrorPayload::single(SAVE_TIMEOUT.0, SAVE_TIMEOUT.1)),
        }
    }
}

#[async_trait]
impl Step<Stage, ErrorPayload> for SaveBody {
    async fn run(&self, stage: Stage, bus: &mut Bus) -> StageOutcome {
        let stage = Transition::run(&self.latency, stage, bus).await?;
        match stage {
            Stage::Transformed(body, _) if body.flag => Ok(Outcome::Next(Stage::Saved(200))),
            refused @ Stage::Transformed(..) => Step::run(&self.refused, refused, bus).await,
            _ => anyhow::bail!("SaveBody expects a transformed body"),
        }
    }
}

pub fn endpoint_pipeline(config: &EndpointConfig) -> Pipeline<Stage, ErrorPayload> {
    let save = SaveBody::new(Duration::from_millis(config.save_delay_ms));
    Pipeline::new("FakeHttpEndpoint")
        .with_description("parse, validate, transform, save")
        .then(Traced::new(ParseBody, "parse"))
        .then(Traced::new(ValidateBody, "validate"))
        .then(Traced::new(TransformBody, "transform"))
        .then(Traced::new(save, "save"))
        .then(LogNode::debug("Request saved"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EndpointConfig {
        EndpointConfig {
            save_delay_ms: 0,
            multiplier: 2,
        }
    }

    async fn run(body: &str) -> Outcome<Stage, ErrorPayload> {
        endpoint_pipeline(&config())
            .execute(Stage::Received(body.to_string()), &mut Bus::new().with(config()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_saves() {
        let out = run(r#"{"collection":[1,2,3],"bool":true}"#).await;
        assert_eq!(out, Outcome::Next(Stage::Saved(200)));
    }

    #[tokio::test]
    async fn test_fractional_collection_is_accepted() {
        let out = run(r#"{"collection":[1.5,2],"bool":true}"#).await;
        assert_eq!(out, Outcome::Next(Stage::Saved(200)));
    }

    #[tokio::test]
    async fn test_faults_match_value_endpoint_codes() {
        let codes = |out: Outcome<Stage, ErrorPayload>| match out {
            Outcome::Fault(p) => p.errors.iter().map(|e| e.code).collect::<Vec<_>>(),
            Outcome::Next(stage) => panic!("expected fault, got {stage:?}"),
        };

        assert_eq!(codes(run("fail").await), vec![0]);
        assert_eq!(codes(run(r#"{"bool":true}"#).await), vec![1]);
        assert_eq!(codes(run(r#"{"collection":[1,2,3]}"#).await), vec![2]);
        assert_eq!(codes(run("{}").await), vec![1, 2]);
        assert_eq!(
            codes(run(r#"{"collection":[1,2,3],"bool":false}"#).await),
            vec![3]
        );
    }

    #[tokio::test]
    async fn test_validate_drops_non_numbers() {
        let parsed = serde_json::json!({ "collection": [2.5, "x", 4], "bool": true });
        let out = ValidateBody
            .run(Stage::Parsed(parsed), &mut Bus::new())
            .await
            .unwrap();

        let Outcome::Next(Stage::Validated(body)) = out else {
            panic!("expected validated stage");
        };
        assert_eq!(body.collection.len(), 2);
        assert_eq!(body.skipped, 1);
    }

    #[tokio::test]
    async fn test_transform_keeps_positive_entries() {
        let body = Body {
            collection: vec![Number::from(-3), Number::from(0), Number::from(4)],
            skipped: 1,
            flag: true,
        };
        let out = TransformBody
            .run(Stage::Validated(body), &mut Bus::new().with(config()))
            .await
            .unwrap();

        let Outcome::Next(Stage::Transformed(body, meta)) = out else {
            panic!("expected transformed stage");
        };
        assert_eq!(body.collection, vec![Number::from(8)]);
        assert_eq!(meta.prev_length, 4);
    }

    #[tokio::test]
    async fn test_wrong_stage_is_step_failure() {
        let save = SaveBody::new(Duration::ZERO);
        let err = Step::run(&save, Stage::Saved(200), &mut Bus::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("transformed body"));
    }

    #[test]
    fn test_schematic_lists_steps_in_order() {
        let pipeline = endpoint_pipeline(&config());
        assert_eq!(
            pipeline.schematic().labels(),
            vec!["parse", "validate", "transform", "save", "LogNode"]
        );
    }
}
