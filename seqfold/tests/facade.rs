//! Everything a caller needs is reachable from `seqfold::prelude`.

use seqfold::prelude::*;
use serde_json::{Value, json};

fn double(x: i32) -> i32 {
    x * 2
}

fn negate(x: i32) -> i32 {
    -x
}

#[test]
fn branch2_picks_by_value_or_deferred_check() {
    assert_eq!(branch2(true, double as fn(i32) -> i32, negate)(4), 8);
    assert_eq!(branch2(false, double as fn(i32) -> i32, negate)(4), -4);
    assert_eq!(
        branch2(Condition::deferred(|| true), double as fn(i32) -> i32, negate)(4),
        8
    );
}

#[test]
fn branch_multiple_selects_or_reports_the_miss() {
    let map = BranchMap::<&str, fn(i32) -> i32>::new()
        .branch("x", double)
        .branch("y", negate);

    let chosen = branch_multiple(|| "x", &map).unwrap();
    assert_eq!(chosen(5), 10);

    let miss = branch_multiple(|| "z", &map).unwrap_err();
    assert!(matches!(miss, SelectError::UnknownBranch { .. }));
}

#[test]
fn sync_reduce_halts_on_predicate() {
    let steps: [fn(i32) -> i32; 3] = [|x| x + 1, |x| x * 10, |x| x - 1000];
    let stop = |x: &i32| *x >= 20;

    assert_eq!(reduce(1, &steps, Some(&stop)), 20);
    assert_eq!(reduce(1, &steps, None), -980);
}

#[tokio::test]
async fn async_reduce_with_exit_property() {
    let steps = vec![
        sync_step(|v: Value| json!({ "n": v["n"].as_i64().unwrap_or(0) + 1 })),
        async_step(|_: Value| async { anyhow::Ok(json!({ "errors": ["stop here"] })) }),
        sync_step(|_: Value| json!({ "unreachable": true })),
    ];

    let settled = reduce_async(
        json!({ "n": 0 }),
        &steps,
        &StopCondition::exit_property("errors"),
        &mut Bus::new(),
    )
    .await
    .unwrap();

    assert_eq!(settled, json!({ "errors": ["stop here"] }));
}

#[tokio::test]
async fn std_nodes_compose_into_a_pipeline() {
    let pipeline = Pipeline::<u32, String>::new("Checkout")
        .then(GuardNode::new(|n: &u32| *n > 0, |_: &u32| "empty cart".to_string()))
        .then(OutcomeFn::new(|n: u32| async move {
            anyhow::Ok(Outcome::<u32, String>::Next(n * 2))
        }));

    let ok = pipeline.execute(3, &mut Bus::new()).await.unwrap();
    let refused = pipeline.execute(0, &mut Bus::new()).await.unwrap();

    assert_eq!(ok, Outcome::Next(6));
    assert_eq!(refused, Outcome::Fault("empty cart".to_string()));
}

#[test]
fn std_lib_payload_matches_exit_key() {
    use seqfold::std_lib::payload::{ERRORS_KEY, ErrorPayload};

    let record = ErrorPayload::single(3, "timeout").into_value();
    assert!(StopCondition::exit_property(ERRORS_KEY).should_stop(&record));
}
