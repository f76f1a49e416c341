//! Debounce-window behavior, driven on a paused clock.

use std::time::Duration;

use cellbatch_common::{EvalErrorKind, Value};
use cellbatch_engine::{new_engine, Argument, BatchConfig, Engine};

fn engine(window_ms: u64, reply_ms: u64) -> Engine {
    new_engine(BatchConfig {
        debounce_window: Duration::from_millis(window_ms),
        reply_timeout: Duration::from_millis(reply_ms),
    })
}

fn lit(n: i64) -> Argument {
    Argument::literal(Value::Int(n))
}

#[tokio::test(start_paused = true)]
async fn quiet_window_closes_the_batch() {
    let engine = engine(2_000, 30_000);
    let result = engine.submit("A1", "plus", vec![lit(2), lit(3)]).await;
    assert_eq!(result.unwrap(), Value::Int(5));
    assert_eq!(engine.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn submissions_inside_the_window_share_a_batch() {
    let engine = engine(2_000, 30_000);
    let a = engine.submit("A1", "plus", vec![lit(2), lit(3)]);
    let b = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        engine
            .submit("B1", "plus", vec![Argument::reference("A1"), lit(10)])
            .await
    };
    let (ra, rb) = tokio::join!(a, b);

    // B1's reference resolves against A1's computed value, so both landed
    // in the same batch.
    assert_eq!(ra.unwrap(), Value::Int(5));
    assert_eq!(rb.unwrap(), Value::Int(15));
}

#[tokio::test(start_paused = true)]
async fn each_submission_restarts_the_window() {
    let engine = engine(2_000, 30_000);
    let a = engine.submit("A1", "plus", vec![lit(2), lit(3)]);
    let b = async {
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        engine
            .submit("B1", "plus", vec![Argument::reference("A1"), lit(10)])
            .await
    };
    // Submitted 3s after A1: past A1's original window, inside the window
    // B1 restarted. A reference-only argument proves batch membership.
    let c = async {
        tokio::time::sleep(Duration::from_millis(3_000)).await;
        engine
            .submit("C1", "plus", vec![Argument::reference("B1"), lit(100)])
            .await
    };
    let (ra, rb, rc) = tokio::join!(a, b, c);

    assert_eq!(ra.unwrap(), Value::Int(5));
    assert_eq!(rb.unwrap(), Value::Int(15));
    assert_eq!(rc.unwrap(), Value::Int(115));
}

#[tokio::test(start_paused = true)]
async fn batches_do_not_share_state() {
    let engine = engine(1_000, 30_000);
    let first = engine.submit("A1", "plus", vec![lit(2), lit(3)]).await;
    assert_eq!(first.unwrap(), Value::Int(5));

    // A second batch referencing A1 falls back to the literal; computed
    // values never outlive their pass.
    let second = engine
        .submit(
            "B1",
            "plus",
            vec![Argument::reference_or("A1", Value::Int(100)), lit(10)],
        )
        .await;
    assert_eq!(second.unwrap(), Value::Int(110));
}

#[tokio::test(start_paused = true)]
async fn resubmitting_a_cell_supersedes_the_pending_entry() {
    let engine = engine(2_000, 30_000);
    let first = engine.submit("A1", "plus", vec![lit(1), lit(1)]);
    let second = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        engine.submit("A1", "plus", vec![lit(2), lit(2)]).await
    };
    let (r1, r2) = tokio::join!(first, second);

    let err = r1.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Cancelled);
    assert_eq!(err.cell.as_deref(), Some("A1"));
    assert_eq!(r2.unwrap(), Value::Int(4));
}

#[tokio::test(start_paused = true)]
async fn reply_timeout_caps_the_wait() {
    let engine = engine(5_000, 1_000);
    let result = engine.submit("A1", "plus", vec![lit(2), lit(3)]).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Timeout);
    assert_eq!(err.cell.as_deref(), Some("A1"));

    // The window still elapses later; resolution lands on a closed channel
    // and is discarded without incident.
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(engine.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn flush_resolves_without_waiting_out_the_window() {
    let engine = engine(60_000, 30_000);
    let worker = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.submit("A1", "plus", vec![lit(2), lit(3)]).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(engine.pending(), 1);

    let summary = engine.flush();
    assert_eq!(summary.evaluated, 1);
    assert_eq!(engine.pending(), 0);
    assert_eq!(worker.await.unwrap().unwrap(), Value::Int(5));
}

#[tokio::test(start_paused = true)]
async fn validation_rejects_before_batching() {
    let engine = engine(2_000, 30_000);
    let err = engine.submit("  ", "plus", vec![lit(1)]).await.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Validation);

    let err = engine.submit("A1", "", vec![lit(1)]).await.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Validation);

    assert_eq!(engine.pending(), 0);
}
