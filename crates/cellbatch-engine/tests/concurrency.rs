//! Engine behavior under many concurrent callers.

use std::time::Duration;

use cellbatch_common::{EvalErrorKind, Value};
use cellbatch_engine::{new_engine, Argument, BatchConfig};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn a_chain_submitted_from_many_tasks_resolves_consistently() {
    let engine = new_engine(BatchConfig {
        debounce_window: Duration::from_millis(200),
        reply_timeout: Duration::from_secs(5),
    });

    let mut handles = Vec::new();
    for i in 0..10i64 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            let args = if i == 0 {
                vec![Argument::literal(Value::Int(1))]
            } else {
                vec![
                    Argument::reference(&format!("C{}", i - 1)),
                    Argument::literal(Value::Int(1)),
                ]
            };
            engine.submit(&format!("C{i}"), "plus", args).await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.await.unwrap().unwrap();
        assert_eq!(value, Value::Int(i as i64 + 1));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_cell_races_produce_one_winner() {
    let engine = new_engine(BatchConfig {
        debounce_window: Duration::from_millis(200),
        reply_timeout: Duration::from_secs(5),
    });

    let mut handles = Vec::new();
    for i in 0..5i64 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine
                .submit(
                    "A1",
                    "plus",
                    vec![Argument::literal(Value::Int(i)), Argument::literal(Value::Int(0))],
                )
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(Value::Int(_)) => winners += 1,
            Ok(other) => panic!("unexpected value {other:?}"),
            Err(e) => assert_eq!(e.kind, EvalErrorKind::Cancelled),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(engine.pending(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn clones_share_one_open_batch() {
    let engine = new_engine(BatchConfig {
        debounce_window: Duration::from_millis(200),
        reply_timeout: Duration::from_secs(5),
    });

    let writer = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .submit("A1", "plus", vec![Argument::literal(Value::Int(2)), Argument::literal(Value::Int(3))])
                .await
        })
    };
    let reader = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .submit(
                    "B1",
                    "plus",
                    vec![Argument::reference("A1"), Argument::literal(Value::Int(10))],
                )
                .await
        })
    };

    assert_eq!(writer.await.unwrap().unwrap(), Value::Int(5));
    assert_eq!(reader.await.unwrap().unwrap(), Value::Int(15));
}
