//! Serialized worker behavior against a scripted upstream.
//!
//! All tests run on tokio's paused clock, so pacing and backoff delays
//! elapse instantly while keeping their ordering.

mod test_utils;

use cadence_core::{CodeAnalysisTask, PromptBudget, QuestionGenerationTask, QuestionType, Task};
use cadence_error::WorkerErrorKind;
use cadence_worker::{SerializedWorker, exhausted_payload};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{MockGenerator, MockResponse, settings_with_pacing};
use tokio::time::Instant;

fn code_task(code: &str) -> Task {
    CodeAnalysisTask::new(code).into()
}

fn question_task() -> anyhow::Result<Task> {
    Ok(QuestionGenerationTask::builder()
        .cv_text("Five years of Rust and PostgreSQL")
        .experience_level("Senior")
        .question_type(QuestionType::Programming)
        .build()?
        .into())
}

fn worker(mock: &Arc<MockGenerator>, pacing_delay_ms: u64) -> SerializedWorker<MockGenerator> {
    SerializedWorker::with_shared(
        Arc::clone(mock),
        settings_with_pacing(pacing_delay_ms),
        PromptBudget::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn tasks_complete_in_submission_order() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::always(MockResponse::Echo));
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let snippets = ["fn first() {}", "fn second() {}", "fn third() {}"];
    let handles = snippets
        .iter()
        .map(|code| queue.submit(code_task(code)))
        .collect::<Result<Vec<_>, _>>()?;

    for (handle, code) in handles.into_iter().zip(snippets) {
        let text = handle.wait().await?;
        assert!(text.ends_with(code), "got {:?}", text);
    }

    let calls = mock.calls();
    assert_eq!(calls.len(), 3);
    for (call, code) in calls.iter().zip(snippets) {
        assert!(call.prompt.ends_with(code));
    }
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn pacing_separates_consecutive_tasks() -> anyhow::Result<()> {
    let mock = Arc::new(
        MockGenerator::scripted(
            vec![MockResponse::RateLimited("Please retry in 1s.".into())],
            MockResponse::Text("questions".into()),
        )
        .with_latency(Duration::from_millis(500)),
    );
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let first = queue.submit(question_task()?)?;
    let second = queue.submit(question_task()?)?;

    assert_eq!(first.wait().await?, "questions");
    let first_completed = Instant::now();
    assert_eq!(second.wait().await?, "questions");

    // First task: one rate-limited call, then a success after a 2s backoff.
    let calls = mock.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[1].started.duration_since(calls[0].finished) >= Duration::from_millis(2_000));
    assert!(first_completed >= calls[1].finished);

    // Second task starts no earlier than the pacing delay after the first finished.
    assert!(calls[2].started.duration_since(calls[1].finished) >= Duration::from_millis(10_000));
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn pacing_follows_failed_tasks() -> anyhow::Result<()> {
    let mut script = vec![MockResponse::Fatal("connection reset".into())];
    script.extend((0..5).map(|_| MockResponse::RateLimited("Please retry in 1s.".into())));
    let mock = Arc::new(MockGenerator::scripted(script, MockResponse::Echo));
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let fatal = queue.submit(question_task()?)?;
    let exhausted = queue.submit(question_task()?)?;
    let succeeded = queue.submit(code_task("fn ok() {}"))?;

    assert!(fatal.wait().await?.starts_with("Error generating questions: "));
    assert_eq!(
        exhausted.wait().await?,
        exhausted_payload(cadence_core::TaskKind::QuestionGeneration)
    );
    assert!(succeeded.wait().await?.ends_with("fn ok() {}"));

    let calls = mock.calls();
    assert_eq!(calls.len(), 7);
    let pacing = Duration::from_millis(10_000);
    // Fatal task's only call, then the first attempt of the exhausted task.
    assert!(calls[1].started.duration_since(calls[0].finished) >= pacing);
    // Last attempt of the exhausted task, then the successful task.
    assert!(calls[6].started.duration_since(calls[5].finished) >= pacing);
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn identical_tasks_are_executed_independently() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::scripted(
        vec![
            MockResponse::Text("first answer".into()),
            MockResponse::Text("second answer".into()),
        ],
        MockResponse::Echo,
    ));
    let mut worker = worker(&mock, 1_000);
    let queue = worker.start()?;

    let a = queue.submit(code_task("let x = 1;"))?;
    let b = queue.submit(code_task("let x = 1;"))?;

    assert_eq!(a.wait().await?, "first answer");
    assert_eq!(b.wait().await?, "second answer");
    assert_eq!(mock.call_count(), 2);
    assert_eq!(worker.metrics().upstream_calls(), 2);
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_complete_with_payload() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::always(MockResponse::RateLimited(
        "Quota exceeded. Please retry in 2s.".into(),
    )));
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let text = queue.submit(question_task()?)?.wait().await?;

    assert_eq!(text, exhausted_payload(cadence_core::TaskKind::QuestionGeneration));
    assert_eq!(mock.call_count(), 5);

    let snapshot = worker.metrics().snapshot();
    assert_eq!(snapshot.rate_limit_retries, 4);
    assert_eq!(snapshot.retries_exhausted, 1);
    assert_eq!(snapshot.completed, 1);
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn fatal_failure_completes_without_sleeping() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::always(MockResponse::Fatal(
        "connection refused".into(),
    )));
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let submitted = Instant::now();
    let text = queue.submit(question_task()?)?.wait().await?;

    assert!(text.starts_with("Error generating questions: "));
    assert!(text.contains("connection refused"));
    assert!(Instant::now().duration_since(submitted) < Duration::from_secs(1));
    assert_eq!(mock.call_count(), 1);
    assert_eq!(worker.metrics().fatal_failures(), 1);
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn caller_timeout_does_not_cancel_task() -> anyhow::Result<()> {
    let mock = Arc::new(
        MockGenerator::always(MockResponse::Text("late".into()))
            .with_latency(Duration::from_secs(90)),
    );
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let err = queue
        .submit(code_task("loop {}"))?
        .wait_timeout(Duration::from_secs(60))
        .await
        .unwrap_err();
    assert_eq!(err.kind, WorkerErrorKind::TimedOut(60_000));

    tokio::time::sleep(Duration::from_secs(40)).await;
    assert_eq!(mock.call_count(), 1);
    let snapshot = worker.metrics().snapshot();
    assert_eq!(snapshot.completed, 1);
    assert_eq!(snapshot.unobserved, 1);
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn internal_fault_is_exceptional_completion() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::scripted(
        vec![MockResponse::Panic("generator exploded".into())],
        MockResponse::Text("recovered".into()),
    ));
    let mut worker = worker(&mock, 1_000);
    let queue = worker.start()?;

    let faulted = queue.submit(code_task("a"))?;
    let next = queue.submit(code_task("b"))?;

    let err = faulted.wait().await.unwrap_err();
    assert_eq!(
        err.kind,
        WorkerErrorKind::Internal("generator exploded".into())
    );
    assert_eq!(next.wait().await?, "recovered");
    worker.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn stop_abandons_queued_and_in_flight_tasks() -> anyhow::Result<()> {
    let mock = Arc::new(
        MockGenerator::always(MockResponse::Text("never".into()))
            .with_latency(Duration::from_secs(100)),
    );
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let in_flight = queue.submit(code_task("a"))?;
    let queued = queue.submit(code_task("b"))?;
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(queue.depth(), 1);

    worker.stop().await?;

    assert_eq!(in_flight.wait().await.unwrap_err().kind, WorkerErrorKind::HandleDropped);
    assert_eq!(queued.wait().await.unwrap_err().kind, WorkerErrorKind::HandleDropped);
    assert_eq!(queue.depth(), 0);
    assert!(queue.is_closed());

    let err = queue.submit(code_task("c")).unwrap_err();
    assert_eq!(err.kind, WorkerErrorKind::QueueClosed);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn stop_interrupts_backoff_sleep() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::scripted(
        vec![MockResponse::RateLimited("Quota exceeded. Please retry in 100s.".into())],
        MockResponse::Text("too late".into()),
    ));
    let mut worker = worker(&mock, 10_000);
    let queue = worker.start()?;

    let handle = queue.submit(question_task()?)?;
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(mock.call_count(), 1);

    worker.stop().await?;
    assert_eq!(handle.wait().await.unwrap_err().kind, WorkerErrorKind::HandleDropped);

    tokio::time::sleep(Duration::from_secs(200)).await;
    assert_eq!(mock.call_count(), 1);
    assert_eq!(worker.metrics().completed(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn lifecycle_rejects_double_start_and_stray_stop() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::always(MockResponse::Echo));
    let mut worker = worker(&mock, 1_000);

    assert_eq!(worker.stop().await.unwrap_err().kind, WorkerErrorKind::NotRunning);

    worker.start()?;
    assert!(worker.is_running());
    assert_eq!(worker.start().unwrap_err().kind, WorkerErrorKind::AlreadyRunning);

    worker.stop().await?;
    assert!(!worker.is_running());
    assert!(worker.queue().is_none());

    // A stopped worker can be started again with a fresh queue.
    let queue = worker.start()?;
    assert!(queue.submit(code_task("x"))?.wait().await?.ends_with("x"));
    worker.stop().await?;
    Ok(())
}
