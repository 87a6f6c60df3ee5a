// tests/runner_interrupt.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::fs;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::{sleep, Duration, Instant};

use hadoop_provider::errors::ProviderError;
use hadoop_provider::exec::ExternalJobRunner;
use hadoop_provider_test_utils::builders::JobSpecBuilder;
use hadoop_provider_test_utils::fake_hadoop::FakeHadoop;
use hadoop_provider_test_utils::recording::{ObservedEvent, RecordingObserver};

type TestResult = Result<(), Box<dyn Error>>;

/// Check a capture file holds only whole lines drawn from `allowed`.
fn assert_whole_lines(content: &str, allowed: &[&str]) {
    assert!(
        content.is_empty() || content.ends_with('\n'),
        "capture ends mid-line: {content:?}"
    );
    for line in content.lines() {
        assert!(allowed.contains(&line), "unexpected line {line:?}");
    }
}

/// Interrupting a running job kills it, joins the drains and surfaces
/// InterruptedError. Both capture files exist and end on a line boundary.
#[tokio::test]
async fn interrupt_while_running_is_an_error() -> TestResult {
    init_tracing();

    let fake = FakeHadoop::new("echo first\necho second\necho oops >&2\nexec sleep 30\n")?;
    let observer = Arc::new(RecordingObserver::new());
    let runner = ExternalJobRunner::new(fake.template(), observer.clone());
    let spec = JobSpecBuilder::new(fake.dir()).build();

    let err = with_timeout(runner.run_until(&spec, sleep(Duration::from_millis(500))))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InterruptedError { .. }));
    assert!(
        observer
            .events()
            .iter()
            .any(|e| matches!(e, ObservedEvent::Interrupted(_)))
    );
    assert!(observer.warnings().is_empty());

    assert_whole_lines(&fs::read_to_string(spec.stdout_path())?, &["first", "second"]);
    assert_whole_lines(&fs::read_to_string(spec.stderr_path())?, &["oops"]);
    Ok(())
}

/// A job whose own child keeps the pipes open after the kill still returns
/// promptly: the drains are stopped once the grace period runs out, keeping
/// the lines read so far.
#[tokio::test]
async fn interrupt_returns_while_forked_process_holds_pipes() -> TestResult {
    init_tracing();

    // No `exec`: `sleep` is a separate process that survives the kill.
    let fake = FakeHadoop::new("echo first\nsleep 6\n")?;
    let observer = Arc::new(RecordingObserver::new());
    let runner = ExternalJobRunner::new(fake.template(), observer.clone());
    let spec = JobSpecBuilder::new(fake.dir()).build();

    let started = Instant::now();
    let err = with_timeout(runner.run_until(&spec, sleep(Duration::from_millis(300))))
        .await
        .unwrap_err();
    let took = started.elapsed();

    assert!(matches!(err, ProviderError::InterruptedError { .. }));
    assert!(took < Duration::from_secs(3), "interrupt took {took:?}");
    assert_whole_lines(&fs::read_to_string(spec.stdout_path())?, &["first"]);
    assert!(
        observer
            .events()
            .iter()
            .any(|e| matches!(e, ObservedEvent::DrainFailed(..)))
    );
    Ok(())
}

/// An interrupt signal delivered from another task works the same way.
#[tokio::test]
async fn interrupt_from_channel() -> TestResult {
    init_tracing();

    let fake = FakeHadoop::new("echo started\nexec sleep 30\n")?;
    let runner = ExternalJobRunner::new(fake.template(), Arc::new(RecordingObserver::new()));
    let spec = JobSpecBuilder::new(fake.dir()).build();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        sleep(Duration::from_millis(300)).await;
        let _ = tx.send(());
    });

    let err = with_timeout(runner.run_until(&spec, async {
        let _ = rx.await;
    }))
    .await
    .unwrap_err();

    assert!(matches!(err, ProviderError::InterruptedError { .. }));
    assert!(spec.stdout_path().exists());
    assert!(spec.stderr_path().exists());
    Ok(())
}

/// An interrupt that only fires after the process exited changes nothing.
#[tokio::test]
async fn late_interrupt_is_ignored() -> TestResult {
    init_tracing();

    let fake = FakeHadoop::echo_args()?;
    let runner = ExternalJobRunner::new(fake.template(), Arc::new(RecordingObserver::new()));
    let spec = JobSpecBuilder::new(fake.dir()).build();

    let result = with_timeout(runner.run_until(&spec, sleep(Duration::from_secs(5)))).await?;

    assert!(result.success());
    Ok(())
}
