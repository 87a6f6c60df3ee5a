// tests/provider_lifecycle.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use hadoop_provider::errors::ProviderError;
use hadoop_provider::exec::{CommandTemplate, ExternalJobRunner};
use hadoop_provider::provider::{never_interrupt, HadoopProvider, Provider};
use hadoop_provider_test_utils::builders::JobSpecBuilder;
use hadoop_provider_test_utils::fake_hadoop::FakeHadoop;
use hadoop_provider_test_utils::recording::{NotifierCall, RecordingNotifier, RecordingObserver};

type TestResult = Result<(), Box<dyn Error>>;

fn provider(template: CommandTemplate, notifier: Arc<RecordingNotifier>) -> HadoopProvider {
    let runner = ExternalJobRunner::new(template, Arc::new(RecordingObserver::new()));
    HadoopProvider::new(runner, notifier)
}

/// initialize → execute → dispose, with the notifier hooks around the run
/// and captured stdout handed back.
#[tokio::test]
async fn execute_notifies_and_returns_stdout() -> TestResult {
    init_tracing();

    let fake = FakeHadoop::new("echo 'count=42'\necho 'words=7'\nexit 1\n")?;
    let notifier = Arc::new(RecordingNotifier::new());
    let provider = provider(fake.template(), notifier.clone());
    let spec = JobSpecBuilder::new(fake.dir())
        .entry_point("org.example.WordCount")
        .build();

    provider.initialize()?;
    let outcome = with_timeout(provider.execute(&spec, never_interrupt())).await?;
    provider.dispose()?;

    assert_eq!(outcome.stdout, "count=42\nwords=7\n");
    assert_eq!(outcome.result.exit_code, 1);
    assert_eq!(
        notifier.calls(),
        vec![
            NotifierCall::Start("org.example.WordCount".to_string()),
            NotifierCall::Finish("org.example.WordCount".to_string(), 1),
        ]
    );
    Ok(())
}

/// A launch failure is wrapped as ExecutionFailed and finish is never
/// signalled.
#[tokio::test]
async fn launch_failure_is_wrapped() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let notifier = Arc::new(RecordingNotifier::new());
    let template = CommandTemplate::new(dir.path().join("missing").to_string_lossy());
    let provider = provider(template, notifier.clone());
    let spec = JobSpecBuilder::new(dir.path()).build();

    let err = with_timeout(provider.execute(&spec, never_interrupt()))
        .await
        .unwrap_err();

    match err {
        ProviderError::ExecutionFailed(inner) => {
            assert!(matches!(*inner, ProviderError::ProcessStartError { .. }));
        }
        other => panic!("expected ExecutionFailed, got {other:?}"),
    }
    assert_eq!(
        notifier.calls(),
        vec![NotifierCall::Start("org.example.Main".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn interruption_is_wrapped() -> TestResult {
    init_tracing();

    let fake = FakeHadoop::new("exec sleep 30\n")?;
    let notifier = Arc::new(RecordingNotifier::new());
    let provider = provider(fake.template(), notifier.clone());
    let spec = JobSpecBuilder::new(fake.dir()).build();

    let interrupt = Box::pin(tokio::time::sleep(Duration::from_millis(200)));
    let err = with_timeout(provider.execute(&spec, interrupt))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::ExecutionFailed(ref inner)
            if matches!(**inner, ProviderError::InterruptedError { .. })
    ));
    assert_eq!(notifier.calls().len(), 1);
    Ok(())
}

/// Reading the capture back is its own phase with its own error.
#[tokio::test]
async fn unreadable_capture_is_output_processing_failure() -> TestResult {
    init_tracing();

    // Removes its own stdout capture before exiting.
    let fake = FakeHadoop::new("rm -f job.stdout\n")?;
    let notifier = Arc::new(RecordingNotifier::new());
    let provider = provider(fake.template(), notifier.clone());
    let spec = JobSpecBuilder::new(fake.dir()).build();

    let err = with_timeout(provider.execute(&spec, never_interrupt()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::OutputProcessingFailed(_)));
    assert_eq!(notifier.calls().len(), 2);
    Ok(())
}
