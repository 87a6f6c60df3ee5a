use std::error::Error;
use std::sync::Mutex;

use hadoop_provider::exec::{JobCommand, RunObserver, RunResult, StreamKind};
use hadoop_provider::job::JobSpec;
use hadoop_provider::provider::Notifier;

/// Everything a [`RecordingObserver`] saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    CommandBuilt(String),
    ProcessStarted(String),
    Line(StreamKind, String),
    DrainFailed(StreamKind, String),
    SinkCloseFailed(StreamKind, String),
    ProcessExited(i32),
    NonZeroExit(i32),
    StartFailed(String, String),
    Interrupted(String),
    KillFailed(String, String),
}

/// A fake observer that records every event instead of logging it.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Captured lines for one stream, in arrival order.
    pub fn lines(&self, stream: StreamKind) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Line(s, line) if s == stream => Some(line),
                _ => None,
            })
            .collect()
    }

    /// Exit codes reported as warnings.
    pub fn warnings(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::NonZeroExit(code) => Some(code),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ObservedEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RunObserver for RecordingObserver {
    fn command_built(&self, command: &JobCommand) {
        self.push(ObservedEvent::CommandBuilt(command.to_string()));
    }

    fn process_started(&self, command: &JobCommand, _pid: Option<u32>) {
        self.push(ObservedEvent::ProcessStarted(command.to_string()));
    }

    fn line(&self, stream: StreamKind, line: &str) {
        self.push(ObservedEvent::Line(stream, line.to_string()));
    }

    fn drain_failed(&self, stream: StreamKind, error: &dyn Error) {
        self.push(ObservedEvent::DrainFailed(stream, error.to_string()));
    }

    fn sink_close_failed(&self, stream: StreamKind, error: &dyn Error) {
        self.push(ObservedEvent::SinkCloseFailed(stream, error.to_string()));
    }

    fn process_exited(&self, exit_code: i32) {
        self.push(ObservedEvent::ProcessExited(exit_code));
    }

    fn nonzero_exit(&self, exit_code: i32) {
        self.push(ObservedEvent::NonZeroExit(exit_code));
    }

    fn start_failed(&self, command: &JobCommand, error: &dyn Error) {
        self.push(ObservedEvent::StartFailed(command.to_string(), error.to_string()));
    }

    fn interrupted(&self, command: &JobCommand) {
        self.push(ObservedEvent::Interrupted(command.to_string()));
    }

    fn kill_failed(&self, command: &JobCommand, error: &dyn Error) {
        self.push(ObservedEvent::KillFailed(command.to_string(), error.to_string()));
    }
}

/// Hook calls seen by a [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Start(String),
    Finish(String, i32),
}

/// A fake notifier that records hook calls.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<NotifierCall>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NotifierCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn start_execution(&self, spec: &JobSpec) {
        self.calls
            .lock()
            .unwrap()
            .push(NotifierCall::Start(spec.entry_point().to_string()));
    }

    fn finish_execution(&self, spec: &JobSpec, result: &RunResult) {
        self.calls.lock().unwrap().push(NotifierCall::Finish(
            spec.entry_point().to_string(),
            result.exit_code,
        ));
    }
}
