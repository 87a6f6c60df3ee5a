// src/exec/drain.rs

//! Copy one child stream into one capture file.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::errors::Result;
use crate::exec::observer::{RunObserver, StreamKind};

/// What a finished drain task reports back to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainSummary {
    pub stream: StreamKind,
    pub lines: usize,
    /// `false` when the copy loop, the final flush or the task itself failed.
    pub completed: bool,
}

impl DrainSummary {
    pub(crate) fn failed(stream: StreamKind) -> Self {
        Self {
            stream,
            lines: 0,
            completed: false,
        }
    }
}

/// Create (or truncate) a capture file, creating parent directories.
pub async fn create_sink(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(File::create(path).await?)
}

/// Spawn a task that owns `source` and `sink` until `source` hits EOF or
/// `true` is sent on `stop`.
pub fn spawn_drain<R>(
    stream: StreamKind,
    source: R,
    sink: File,
    observer: Arc<dyn RunObserver>,
    stop: watch::Receiver<bool>,
) -> JoinHandle<DrainSummary>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move { drain(stream, source, sink, observer.as_ref(), stop).await })
}

/// Copy `source` into `sink` line by line.
///
/// A stop request ends the copy between lines, leaving the stream unread.
/// The sink is flushed and both handles are dropped on every path; errors
/// are reported to the observer and folded into the summary.
pub async fn drain<R>(
    stream: StreamKind,
    source: R,
    sink: File,
    observer: &dyn RunObserver,
    stop: watch::Receiver<bool>,
) -> DrainSummary
where
    R: AsyncRead + Unpin,
{
    let mut writer = BufWriter::new(sink);
    let mut lines = 0;

    let copied = copy_lines(stream, source, &mut writer, observer, stop, &mut lines).await;
    let mut completed = match copied {
        Ok(()) => true,
        Err(e) => {
            observer.drain_failed(stream, &e);
            false
        }
    };

    if let Err(e) = writer.shutdown().await {
        observer.sink_close_failed(stream, &e);
        completed = false;
    }

    DrainSummary {
        stream,
        lines,
        completed,
    }
}

async fn copy_lines<R>(
    stream: StreamKind,
    source: R,
    writer: &mut BufWriter<File>,
    observer: &dyn RunObserver,
    mut stop: watch::Receiver<bool>,
    lines: &mut usize,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(source).split(b'\n');

    loop {
        // A closed stop channel disables the branch; only an explicit
        // `true` ends the copy early.
        let segment = tokio::select! {
            segment = segments.next_segment() => segment?,
            Ok(()) = stop.changed() => {
                let stopped = *stop.borrow_and_update();
                if stopped {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "capture stopped before end of stream",
                    ));
                }
                continue;
            }
        };
        let Some(mut line) = segment else {
            break;
        };

        if line.last() == Some(&b'\r') {
            line.pop();
        }
        observer.line(stream, &String::from_utf8_lossy(&line));

        // Line and terminator go out in one write so a sink never ends
        // mid-line.
        line.push(b'\n');
        writer.write_all(&line).await?;
        *lines += 1;
    }

    Ok(())
}
