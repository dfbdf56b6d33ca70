//! Concurrent draining of the calculator's output pipes
//!
//! Each pipe gets its own task that reads until end-of-stream with a fixed
//! buffer. The accumulated buffer is owned by that task and handed back
//! through its `JoinHandle`, so no two tasks ever touch the same buffer.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

/// Read buffer size for a single pipe read
pub const DRAIN_BUFFER_BYTES: usize = 8 * 1024;

/// Text captured from one output pipe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainedOutput {
    name: &'static str,
    text: String,
    bytes_read: usize,
    fault: Option<String>,
}

impl DrainedOutput {
    fn faulted(name: &'static str, fault: String) -> Self {
        Self {
            name,
            fault: Some(fault),
            ..Default::default()
        }
    }

    /// Name of the pipe this output came from
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw decoded text, line terminators included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All lines concatenated without their terminators
    pub fn output(&self) -> String {
        self.text.lines().collect()
    }

    /// Individual lines without terminators
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    /// Lines joined with `\n`
    pub fn joined(&self) -> String {
        self.lines().join("\n")
    }

    /// Number of bytes read from the pipe
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Read fault that stopped the drain early, if any
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }
}

/// Background task consuming one output pipe
///
/// Dropping a drainer that was never joined aborts its task.
pub struct StreamDrainer {
    name: &'static str,
    handle: Option<JoinHandle<DrainedOutput>>,
}

impl StreamDrainer {
    /// Start draining `pipe` on a new task
    pub fn start<R>(pipe: R, name: &'static str) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let handle = tokio::spawn(drain(pipe, name));
        Self {
            name,
            handle: Some(handle),
        }
    }

    /// Name of the pipe being drained
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wait for the read loop to reach end-of-stream or a fault
    pub async fn join(mut self) -> DrainedOutput {
        let Some(handle) = self.handle.take() else {
            return DrainedOutput::faulted(self.name, "drainer already joined".to_string());
        };

        match handle.await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(pipe = self.name, error = %e, "Drainer task did not complete");
                DrainedOutput::faulted(self.name, e.to_string())
            }
        }
    }
}

impl Drop for StreamDrainer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn drain<R>(mut pipe: R, name: &'static str) -> DrainedOutput
where
    R: AsyncRead + Unpin,
{
    let mut buffer = [0u8; DRAIN_BUFFER_BYTES];
    let mut captured = Vec::new();
    let mut fault = None;

    loop {
        match pipe.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => captured.extend_from_slice(&buffer[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(pipe = name, error = %e, "Drainer encountered an I/O error");
                fault = Some(e.to_string());
                break;
            }
        }
    }

    tracing::trace!(pipe = name, bytes = captured.len(), "Drainer reached end of stream");

    DrainedOutput {
        name,
        bytes_read: captured.len(),
        text: String::from_utf8_lossy(&captured).into_owned(),
        fault,
    }
}
