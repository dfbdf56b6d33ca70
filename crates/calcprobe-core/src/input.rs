//! Input sources fed to the calculator's stdin
//!
//! An [`InputSource`] is either a complete literal expression or a lazily
//! produced byte stream. Streams are never materialized in memory, which is
//! what allows inputs like one billion `1+` terms to be generated on the fly.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

use crate::error::{EvalError, EvalResult};

/// Target size of chunks produced by [`RepeatChunks`]
const REPEAT_CHUNK_BYTES: usize = 8 * 1024;

/// Expression input for one evaluation
pub enum InputSource {
    /// A complete expression, written followed by a newline
    Literal(String),
    /// A lazily produced byte stream, copied to stdin until exhausted
    Stream(StreamInput),
}

impl InputSource {
    /// Create a literal input
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Create a streamed input from any async reader
    pub fn stream(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self::Stream(StreamInput::new(reader))
    }

    /// Create a streamed input from in-memory text
    ///
    /// Unlike [`InputSource::literal`], no trailing newline is appended.
    pub fn stream_text(text: impl Into<String>) -> Self {
        Self::stream(io::Cursor::new(text.into().into_bytes()))
    }

    /// Create a streamed input from a lazy iterator of text chunks
    ///
    /// The iterator may be unbounded; it is only advanced as the calculator
    /// consumes its stdin.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: Send + Unpin + 'static,
    {
        Self::stream(ChunkReader::new(chunks.into_iter()))
    }

    /// Create a generated input: `prefix`, then `unit` repeated `count` times, then `suffix`
    pub fn repeated(prefix: &str, unit: &str, count: u64, suffix: &str) -> Self {
        let chunks = std::iter::once(prefix.to_string())
            .chain(RepeatChunks::new(unit, Some(count)))
            .chain(std::iter::once(suffix.to_string()));
        Self::from_chunks(chunks)
    }

    /// Create a generated input that repeats `unit` forever
    pub fn unbounded(unit: &str) -> Self {
        Self::from_chunks(RepeatChunks::new(unit, None))
    }

    /// Build an input from optional parts, requiring exactly one of them
    pub fn try_from_parts(literal: Option<String>, stream: Option<StreamInput>) -> EvalResult<Self> {
        match (literal, stream) {
            (Some(text), None) => Ok(Self::Literal(text)),
            (None, Some(stream)) => Ok(Self::Stream(stream)),
            (Some(_), Some(_)) => Err(EvalError::InvalidInput(
                "both a literal expression and a stream were provided".to_string(),
            )),
            (None, None) => Err(EvalError::InvalidInput(
                "neither a literal expression nor a stream was provided".to_string(),
            )),
        }
    }

    /// Whether this input is streamed
    pub fn is_streamed(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Literal(text) => format!("literal ({} bytes)", text.len()),
            Self::Stream(_) => "stream".to_string(),
        }
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Stream(stream) => f.debug_tuple("Stream").field(stream).finish(),
        }
    }
}

impl From<&str> for InputSource {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for InputSource {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

/// Boxed async byte producer for streamed input
pub struct StreamInput {
    reader: Box<dyn AsyncRead + Send + Unpin>,
}

impl StreamInput {
    /// Wrap an async reader
    pub fn new(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Take the underlying reader
    pub fn into_reader(self) -> Box<dyn AsyncRead + Send + Unpin> {
        self.reader
    }
}

impl fmt::Debug for StreamInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamInput").finish_non_exhaustive()
    }
}

/// Async reader over a lazy iterator of text chunks
pub struct ChunkReader<I> {
    chunks: I,
    current: Vec<u8>,
    pos: usize,
}

impl<I> ChunkReader<I>
where
    I: Iterator<Item = String>,
{
    /// Create a reader that pulls chunks on demand
    pub fn new(chunks: I) -> Self {
        Self {
            chunks,
            current: Vec::new(),
            pos: 0,
        }
    }
}

impl<I> AsyncRead for ChunkReader<I>
where
    I: Iterator<Item = String> + Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        while buf.remaining() > 0 {
            if this.pos >= this.current.len() {
                match this.chunks.next() {
                    Some(chunk) => {
                        this.current = chunk.into_bytes();
                        this.pos = 0;
                        continue;
                    }
                    None => break,
                }
            }

            let n = buf.remaining().min(this.current.len() - this.pos);
            buf.put_slice(&this.current[this.pos..this.pos + n]);
            this.pos += n;
        }

        Poll::Ready(Ok(()))
    }
}

/// Iterator yielding a unit string repeated, batched into roughly 8 KiB chunks
pub struct RepeatChunks {
    unit: String,
    per_chunk: u64,
    remaining: Option<u64>,
}

impl RepeatChunks {
    /// Repeat `unit` `count` times, or forever when `count` is `None`
    pub fn new(unit: &str, count: Option<u64>) -> Self {
        let per_chunk = (REPEAT_CHUNK_BYTES / unit.len().max(1)).max(1) as u64;
        Self {
            unit: unit.to_string(),
            per_chunk,
            remaining: if unit.is_empty() { Some(0) } else { count },
        }
    }
}

impl Iterator for RepeatChunks {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let take = match self.remaining.as_mut() {
            Some(0) => return None,
            Some(remaining) => {
                let take = (*remaining).min(self.per_chunk);
                *remaining -= take;
                take
            }
            None => self.per_chunk,
        };
        Some(self.unit.repeat(take as usize))
    }
}
