//! Line transports between the engine and an agent.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio::time::timeout;

use crate::protocol::{Phase, ProtocolError};

pub mod in_memory;
pub mod process;

pub use in_memory::InMemoryTransport;
pub use process::ProcessTransport;

/// A bidirectional channel carrying one message per line.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Write `line` followed by a newline and flush it.
    async fn send_line(&mut self, line: &str, phase: Phase) -> Result<(), ProtocolError>;

    /// Read the next line, without its line terminator.
    async fn recv_line(&mut self, phase: Phase) -> Result<String, ProtocolError>;

    /// Release the channel. Later calls fail with [`ProtocolError::Closed`].
    async fn close(&mut self) {}
}

/// Run `op`, failing with [`ProtocolError::Timeout`] if `limit` elapses first.
pub(crate) async fn with_deadline<T, F>(
    limit: Option<Duration>,
    phase: Phase,
    op: F,
) -> Result<T, ProtocolError>
where
    F: Future<Output = Result<T, ProtocolError>>,
{
    match limit {
        Some(after) => timeout(after, op)
            .await
            .map_err(|_| ProtocolError::Timeout { phase, after })?,
        None => op.await,
    }
}

/// Read one newline-terminated line of at most `max` bytes.
///
/// A final line without a newline is accepted. End of stream before any
/// byte is [`ProtocolError::Closed`].
pub(crate) async fn read_line_limited<R>(
    reader: &mut R,
    max: usize,
    phase: Phase,
) -> Result<String, ProtocolError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = reader
        .take(max as u64 + 1)
        .read_line(&mut line)
        .await
        .map_err(|source| ProtocolError::Io { phase, source })?;
    if read == 0 {
        return Err(ProtocolError::Closed { phase });
    }
    if !line.ends_with('\n') && read > max {
        return Err(ProtocolError::LineTooLong { phase, max });
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}
