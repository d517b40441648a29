//! Newline-delimited framing over an arbitrary reader/writer pair.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Split};
use tracing::trace;

/// One JSON-RPC message per line in, one per line out.
///
/// Generic over the streams so tests can drive it from memory.
pub struct LineTransport<R, W> {
    segments: Split<BufReader<R>>,
    writer: W,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            segments: BufReader::new(reader).split(b'\n'),
            writer,
        }
    }

    /// Reads the next line, trimmed. Returns `None` once the input is closed.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a bad line fails
    /// JSON parsing on its own instead of ending the stream.
    /// Cancellation safe: no partial line is lost if the future is dropped.
    pub async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let segment = self.segments.next_segment().await?;
        Ok(segment.map(|bytes| {
            let trimmed = String::from_utf8_lossy(&bytes).trim().to_string();
            trace!(len = trimmed.len(), "read message");
            trimmed
        }))
    }

    pub async fn write_line(&mut self, message: &str) -> std::io::Result<()> {
        trace!(len = message.len(), "writing message");
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}
