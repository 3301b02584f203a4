use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// Callback invoked with the cumulative byte count after each read.
pub type ReadCallback = Box<dyn FnMut(u64) + Send>;

/// Wraps a byte source and reports cumulative consumption on every read.
///
/// Purely an observation layer: data, EOF, and error signaling from the
/// wrapped source pass through unchanged. Not designed for concurrent
/// reads; one transfer task owns the reader.
pub struct CountingReader<R> {
    inner: R,
    bytes_read: u64,
    on_read: ReadCallback,
}

impl<R> CountingReader<R> {
    /// Wraps `inner`, invoking `on_read` with the running total after
    /// every successful read (including the zero-byte read at EOF).
    pub fn new(inner: R, on_read: ReadCallback) -> Self {
        Self {
            inner,
            bytes_read: 0,
            on_read,
        }
    }

    /// Cumulative bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CountingReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                this.bytes_read += (buf.filled().len() - before) as u64;
                (this.on_read)(this.bytes_read);
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}
