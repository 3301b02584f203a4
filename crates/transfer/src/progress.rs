use chirp_protocol::{UploadError, UploadProgress};
use tokio::sync::mpsc;

/// Reports upload progress into a caller-supplied channel.
///
/// Intermediate updates are best-effort: [`report`](Self::report) makes a
/// single non-blocking attempt into the single-slot channel and drops the
/// snapshot when the receiver has not caught up. The terminal snapshot
/// goes through [`finish`](Self::finish), which awaits delivery so a
/// draining consumer always observes it. Without a sink both are no-ops.
///
/// Consumers should receive until the channel closes; the last snapshot
/// seen is the terminal one.
#[derive(Clone)]
pub struct ProgressReporter {
    tx: Option<mpsc::Sender<UploadProgress>>,
}

impl ProgressReporter {
    /// Creates a reporter over an optional sink.
    pub fn new(tx: Option<mpsc::Sender<UploadProgress>>) -> Self {
        Self { tx }
    }

    /// Creates the single-slot channel callers hand to an upload entry
    /// point.
    pub fn channel() -> (mpsc::Sender<UploadProgress>, mpsc::Receiver<UploadProgress>) {
        mpsc::channel(1)
    }

    /// Whether a sink is attached.
    pub fn has_sink(&self) -> bool {
        self.tx.is_some()
    }

    /// Sends an intermediate snapshot without blocking the transfer task.
    pub fn report(
        &self,
        bytes_sent: u64,
        total_bytes: u64,
        error: Option<UploadError>,
        get_url: &str,
    ) {
        let Some(tx) = &self.tx else { return };
        let _ = tx.try_send(UploadProgress::new(bytes_sent, total_bytes, error, get_url));
    }

    /// Delivers the terminal snapshot, waiting for the consumer to drain
    /// any buffered intermediate update first. A dropped receiver is
    /// ignored.
    pub async fn finish(
        &self,
        bytes_sent: u64,
        total_bytes: u64,
        error: Option<UploadError>,
        get_url: &str,
    ) {
        let Some(tx) = &self.tx else { return };
        let _ = tx
            .send(UploadProgress::new(bytes_sent, total_bytes, error, get_url))
            .await;
    }
}
