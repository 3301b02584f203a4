//! Upload orchestration: the public entry points.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chirp_protocol::{SlotRequest, UploadError, UploadProgress, UploadService};
use chirp_transfer::{CountingReader, ProgressReporter};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::negotiate;
use crate::put;
use crate::session::IqSession;

/// Client for XEP-0363 HTTP File Upload.
///
/// One instance serves any number of concurrent uploads; the underlying
/// HTTP connection pool is shared and safe for concurrent use. Each upload
/// is a single sequential pipeline: negotiate a slot, then stream the PUT.
///
/// Errors never come back as return values. Each invocation emits exactly
/// one terminal snapshot into the progress sink (when one is supplied) and
/// closes the sink exactly once, as its very last action; intermediate
/// snapshots are best-effort. The entry points are intended to be spawned:
///
/// ```ignore
/// let (tx, mut rx) = ProgressReporter::channel();
/// tokio::spawn(async move { client.upload_file(cancel, path, Some(tx)).await });
/// while let Some(progress) = rx.recv().await {
///     // render progress; the last snapshot before the channel closes is
///     // the terminal one
/// }
/// ```
pub struct UploadClient {
    session: Arc<dyn IqSession>,
    service: Option<UploadService>,
    http: reqwest::Client,
}

impl UploadClient {
    /// Creates a client over an established session and the upload service
    /// discovered for it, if any.
    pub fn new(session: Arc<dyn IqSession>, service: Option<UploadService>) -> Self {
        Self {
            session,
            service,
            http: reqwest::Client::new(),
        }
    }

    /// Replaces the HTTP client, e.g. to share a configured pool.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Records a (re)discovered upload service.
    pub fn set_service(&mut self, service: UploadService) {
        self.service = Some(service);
    }

    /// Uploads an in-memory buffer under `filename`.
    ///
    /// Progress and the final outcome arrive through `progress`; see the
    /// type-level docs for the terminal-snapshot contract. Cancelling
    /// `cancel` aborts whichever phase is in flight.
    pub async fn upload_bytes(
        &self,
        cancel: CancellationToken,
        filename: &str,
        content: Vec<u8>,
        progress: Option<mpsc::Sender<UploadProgress>>,
    ) {
        let reporter = ProgressReporter::new(progress);

        if filename.is_empty() || content.is_empty() {
            reporter
                .finish(
                    0,
                    0,
                    Some(UploadError::InvalidInput(
                        "filename and content cannot be empty".into(),
                    )),
                    "",
                )
                .await;
            return;
        }
        let Some(name) = basename(Path::new(filename)) else {
            reporter
                .finish(
                    0,
                    0,
                    Some(UploadError::InvalidInput(format!(
                        "no usable filename in {filename:?}"
                    ))),
                    "",
                )
                .await;
            return;
        };

        let size = content.len() as u64;
        self.run(cancel, name, size, Cursor::new(content), reporter)
            .await;
    }

    /// Uploads a file from disk, deriving the upload filename from the
    /// path's basename.
    ///
    /// The file is held open only for the duration of the invocation and
    /// released on every exit path. Progress semantics match
    /// [`upload_bytes`](Self::upload_bytes).
    pub async fn upload_file(
        &self,
        cancel: CancellationToken,
        path: impl AsRef<Path>,
        progress: Option<mpsc::Sender<UploadProgress>>,
    ) {
        let path = path.as_ref();
        let reporter = ProgressReporter::new(progress);

        if path.as_os_str().is_empty() {
            reporter
                .finish(
                    0,
                    0,
                    Some(UploadError::InvalidInput("path cannot be empty".into())),
                    "",
                )
                .await;
            return;
        }

        let file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open file for upload");
                reporter
                    .finish(
                        0,
                        0,
                        Some(UploadError::Io(format!("failed to open file: {e}"))),
                        "",
                    )
                    .await;
                return;
            }
        };

        let size = match file.metadata().await {
            Ok(meta) => meta.len(),
            Err(e) => {
                reporter
                    .finish(
                        0,
                        0,
                        Some(UploadError::Io(format!("failed to get file info: {e}"))),
                        "",
                    )
                    .await;
                return;
            }
        };

        let Some(name) = basename(path) else {
            reporter
                .finish(
                    0,
                    0,
                    Some(UploadError::InvalidInput(format!(
                        "no usable filename in {}",
                        path.display()
                    ))),
                    "",
                )
                .await;
            return;
        };

        self.run(cancel, name, size, file, reporter).await;
    }

    /// Shared pipeline behind both entry points.
    async fn run<R>(
        &self,
        cancel: CancellationToken,
        filename: String,
        size: u64,
        source: R,
        reporter: ProgressReporter,
    ) where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let request = SlotRequest::new(&filename, size, None);

        let slot = match negotiate::request_slot(
            self.session.as_ref(),
            self.service.as_ref(),
            &cancel,
            &request,
        )
        .await
        {
            Ok(slot) => slot,
            Err(e) => {
                warn!(filename = %filename, error = %e, "slot negotiation failed");
                reporter.finish(0, size, Some(e), "").await;
                return;
            }
        };

        if slot.is_malformed() {
            warn!(filename = %filename, "upload service returned a malformed slot");
            reporter
                .finish(0, size, Some(UploadError::MalformedSlot), "")
                .await;
            return;
        }

        // The counting reader moves into the request body; the shared
        // counter keeps the last-known byte count reachable for the
        // terminal error snapshot.
        let sent = Arc::new(AtomicU64::new(0));
        let reader = CountingReader::new(source, {
            let sent = Arc::clone(&sent);
            let reporter = reporter.clone();
            Box::new(move |n| {
                sent.store(n, Ordering::Relaxed);
                reporter.report(n, size, None, "");
            })
        });

        match put::execute_put(&self.http, &slot, reader, size, &cancel).await {
            Ok(()) => {
                info!(filename = %filename, size, get_url = %slot.get.url, "upload complete");
                reporter.finish(size, size, None, &slot.get.url).await;
            }
            Err(e) => {
                let sent = sent.load(Ordering::Relaxed);
                warn!(filename = %filename, sent, error = %e, "upload failed");
                reporter.finish(sent, size, Some(e), "").await;
            }
        }
    }
}

/// Final path component as an owned string, if there is one.
fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
