//! Shared upload types: the discovered service descriptor and the
//! progress snapshot streamed back to callers.

use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// Descriptor of a discovered HTTP upload component.
///
/// Produced by service discovery (an external collaborator) and consumed
/// read-only by the upload client. Absence means "not yet discovered".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadService {
    /// JID of the upload component.
    pub address: String,
    /// Largest upload the component accepts, in bytes.
    pub max_file_size: u64,
}

/// Snapshot of a running upload.
///
/// One upload invocation produces a stream of snapshots terminated by
/// exactly one terminal snapshot: either an error (`error` set, `get_url`
/// empty) or a success (`error` absent, `get_url` set,
/// `bytes_sent == total_bytes`).
#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub total_bytes: u64,
    /// Completion percentage; 0 when `total_bytes` is 0.
    pub percentage: f64,
    /// Download URL, set only on the terminal success snapshot.
    pub get_url: String,
    /// Set only on the terminal snapshot of a failed upload.
    pub error: Option<UploadError>,
}

impl UploadProgress {
    /// Builds a snapshot, computing the percentage.
    pub fn new(
        bytes_sent: u64,
        total_bytes: u64,
        error: Option<UploadError>,
        get_url: impl Into<String>,
    ) -> Self {
        let percentage = if total_bytes == 0 {
            0.0
        } else {
            bytes_sent as f64 / total_bytes as f64 * 100.0
        };
        Self {
            bytes_sent,
            total_bytes,
            percentage,
            get_url: get_url.into(),
            error,
        }
    }

    /// Whether this is the terminal snapshot of the invocation.
    pub fn is_terminal(&self) -> bool {
        self.error.is_some() || !self.get_url.is_empty()
    }
}
