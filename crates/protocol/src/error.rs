//! Caller-facing upload failure taxonomy.

/// Errors surfaced through the terminal progress snapshot.
///
/// Every variant is terminal for a single upload invocation; no layer
/// retries. Variants carry owned data only, so snapshots can clone them
/// through the progress channel.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    /// Empty filename, path, or content.
    #[error("invalid upload input: {0}")]
    InvalidInput(String),

    /// No upload component has been discovered for this session.
    #[error("no upload service found yet, try discovering services")]
    ServiceUnavailable,

    /// The content is larger than the advertised service maximum.
    #[error("upload size too large, want {size}, have {max}")]
    SizeExceeded { size: u64, max: u64 },

    /// Opening or inspecting the local file failed.
    #[error("file error: {0}")]
    Io(String),

    /// Transport failure or timeout while requesting the slot.
    #[error("failed to request upload slot: {0}")]
    Negotiation(String),

    /// The slot response did not decode as a XEP-0363 slot.
    #[error("failed to decode upload slot response: {0}")]
    MalformedResponse(String),

    /// The slot decoded but carries empty URLs.
    #[error("upload slot is malformed")]
    MalformedSlot,

    /// Transport failure during the PUT.
    #[error("failed to upload file: {0}")]
    Transfer(String),

    /// The PUT completed with a status outside {200, 201}.
    #[error("upload failed with status code {0}")]
    Status(u16),

    /// The caller cancelled the upload.
    #[error("upload cancelled")]
    Cancelled,
}
