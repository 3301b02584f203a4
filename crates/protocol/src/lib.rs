//! Wire types for XEP-0363 HTTP File Upload and the shared types of the
//! chirp upload stack.
//!
//! The `upload` module holds the XML stanzas exchanged with the upload
//! component; `types` holds the service descriptor and the progress
//! snapshot streamed back to callers; `error` holds the failure taxonomy
//! carried inside terminal snapshots.

pub mod error;
pub mod types;
pub mod upload;

pub use error::UploadError;
pub use types::{UploadProgress, UploadService};
pub use upload::{Get, NS_HTTP_UPLOAD, Put, Slot, SlotHeader, SlotRequest};
