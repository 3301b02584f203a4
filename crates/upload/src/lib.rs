//! HTTP File Upload (XEP-0363) client flow.
//!
//! This crate implements the **client side** of file uploads over an
//! already-connected messaging session. It is a library crate with no
//! transport dependencies — the embedding client provides an [`IqSession`]
//! implementation that bridges to its actual stanza layer.
//!
//! # Pipeline
//!
//! 1. **Validate** — trivial precondition checks, no network
//! 2. **Negotiate** — request an upload slot from the discovered service
//! 3. **Transfer** — stream the bytes to the slot's PUT URL
//! 4. **Report** — progress snapshots over a non-blocking channel,
//!    terminated by exactly one terminal snapshot
//!
//! Failures never surface as return values; the terminal snapshot (and a
//! `tracing` record) is the only result surface, so an upload spawned as a
//! fire-and-forget task cannot fail invisibly or crash the process.

pub mod client;
pub mod negotiate;
pub mod put;
pub mod session;

#[cfg(test)]
mod support;

// Re-export primary types for convenience.
pub use client::UploadClient;
pub use session::IqSession;
