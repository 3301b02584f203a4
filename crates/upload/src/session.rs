//! Abstract handle to the connected messaging session.

use std::future::Future;
use std::pin::Pin;

use chirp_protocol::UploadError;

/// Abstract handle to an already-connected, authenticated XMPP session.
///
/// The embedding client implements this on top of its stanza layer. Using
/// a trait keeps slot negotiation decoupled from the transport and
/// testable with mocks.
pub trait IqSession: Send + Sync {
    /// Sends an IQ-get carrying `payload` as its child element to `to`,
    /// correlated by the unique `id`, and resolves with the raw XML of the
    /// matching result payload.
    ///
    /// Implementations report transport failures as
    /// [`UploadError::Negotiation`]. The caller bounds the round-trip with
    /// its own timeout; implementations need not impose one.
    fn send_iq_get(
        &self,
        id: &str,
        to: &str,
        payload: String,
    ) -> Pin<Box<dyn Future<Output = Result<String, UploadError>> + Send + '_>>;
}
