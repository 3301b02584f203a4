//! Upload-slot negotiation over the messaging session.

use std::time::Duration;

use chirp_protocol::{Slot, SlotRequest, UploadError, UploadService};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::session::IqSession;

/// Hard ceiling on the slot request round-trip.
pub const SLOT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Requests an upload slot for `request` from the discovered service.
///
/// Fails without touching the network when no service is known or the
/// declared size exceeds the advertised maximum (the advertised limit is
/// taken on trust). A transport failure, a timeout, and an undecodable
/// response are reported as distinct errors. One attempt, no retry.
pub async fn request_slot(
    session: &dyn IqSession,
    service: Option<&UploadService>,
    cancel: &CancellationToken,
    request: &SlotRequest,
) -> Result<Slot, UploadError> {
    let service = match service {
        Some(s) if !s.address.is_empty() => s,
        _ => return Err(UploadError::ServiceUnavailable),
    };

    if request.size > service.max_file_size {
        return Err(UploadError::SizeExceeded {
            size: request.size,
            max: service.max_file_size,
        });
    }

    let payload = request
        .to_xml()
        .map_err(|e| UploadError::Negotiation(e.to_string()))?;
    let id = Uuid::new_v4().to_string();
    debug!(id = %id, to = %service.address, size = request.size, "requesting upload slot");

    let response = tokio::select! {
        _ = cancel.cancelled() => return Err(UploadError::Cancelled),
        outcome = tokio::time::timeout(
            SLOT_REQUEST_TIMEOUT,
            session.send_iq_get(&id, &service.address, payload),
        ) => match outcome {
            Ok(Ok(xml)) => xml,
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(UploadError::Negotiation("slot request timed out".into())),
        },
    };

    Slot::from_xml(&response).map_err(|e| UploadError::MalformedResponse(e.to_string()))
}
