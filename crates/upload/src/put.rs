//! HTTP PUT transfer executor.

use chirp_protocol::{Slot, UploadError};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, HeaderName, HeaderValue};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Streams `body` to the slot's PUT URL.
///
/// The declared content length is set explicitly to `size` and every slot
/// header is applied verbatim, in response order (they typically carry
/// pre-signed-URL authentication). The exchange is raced against `cancel`;
/// cancelling aborts the in-flight request. The response body is discarded
/// on every path. Success means status 200 or 201.
pub async fn execute_put<R>(
    http: &reqwest::Client,
    slot: &Slot,
    body: R,
    size: u64,
    cancel: &CancellationToken,
) -> Result<(), UploadError>
where
    R: AsyncRead + Send + 'static,
{
    let mut request = http.put(&slot.put.url).header(CONTENT_LENGTH, size);

    for header in &slot.put.headers {
        let name = HeaderName::try_from(header.name.as_str()).map_err(|_| {
            UploadError::Transfer(format!("invalid slot header name: {}", header.name))
        })?;
        let value = HeaderValue::try_from(header.value.as_str()).map_err(|_| {
            UploadError::Transfer(format!("invalid slot header value for {}", header.name))
        })?;
        request = request.header(name, value);
    }

    let request = request.body(reqwest::Body::wrap_stream(ReaderStream::new(body)));
    debug!(url = %slot.put.url, size, "starting upload transfer");

    let response = tokio::select! {
        _ = cancel.cancelled() => return Err(UploadError::Cancelled),
        outcome = request.send() => {
            outcome.map_err(|e| UploadError::Transfer(e.to_string()))?
        }
    };

    let status = response.status();
    drop(response);

    if status != StatusCode::OK && status != StatusCode::CREATED {
        return Err(UploadError::Status(status.as_u16()));
    }
    Ok(())
}
