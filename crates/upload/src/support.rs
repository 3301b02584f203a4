//! Test doubles shared by the upload tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chirp_protocol::UploadError;

use crate::session::IqSession;

/// What the mock session does with an incoming slot request.
pub enum MockReply {
    /// Resolve with the given result.
    Respond(Result<String, UploadError>),
    /// Never resolve.
    Hang,
}

/// An [`IqSession`] double recording every call it receives.
pub struct MockSession {
    reply: MockReply,
    pub calls: AtomicUsize,
    pub last_to: Mutex<Option<String>>,
    pub last_payload: Mutex<Option<String>>,
}

impl MockSession {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_to: Mutex::new(None),
            last_payload: Mutex::new(None),
        }
    }

    /// A session that answers every request with the given slot payload.
    pub fn respond_ok(xml: impl Into<String>) -> Self {
        Self::new(MockReply::Respond(Ok(xml.into())))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IqSession for MockSession {
    fn send_iq_get(
        &self,
        _id: &str,
        to: &str,
        payload: String,
    ) -> Pin<Box<dyn Future<Output = Result<String, UploadError>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_to.lock().unwrap() = Some(to.to_string());
        *self.last_payload.lock().unwrap() = Some(payload);

        let reply = match &self.reply {
            MockReply::Respond(result) => Some(result.clone()),
            MockReply::Hang => None,
        };
        Box::pin(async move {
            match reply {
                Some(result) => result,
                None => std::future::pending().await,
            }
        })
    }
}
