//! XEP-0363 wire types.
//!
//! The slot request is a single `<request/>` element in the
//! `urn:xmpp:http:upload:0` namespace carried inside an IQ-get; the
//! response is a `<slot/>` with a `<put/>` child (destination URL plus
//! verbatim headers) and a `<get/>` child (retrieval URL).

use serde::{Deserialize, Serialize};

/// XML namespace for HTTP File Upload.
pub const NS_HTTP_UPLOAD: &str = "urn:xmpp:http:upload:0";

fn default_ns() -> String {
    NS_HTTP_UPLOAD.to_string()
}

/// quick-xml's serde layer does not validate the root element name, so
/// decoding checks it explicitly before handing off to serde.
fn expect_root(xml: &str, name: &str) -> Result<(), quick_xml::DeError> {
    use quick_xml::events::Event;
    use serde::de::Error as _;

    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader
            .read_event()
            .map_err(|e| quick_xml::DeError::custom(e.to_string()))?
        {
            Event::Start(e) | Event::Empty(e) => {
                return if e.name().as_ref() == name.as_bytes() {
                    Ok(())
                } else {
                    Err(quick_xml::DeError::custom(format!(
                        "expected <{name}>, found <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )))
                };
            }
            Event::Eof => return Err(quick_xml::DeError::custom("missing root element")),
            _ => continue,
        }
    }
}

/// Request for an upload slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "request")]
pub struct SlotRequest {
    #[serde(rename = "@xmlns", default = "default_ns")]
    xmlns: String,
    /// Name of the file to be uploaded (basename only).
    #[serde(rename = "@filename")]
    pub filename: String,
    /// Size of the file in bytes.
    #[serde(rename = "@size")]
    pub size: u64,
    /// Optional MIME type of the file.
    #[serde(
        rename = "@content-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,
}

impl SlotRequest {
    /// Creates a slot request in the upload namespace.
    pub fn new(filename: impl Into<String>, size: u64, content_type: Option<String>) -> Self {
        Self {
            xmlns: default_ns(),
            filename: filename.into(),
            size,
            content_type,
        }
    }

    /// Serializes the request element as it goes on the wire.
    pub fn to_xml(&self) -> Result<String, quick_xml::DeError> {
        quick_xml::se::to_string(self)
    }

    /// Parses a request element from the wire.
    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        expect_root(xml, "request")?;
        quick_xml::de::from_str(xml)
    }
}

/// A negotiated upload slot: pre-authorized PUT destination plus the
/// retrieval URL, issued once per transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "slot")]
pub struct Slot {
    #[serde(rename = "@xmlns", default = "default_ns")]
    xmlns: String,
    #[serde(default)]
    pub put: Put,
    #[serde(default)]
    pub get: Get,
}

/// Destination half of a slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Put {
    #[serde(rename = "@url", default)]
    pub url: String,
    /// Headers the server requires on the PUT, in response order.
    #[serde(rename = "header", default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<SlotHeader>,
}

/// A single required PUT header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotHeader {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Retrieval half of a slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Get {
    #[serde(rename = "@url", default)]
    pub url: String,
}

impl Slot {
    /// Creates a slot, mainly for building canned responses in tests.
    pub fn new(
        put_url: impl Into<String>,
        headers: Vec<SlotHeader>,
        get_url: impl Into<String>,
    ) -> Self {
        Self {
            xmlns: default_ns(),
            put: Put {
                url: put_url.into(),
                headers,
            },
            get: Get {
                url: get_url.into(),
            },
        }
    }

    /// Parses a slot element from the wire.
    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        expect_root(xml, "slot")?;
        quick_xml::de::from_str(xml)
    }

    /// Serializes the slot element as it goes on the wire.
    pub fn to_xml(&self) -> Result<String, quick_xml::DeError> {
        quick_xml::se::to_string(self)
    }

    /// A slot with an empty PUT or GET URL was never usable; callers must
    /// reject it before attempting the transfer.
    pub fn is_malformed(&self) -> bool {
        self.put.url.is_empty() || self.get.url.is_empty()
    }
}
