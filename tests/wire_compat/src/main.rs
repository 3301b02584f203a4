fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chirp_protocol::{Slot, SlotRequest};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture stanza. Fixtures are the canonical XEP-0363
    /// example stanzas, kept byte-for-byte as published.
    fn load_fixture(name: &str) -> String {
        let path = fixtures_dir().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    #[test]
    fn fixture_slot_request() {
        let xml = load_fixture("slot_request.xml");
        let parsed = SlotRequest::from_xml(&xml).unwrap();
        assert_eq!(parsed.filename, "très cool.jpg");
        assert_eq!(parsed.size, 23456);
        assert_eq!(parsed.content_type.as_deref(), Some("image/jpeg"));

        // A request built through the constructor matches the wire form.
        let built = SlotRequest::new("très cool.jpg", 23456, Some("image/jpeg".into()));
        assert_eq!(built, parsed);

        let reencoded = parsed.to_xml().unwrap();
        let reparsed = SlotRequest::from_xml(&reencoded).unwrap();
        assert_eq!(
            parsed, reparsed,
            "roundtrip mismatch:\n  fixture:    {xml}\n  re-encoded: {reencoded}"
        );
    }

    #[test]
    fn fixture_slot_response() {
        let xml = load_fixture("slot_response.xml");
        let slot = Slot::from_xml(&xml).unwrap();

        assert_eq!(
            slot.put.url,
            "https://upload.montague.tld/4a771ac1-f0b2-4a4a-9700-f2a26fa2bb67/tr%C3%A8s%20cool.jpg"
        );
        assert_eq!(
            slot.get.url,
            "https://download.montague.tld/4a771ac1-f0b2-4a4a-9700-f2a26fa2bb67/tr%C3%A8s%20cool.jpg"
        );
        // Header order is part of the contract; the values carry
        // pre-signed authentication verbatim.
        assert_eq!(slot.put.headers.len(), 2);
        assert_eq!(slot.put.headers[0].name, "Authorization");
        assert_eq!(slot.put.headers[0].value, "Basic Base64String==");
        assert_eq!(slot.put.headers[1].name, "Cookie");
        assert_eq!(slot.put.headers[1].value, "foo=bar; user=romeo");
        assert!(!slot.is_malformed());

        let reencoded = slot.to_xml().unwrap();
        let reparsed = Slot::from_xml(&reencoded).unwrap();
        assert_eq!(
            slot, reparsed,
            "roundtrip mismatch:\n  fixture:    {xml}\n  re-encoded: {reencoded}"
        );
    }

    #[test]
    fn fixture_slot_response_without_headers() {
        let xml = load_fixture("slot_response_no_headers.xml");
        let slot = Slot::from_xml(&xml).unwrap();
        assert!(slot.put.headers.is_empty());
        assert_eq!(slot.put.url, "https://upload.montague.tld/abc/report.pdf");
        assert!(!slot.is_malformed());
    }

    #[test]
    fn fixture_empty_slot_is_malformed() {
        let xml = load_fixture("slot_response_empty.xml");
        let slot = Slot::from_xml(&xml).unwrap();
        assert!(slot.is_malformed());
    }
}
