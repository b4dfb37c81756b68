//! Integration tests for the end-to-end share link scenario.

use heartlink_app::{extract_token, share_link};
use heartlink_core::{CardPayload, decode_token, encode_token};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

#[test]
fn share_link_tests_round_trips_payload_through_link() {
    let payload = CardPayload::new("https://example.com/a.jpg", "Egor");
    let token = encode_token(&payload).expect("encoding should succeed");
    let link = share_link("https://cards.example", "/", &token);

    let extracted = extract_token(&link).expect("link should carry the token");
    assert_eq!(decode_token(&extracted), payload);
}

#[test]
fn share_link_tests_resolves_legacy_bare_url_links() {
    let legacy_token = URL_SAFE_NO_PAD.encode("https://example.com/b.jpg".as_bytes());
    let link = share_link("https://cards.example", "/", &legacy_token);

    let extracted = extract_token(&link).expect("link should carry the token");
    assert_eq!(
        decode_token(&extracted),
        CardPayload::new("https://example.com/b.jpg", "")
    );
}
