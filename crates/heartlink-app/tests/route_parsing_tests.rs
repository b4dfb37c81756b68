//! Integration tests for fragment route parsing and token extraction.

use heartlink_app::{Route, extract_token, parse_route};

#[test]
fn route_parsing_tests_extracts_token_from_full_link() {
    assert_eq!(
        extract_token("https://cards.example/#/i/abc123"),
        Some("abc123".to_string())
    );
}

#[test]
fn route_parsing_tests_rejects_links_without_reveal_fragment() {
    assert_eq!(extract_token("https://cards.example/"), None);
    assert_eq!(extract_token("https://cards.example/#/"), None);
    assert_eq!(extract_token("https://cards.example/#/i/"), None);
    assert_eq!(extract_token("not a link at all"), None);
}

#[test]
fn route_parsing_tests_unknown_fragments_fall_back_to_composer() {
    assert_eq!(parse_route("/settings"), Route::Compose);
    assert_eq!(
        parse_route("/i/tok-en_123"),
        Route::Reveal {
            token: "tok-en_123".to_string()
        }
    );
}
