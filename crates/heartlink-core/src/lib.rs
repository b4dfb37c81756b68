#![warn(missing_docs)]
//! # heartlink-core
//!
//! ## Purpose
//! Defines the card payload model and the URL-fragment token codec used across
//! the `heartlink` workspace.
//!
//! ## Responsibilities
//! - Represent the `{image URL, sender name}` payload carried by a share link.
//! - Encode payloads into URL-safe, padding-free tokens.
//! - Decode tokens back into payloads, including the legacy bare-URL format.
//! - Provide the canonical HTTP/HTTPS check used by every validation layer.
//!
//! ## Data flow
//! Composer input becomes a [`CardPayload`], [`encode_token`] turns it into a
//! fragment token, and the reveal view restores it with [`decode_token`].
//!
//! ## Ownership and lifetimes
//! Payloads own their strings; tokens are plain `String` values, so no decoded
//! state borrows from transient URL or clipboard buffers.
//!
//! ## Error model
//! [`try_decode_token`] reports the precise failure as [`TokenError`].
//! [`decode_token`] is the consumer-facing entry point and never fails: every
//! malformed token degrades to [`CardPayload::sentinel`].
//!
//! ## Security and privacy notes
//! Tokens travel only in URL fragments and are never sent to a server by this
//! workspace. This crate does not log token or payload contents.
//!
//! ## Example
//! ```rust
//! use heartlink_core::{CardPayload, decode_token, encode_token};
//!
//! let payload = CardPayload::new("https://example.com/a.jpg", "Egor");
//! let token = encode_token(&payload).expect("payload should encode");
//! assert_eq!(decode_token(&token), payload);
//! ```

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Record field carrying the image URL in the current token format.
pub const TOKEN_FIELD_IMAGE_URL: &str = "imageUrl";

/// Record field carrying the sender name in the current token format.
pub const TOKEN_FIELD_SENDER: &str = "from";

/// Logical payload represented by one share token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPayload {
    /// Direct link to the card image. Empty on the invalid sentinel.
    pub image_url: String,
    /// Sender display name. May be empty even on valid payloads.
    pub sender_name: String,
}

impl CardPayload {
    /// Creates a payload from owned or borrowed parts.
    pub fn new(image_url: impl Into<String>, sender_name: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            sender_name: sender_name.into(),
        }
    }

    /// Returns the canonical invalid payload used on every decode failure.
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// Returns `true` when the image URL passes the HTTP/HTTPS check.
    ///
    /// The sender name carries no validity weight; it is only meaningful on
    /// payloads that pass this check.
    pub fn is_valid(&self) -> bool {
        is_http_url(&self.image_url)
    }
}

/// Serialized shape of the current token format.
///
/// Field order matters only for byte-stable output; decoding accepts any
/// order.
#[derive(Serialize)]
struct TokenRecord<'a> {
    #[serde(rename = "imageUrl")]
    image_url: &'a str,
    from: &'a str,
}

/// Returns `true` when `value` is an absolute `http` or `https` URL.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Encodes a payload into a URL-safe share token.
///
/// # Semantics
/// The payload is serialized as a `{"imageUrl": .., "from": ..}` record,
/// UTF-8 encoded, then base64-encoded with the URL-safe alphabet and no `=`
/// padding. Output is deterministic for a given payload.
///
/// # Errors
/// Returns [`TokenError::Codec`] when JSON serialization fails. This layer
/// performs no payload validation; unreachable or malformed image URLs are
/// rejected upstream by the composer flow.
pub fn encode_token(payload: &CardPayload) -> Result<String, TokenError> {
    let record = TokenRecord {
        image_url: &payload.image_url,
        from: &payload.sender_name,
    };
    let json = serde_json::to_string(&record).map_err(TokenError::Codec)?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

/// Decodes a share token into a payload, degrading to the sentinel on any
/// failure.
///
/// This is the reveal-view entry point: it is pure, idempotent, and never
/// fails outward. Use [`try_decode_token`] when the failure reason matters.
pub fn decode_token(token: &str) -> CardPayload {
    try_decode_token(token).unwrap_or_else(|_| CardPayload::sentinel())
}

/// Decodes a share token, reporting the exact failure.
///
/// # Semantics
/// Two interpretations are attempted in a fixed precedence order:
/// 1. Legacy format: the decoded text itself is a bare HTTP/HTTPS URL. The
///    whole text becomes the image URL and the sender name is empty.
/// 2. Current format: the decoded text is a JSON record. `imageUrl` must be a
///    string passing the HTTP/HTTPS check; `from` contributes the trimmed
///    sender name only when string-typed and silently degrades to empty
///    otherwise.
///
/// The legacy check runs first so previously distributed bare-URL tokens keep
/// resolving; a record can never serialize to text that parses as a URL, so
/// the precedence keeps decoding deterministic.
///
/// # Errors
/// Returns [`TokenError::Base64`] / [`TokenError::Utf8`] for transport-level
/// corruption, [`TokenError::Codec`] for unparseable record text,
/// [`TokenError::NotARecord`] for non-object JSON, and
/// [`TokenError::MissingImageUrl`] when the record lacks a usable image URL.
pub fn try_decode_token(token: &str) -> Result<CardPayload, TokenError> {
    let text = decode_token_text(token)?;

    if is_http_url(&text) {
        return Ok(CardPayload {
            image_url: text,
            sender_name: String::new(),
        });
    }

    let value: Value = serde_json::from_str(&text).map_err(TokenError::Codec)?;
    let record = value.as_object().ok_or(TokenError::NotARecord)?;

    let image_url = record
        .get(TOKEN_FIELD_IMAGE_URL)
        .and_then(Value::as_str)
        .unwrap_or_default();
    if !is_http_url(image_url) {
        return Err(TokenError::MissingImageUrl);
    }

    let sender_name = record
        .get(TOKEN_FIELD_SENDER)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    Ok(CardPayload {
        image_url: image_url.to_string(),
        sender_name: sender_name.to_string(),
    })
}

/// Reverses the URL-safe transport encoding back into record text.
///
/// Accepts both the URL-safe and the standard base64 alphabet, with or
/// without `=` padding, matching what historically distributed links contain.
fn decode_token_text(token: &str) -> Result<String, TokenError> {
    let normalized: String = token
        .chars()
        .map(|ch| match ch {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let padding = (4 - normalized.len() % 4) % 4;
    let padded = format!("{normalized}{}", "=".repeat(padding));

    let bytes = STANDARD.decode(padded.as_bytes()).map_err(TokenError::Base64)?;
    String::from_utf8(bytes).map_err(TokenError::Utf8)
}

/// Error type for the fallible token decode path.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token is not valid base64 under either accepted alphabet.
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decoded bytes are not valid UTF-8 text.
    #[error("token bytes are not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// Record text failed JSON encoding or decoding.
    #[error("token record codec failure: {0}")]
    Codec(#[from] serde_json::Error),
    /// Record text decoded to JSON that is not an object.
    #[error("token record is not a json object")]
    NotARecord,
    /// Record carries no string `imageUrl` passing the HTTP/HTTPS check.
    #[error("token record has no usable image url")]
    MissingImageUrl,
}

#[cfg(test)]
mod tests {
    //! Unit tests for the URL check and sentinel semantics.

    use super::*;

    #[test]
    fn accepts_http_and_https_urls_only() {
        assert!(is_http_url("https://example.com/a.jpg"));
        assert!(is_http_url("http://example.com/a.jpg"));
        assert!(is_http_url("HTTPS://example.com/a.jpg"));
        assert!(!is_http_url("ftp://example.com/a.jpg"));
        assert!(!is_http_url("example.com/a.jpg"));
        assert!(!is_http_url(""));
    }

    #[test]
    fn sentinel_is_invalid_and_empty() {
        let sentinel = CardPayload::sentinel();
        assert!(!sentinel.is_valid());
        assert!(sentinel.image_url.is_empty());
        assert!(sentinel.sender_name.is_empty());
    }
}
