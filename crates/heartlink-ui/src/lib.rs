#![warn(missing_docs)]
//! # heartlink-ui
//!
//! ## Purpose
//! Defines the view-facing state models for the composer (link producer) and
//! reveal (link consumer) views.
//!
//! ## Responsibilities
//! - Track form input, field-level errors, and the generated share link.
//! - Project probe statuses into display-safe check states and messages.
//! - Gate link generation and card acceptance.
//!
//! ## Data flow
//! Shell events (typing, probe updates, copy results, accept presses) mutate
//! [`ComposerState`] / [`RevealState`], which drive the rendered view.
//!
//! ## Ownership and lifetimes
//! Both states own their strings and payloads, keeping event reducers free of
//! borrowed view data.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors: invalid
//! combinations are prevented by guard methods, and every failure is a
//! renderable field error rather than a fault.
//!
//! ## Security and privacy notes
//! View state holds only what the page already shows; tokens appear solely
//! inside the generated link value.

use heartlink_core::{CardPayload, is_http_url};
use heartlink_probe::ProbeStatus;

/// How long the copied-confirmation stays visible, in milliseconds.
pub const COPY_FEEDBACK_MS: u64 = 1_600;

/// Field-level validation errors shown on the composer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerFieldError {
    /// Image URL field is empty.
    EmptyImageUrl,
    /// Image URL field does not look like an HTTP/HTTPS URL.
    InvalidImageUrl,
    /// Reachability check is still running.
    StillChecking,
    /// Image failed to load during the precheck.
    ImageUnreachable,
    /// Image precheck hit its timeout.
    ImageTimedOut,
    /// Sender name field is empty.
    EmptySenderName,
}

impl ComposerFieldError {
    /// Returns the user-facing message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyImageUrl => "Paste a link to the image.",
            Self::InvalidImageUrl => "This does not look like a valid URL.",
            Self::StillChecking => "Still checking the link, give it a couple of seconds.",
            Self::ImageUnreachable => {
                "The image could not be loaded from this link. Try another one."
            }
            Self::ImageTimedOut => "The image did not respond in 10 seconds. Try another link.",
            Self::EmptySenderName => "Fill in the sender name.",
        }
    }
}

/// Composer (producer) view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerState {
    /// Raw image URL input.
    pub image_url_input: String,
    /// Raw sender name input.
    pub sender_input: String,
    /// Error attached to the image URL field.
    pub image_url_error: Option<ComposerFieldError>,
    /// Error attached to the sender name field.
    pub sender_error: Option<ComposerFieldError>,
    /// Latest reachability check projection.
    pub check: ProbeStatus,
    /// Generated share link, once the form passed every gate.
    pub generated_link: Option<String>,
    /// Whether the copied-confirmation is currently shown.
    pub copied: bool,
}

impl ComposerState {
    /// Creates an empty composer form.
    pub fn new() -> Self {
        Self {
            image_url_input: String::new(),
            sender_input: String::new(),
            image_url_error: None,
            sender_error: None,
            check: ProbeStatus::Idle,
            generated_link: None,
            copied: false,
        }
    }

    /// Applies an image URL edit.
    ///
    /// Any edit invalidates the previously generated link and the copied
    /// confirmation. Returns `true` when the trimmed value passes the URL
    /// pattern and a reachability check should be (re)started; the stale
    /// check becomes irrelevant either way.
    pub fn set_image_url_input(&mut self, value: impl Into<String>) -> bool {
        self.image_url_input = value.into();
        self.generated_link = None;
        self.copied = false;

        let trimmed = self.image_url_input.trim();
        if trimmed.is_empty() {
            self.image_url_error = None;
            self.check = ProbeStatus::Idle;
            return false;
        }

        if !is_http_url(trimmed) {
            self.image_url_error = Some(ComposerFieldError::InvalidImageUrl);
            self.check = ProbeStatus::Idle;
            return false;
        }

        self.image_url_error = None;
        self.check = ProbeStatus::Checking;
        true
    }

    /// Applies a sender name edit, clearing its field error and the
    /// generated link.
    pub fn set_sender_input(&mut self, value: impl Into<String>) {
        self.sender_input = value.into();
        self.sender_error = None;
        self.generated_link = None;
        self.copied = false;
    }

    /// Applies the latest probe status projection.
    pub fn apply_check(&mut self, status: ProbeStatus) {
        self.check = status;
        match status {
            ProbeStatus::Unreachable => {
                self.image_url_error = Some(ComposerFieldError::ImageUnreachable);
            }
            ProbeStatus::TimedOut => {
                self.image_url_error = Some(ComposerFieldError::ImageTimedOut);
            }
            ProbeStatus::Reachable => {
                self.image_url_error = None;
            }
            ProbeStatus::Idle | ProbeStatus::Checking => {}
        }
    }

    /// Returns `true` when the generate control should be enabled.
    pub fn can_generate(&self) -> bool {
        self.check == ProbeStatus::Reachable
    }

    /// Returns the trimmed payload candidate for link generation.
    pub fn payload_candidate(&self) -> CardPayload {
        CardPayload::new(self.image_url_input.trim(), self.sender_input.trim())
    }

    /// Records a freshly generated link.
    pub fn note_link(&mut self, link: impl Into<String>) {
        self.image_url_error = None;
        self.sender_error = None;
        self.generated_link = Some(link.into());
        self.copied = false;
    }

    /// Records a confirmed clipboard write.
    pub fn note_copied(&mut self) {
        self.copied = true;
    }

    /// Hides the copied-confirmation after its feedback window.
    pub fn clear_copied(&mut self) {
        self.copied = false;
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Reveal (consumer) view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    payload: CardPayload,
    valid: bool,
    /// Whether the preloaded image is ready to show.
    pub image_ready: bool,
    /// Whether the image failed to load.
    pub image_error: bool,
    /// Whether the card has been accepted.
    pub accepted: bool,
}

impl RevealState {
    /// Builds reveal state from a decoded payload.
    ///
    /// A sentinel payload produces the permanent invalid-link state; there is
    /// no retry path from it.
    pub fn from_payload(payload: CardPayload) -> Self {
        let valid = payload.is_valid();
        Self {
            payload,
            valid,
            image_ready: false,
            image_error: false,
            accepted: false,
        }
    }

    /// Returns the decoded payload.
    pub fn payload(&self) -> &CardPayload {
        &self.payload
    }

    /// Returns `false` for the permanent invalid-link state.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Records a successful image preload.
    pub fn mark_image_ready(&mut self) {
        self.image_ready = true;
        self.image_error = false;
    }

    /// Records a failed image load.
    ///
    /// The failure is non-blocking: the view stays usable and only the
    /// accept control is gated.
    pub fn mark_image_failed(&mut self) {
        self.image_error = true;
    }

    /// Returns `true` when the accept control should be enabled.
    pub fn can_accept(&self) -> bool {
        self.valid && self.image_ready && !self.image_error && !self.accepted
    }

    /// Latches acceptance.
    ///
    /// Returns `true` exactly once, on the transition that should fire the
    /// celebration; repeated presses are no-ops.
    pub fn accept(&mut self) -> bool {
        if !self.can_accept() {
            return false;
        }
        self.accepted = true;
        true
    }

    /// Returns the title line for the current state.
    pub fn title(&self) -> String {
        if !self.accepted {
            return "Will you be my valentine? \u{1f498}".to_string();
        }

        if self.payload.sender_name.is_empty() {
            "Love you \u{1f498}".to_string()
        } else {
            format!("With love, your {} \u{1f498}", self.payload.sender_name)
        }
    }

    /// Returns the inline image-failure message, when one should be shown.
    pub fn inline_error(&self) -> Option<&'static str> {
        self.image_error
            .then_some("Oops, the image failed to load. Try another link.")
    }
}
