#![warn(missing_docs)]
//! # heartlink-app
//!
//! ## Purpose
//! Orchestrates the token codec, image probes, evasive target, view state,
//! and celebration stage into the two user-facing flows.
//!
//! ## Responsibilities
//! - Parse fragment routes and assemble share links.
//! - Run the composer flow: precheck lifecycle, generation gates, clipboard.
//! - Run the reveal flow: decode, preload, acceptance, evasion shutdown,
//!   celebration.
//! - Expose the evasion runtime gate sourced from the environment.
//!
//! ## Data flow
//! Shell events (edits, clock ticks, load results, pointer samples, presses)
//! drive [`ComposerFlow`] and [`RevealFlow`], which delegate to the focused
//! workspace crates and keep their view states current.
//!
//! ## Ownership and lifetimes
//! Flows own their state machines outright; external capabilities (image
//! loader, clipboard, confetti surface) are borrowed per call so the shell
//! controls their lifecycle.
//!
//! ## Error model
//! Layer failures are wrapped in [`AppError`]. Form-level refusals are not
//! errors: they surface as [`GenerateOutcome::Blocked`] with a field error
//! already applied to the view state.
//!
//! ## Security and privacy notes
//! Tokens stay inside link values; nothing here logs payload contents or
//! writes anything beyond the caller-supplied clipboard capability.

use heartlink_confetti::{CelebrationPlan, CelebrationStage};
use heartlink_core::{TokenError, decode_token, encode_token, is_http_url};
use heartlink_evade::{ArenaBounds, EvasiveTarget, PointerSample, TargetSize};
use heartlink_probe::{AttemptId, ImageLoader, ImageProbe, LoadOutcome, ProbePolicy, ProbeStatus};
use heartlink_ui::{ComposerFieldError, ComposerState, RevealState};
use rand::Rng;
use thiserror::Error;
use url::Url;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("HEARTLINK_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Checks the evasion runtime gate env var.
///
/// Semantics:
/// - Unset => evasion enabled.
/// - `0`, `false`, `off` (case-insensitive) => evasion disabled.
/// - Any other value => evasion enabled.
pub fn evasion_enabled_from_env() -> bool {
    match std::env::var("HEARTLINK_EVASION_ENABLED") {
        Ok(value) => {
            let normalized = value.trim().to_ascii_lowercase();
            !(normalized == "0" || normalized == "false" || normalized == "off")
        }
        Err(_) => true,
    }
}

/// Parsed fragment route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The composer (home) view.
    Compose,
    /// The reveal view for one share token.
    Reveal {
        /// Token carried by the fragment.
        token: String,
    },
}

/// Parses a URL fragment into a route.
///
/// Only `/i/<token>` resolves to the reveal view; everything else falls back
/// to the composer, mirroring the wildcard redirect of the original routing
/// table.
pub fn parse_route(fragment: &str) -> Route {
    let Some(token) = fragment.strip_prefix("/i/") else {
        return Route::Compose;
    };

    if token.is_empty() || token.contains('/') {
        return Route::Compose;
    }

    Route::Reveal {
        token: token.to_string(),
    }
}

/// Pulls the share token out of a full link, when it carries one.
pub fn extract_token(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    match parse_route(url.fragment().unwrap_or_default()) {
        Route::Reveal { token } => Some(token),
        Route::Compose => None,
    }
}

/// Assembles a share link carrying the token in the URL fragment.
///
/// The token never leaves the fragment, so it is not sent in any HTTP
/// request when the recipient opens the link.
pub fn share_link(origin: &str, path: &str, token: &str) -> String {
    format!("{origin}{path}#/i/{token}")
}

/// Result of one generate attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Every gate passed; the link was recorded on the composer state.
    Generated(String),
    /// A field gate refused; the error was applied to the view state.
    Blocked(ComposerFieldError),
}

/// Write-text capability used to copy the generated link.
pub trait ClipboardWriter: Send + Sync {
    /// Writes `text` to the clipboard.
    ///
    /// # Errors
    /// Returns [`ClipboardError`] when the underlying platform write fails.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard capability failure.
#[derive(Debug, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Composer (producer) flow: form state plus the precheck probe.
#[derive(Debug, Clone)]
pub struct ComposerFlow {
    /// View state projected to the composer form.
    pub state: ComposerState,
    probe: ImageProbe,
}

impl ComposerFlow {
    /// Creates an empty composer flow with the standard precheck policy.
    pub fn new() -> Self {
        Self {
            state: ComposerState::new(),
            probe: ImageProbe::new(ProbePolicy::precheck()),
        }
    }

    /// Applies an image URL edit, superseding any in-flight precheck.
    pub fn edit_image_url(&mut self, value: impl Into<String>, now_ms: u64) {
        if self.state.set_image_url_input(value) {
            self.probe
                .submit(self.state.image_url_input.trim().to_string(), now_ms);
        } else {
            self.probe.reset();
        }
    }

    /// Applies a sender name edit.
    pub fn edit_sender(&mut self, value: impl Into<String>) {
        self.state.set_sender_input(value);
    }

    /// Forwards a due precheck load request to the image loader.
    pub fn pump(&mut self, loader: &dyn ImageLoader, now_ms: u64) {
        self.probe.pump(loader, now_ms);
    }

    /// Advances timeout bookkeeping and refreshes the check projection.
    pub fn on_tick(&mut self, now_ms: u64) {
        self.probe.on_tick(now_ms);
        self.state.apply_check(self.probe.status());
    }

    /// Applies a load result; stale attempts are discarded silently.
    pub fn on_image_result(&mut self, attempt: AttemptId, outcome: LoadOutcome) {
        if self.probe.resolve(attempt, outcome) {
            self.state.apply_check(self.probe.status());
        }
    }

    /// Runs the generation gates and, when all pass, records the share link.
    ///
    /// Gate order matches the form: empty URL, URL pattern, in-flight check,
    /// reachability, then sender name. The first refusal is applied to its
    /// field and reported as [`GenerateOutcome::Blocked`].
    ///
    /// # Errors
    /// Returns [`AppError::Token`] when token serialization itself fails.
    pub fn generate(&mut self, origin: &str, path: &str) -> Result<GenerateOutcome, AppError> {
        let candidate = self.state.payload_candidate();

        let url_gate = if candidate.image_url.is_empty() {
            Some(ComposerFieldError::EmptyImageUrl)
        } else if !is_http_url(&candidate.image_url) {
            Some(ComposerFieldError::InvalidImageUrl)
        } else {
            match self.state.check {
                ProbeStatus::Reachable => None,
                ProbeStatus::Checking => Some(ComposerFieldError::StillChecking),
                ProbeStatus::TimedOut => Some(ComposerFieldError::ImageTimedOut),
                ProbeStatus::Idle | ProbeStatus::Unreachable => {
                    Some(ComposerFieldError::ImageUnreachable)
                }
            }
        };

        if let Some(error) = url_gate {
            self.state.generated_link = None;
            self.state.image_url_error = Some(error);
            return Ok(GenerateOutcome::Blocked(error));
        }

        if candidate.sender_name.is_empty() {
            self.state.generated_link = None;
            self.state.sender_error = Some(ComposerFieldError::EmptySenderName);
            return Ok(GenerateOutcome::Blocked(ComposerFieldError::EmptySenderName));
        }

        let token = encode_token(&candidate)?;
        let link = share_link(origin, path, &token);
        self.state.note_link(&link);
        Ok(GenerateOutcome::Generated(link))
    }

    /// Copies the generated link, confirming only on write success.
    ///
    /// Returns `true` when the copied-confirmation should be shown. A failed
    /// write is not surfaced further; the confirmation simply stays hidden.
    pub fn copy(&mut self, clipboard: &dyn ClipboardWriter) -> bool {
        let Some(link) = self.state.generated_link.clone() else {
            return false;
        };

        match clipboard.write_text(&link) {
            Ok(()) => {
                self.state.note_copied();
                true
            }
            Err(_) => false,
        }
    }
}

impl Default for ComposerFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Reveal (consumer) flow: decoded card, preload probe, evasive target.
#[derive(Debug, Clone)]
pub struct RevealFlow {
    /// View state projected to the reveal page.
    pub state: RevealState,
    /// Evasive decline target living inside the arena.
    pub target: EvasiveTarget,
    preload: ImageProbe,
    arena: ArenaBounds,
}

impl RevealFlow {
    /// Opens the reveal view for one incoming token.
    ///
    /// Decodes the token (malformed tokens produce the permanent
    /// invalid-link state), starts the image preload for valid cards, and
    /// places the evasive target at its initial resting spot. The evasion
    /// runtime gate is consulted once per mount.
    pub fn open(token: &str, arena: ArenaBounds, viewport_width: f64, now_ms: u64) -> Self {
        let state = RevealState::from_payload(decode_token(token));
        let mut preload = ImageProbe::new(ProbePolicy::preload());
        let mut target = EvasiveTarget::new(arena, TargetSize::for_viewport_width(viewport_width));

        if !evasion_enabled_from_env() {
            target.set_disabled(true);
        }

        if state.is_valid() {
            preload.submit(state.payload().image_url.clone(), now_ms);
        }

        Self {
            state,
            target,
            preload,
            arena,
        }
    }

    /// Forwards the pending preload request to the image loader.
    pub fn pump_preload(&mut self, loader: &dyn ImageLoader, now_ms: u64) {
        self.preload.pump(loader, now_ms);
    }

    /// Applies an image preload result; stale attempts are discarded.
    pub fn on_image_result(&mut self, attempt: AttemptId, outcome: LoadOutcome) {
        if self.preload.resolve(attempt, outcome) {
            match outcome {
                LoadOutcome::Loaded => self.state.mark_image_ready(),
                LoadOutcome::Failed => self.state.mark_image_failed(),
            }
        }
    }

    /// Processes one pointer sample over the arena.
    pub fn on_pointer(&mut self, pointer: PointerSample, rng: &mut impl Rng) -> bool {
        self.target.observe_pointer(self.arena, pointer, rng)
    }

    /// Processes a direct press on the decline target.
    pub fn on_decline_press(&mut self, rng: &mut impl Rng) -> bool {
        self.target.press(self.arena, rng)
    }

    /// Applies a viewport breakpoint crossover to the target size.
    pub fn set_viewport_width(&mut self, viewport_width: f64) {
        self.target
            .set_size(self.arena, TargetSize::for_viewport_width(viewport_width));
    }

    /// Applies new arena bounds, reclamping the target into them.
    pub fn resize_arena(&mut self, arena: ArenaBounds) {
        self.arena = arena;
        let size = self.target.size();
        self.target.set_size(arena, size);
    }

    /// Accepts the card.
    ///
    /// On the accepting transition the evasive target is disabled and the
    /// celebration fires exactly once; repeated or gated presses return
    /// `None` and change nothing.
    pub fn accept(&mut self, stage: &CelebrationStage) -> Option<CelebrationPlan> {
        if !self.state.accept() {
            return None;
        }

        self.target.set_disabled(true);
        Some(stage.fire_celebration())
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Token codec error.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for routing and link assembly.

    use super::*;

    #[test]
    fn routes_only_well_formed_reveal_fragments() {
        assert_eq!(parse_route(""), Route::Compose);
        assert_eq!(parse_route("/"), Route::Compose);
        assert_eq!(parse_route("/i/"), Route::Compose);
        assert_eq!(parse_route("/other/abc"), Route::Compose);
        assert_eq!(parse_route("/i/abc/def"), Route::Compose);
        assert_eq!(
            parse_route("/i/abc"),
            Route::Reveal {
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn share_link_keeps_token_in_fragment() {
        let link = share_link("https://cards.example", "/", "tok123");
        assert_eq!(link, "https://cards.example/#/i/tok123");
        assert_eq!(extract_token(&link), Some("tok123".to_string()));
    }
}
