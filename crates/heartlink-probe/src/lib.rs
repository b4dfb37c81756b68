#![warn(missing_docs)]
//! # heartlink-probe
//!
//! ## Purpose
//! Models the asynchronous image reachability check as a single-threaded,
//! timestamp-driven state machine.
//!
//! ## Responsibilities
//! - Debounce load attempts while the user is still typing a URL.
//! - Bound every attempt with an optional timeout.
//! - Tag attempts so stale results can never overwrite newer state.
//! - Hand load requests to an injectable image-fetch collaborator.
//!
//! ## Data flow
//! The composer submits candidate URLs into [`ImageProbe`]; the probe emits
//! one [`LoadRequest`] per settled debounce window through [`ImageLoader`];
//! the shell reports the load result back via [`ImageProbe::resolve`].
//!
//! ## Ownership and lifetimes
//! The probe owns the pending URL string; nothing borrows from the caller's
//! input buffers, so attempts survive across UI re-renders.
//!
//! ## Error model
//! Nothing here fails outward. Unreachable and timed-out images are ordinary
//! settled outcomes, and stale resolutions are discarded silently.
//!
//! ## Example
//! ```rust
//! use heartlink_probe::{ImageProbe, LoadOutcome, ProbePolicy, ProbeStatus};
//!
//! let mut probe = ImageProbe::new(ProbePolicy::precheck());
//! let attempt = probe.submit("https://example.com/a.jpg", 0);
//! let request = probe.poll(250).expect("debounce window has elapsed");
//! assert!(probe.resolve(request.attempt, LoadOutcome::Loaded));
//! assert_eq!(probe.status(), ProbeStatus::Reachable);
//! assert_eq!(request.attempt, attempt);
//! ```

/// Liveness tag minted for every submitted attempt.
///
/// Tags increase monotonically within one probe; a resolution applies only
/// when its tag matches the latest attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(u64);

/// Debounce/timeout configuration for one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePolicy {
    /// Delay between submission and the actual load request.
    pub debounce_ms: u64,
    /// Bound on the wait for a load result; `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
}

impl ProbePolicy {
    /// Debounce applied to composer-side URL prechecks.
    pub const PRECHECK_DEBOUNCE_MS: u64 = 250;

    /// Timeout applied to composer-side URL prechecks.
    pub const PRECHECK_TIMEOUT_MS: u64 = 10_000;

    /// Policy for the composer-side precheck: debounce typing bursts and
    /// give up on silent remotes.
    pub fn precheck() -> Self {
        Self {
            debounce_ms: Self::PRECHECK_DEBOUNCE_MS,
            timeout_ms: Some(Self::PRECHECK_TIMEOUT_MS),
        }
    }

    /// Policy for the reveal-side preload: start immediately and wait as long
    /// as the view is alive.
    pub fn preload() -> Self {
        Self {
            debounce_ms: 0,
            timeout_ms: None,
        }
    }
}

/// Load request handed to the external image-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Liveness tag to echo back into [`ImageProbe::resolve`].
    pub attempt: AttemptId,
    /// Image URL to load.
    pub url: String,
}

/// Result reported by the external image-fetch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image loaded successfully.
    Loaded,
    /// The load failed.
    Failed,
}

/// Settled result of one probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The image loaded within bounds.
    Reachable,
    /// The load failed.
    Unreachable,
    /// No result arrived before the timeout.
    TimedOut,
}

/// Status projection consumed by view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// No attempt is active.
    Idle,
    /// An attempt is debouncing or awaiting its result.
    Checking,
    /// Latest attempt settled: image is reachable.
    Reachable,
    /// Latest attempt settled: load failed.
    Unreachable,
    /// Latest attempt settled: load timed out.
    TimedOut,
}

/// Opaque capability that starts an image load.
///
/// Implementations are fire-and-forget: the eventual result comes back
/// through [`ImageProbe::resolve`] with the request's attempt tag.
pub trait ImageLoader: Send + Sync {
    /// Starts loading `request.url`.
    fn begin(&self, request: &LoadRequest);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ProbePhase {
    Idle,
    Debouncing {
        url: String,
        attempt: AttemptId,
        request_at_ms: u64,
    },
    Waiting {
        attempt: AttemptId,
        deadline_ms: Option<u64>,
    },
    Settled {
        outcome: ProbeOutcome,
    },
}

/// Image reachability state machine.
///
/// Driven entirely by caller-provided millisecond timestamps so behavior is
/// deterministic under test and independent of wall clocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProbe {
    policy: ProbePolicy,
    phase: ProbePhase,
    next_attempt: u64,
}

impl ImageProbe {
    /// Creates an idle probe with the given policy.
    pub fn new(policy: ProbePolicy) -> Self {
        Self {
            policy,
            phase: ProbePhase::Idle,
            next_attempt: 0,
        }
    }

    /// Submits a new candidate URL, superseding any in-flight attempt.
    ///
    /// The previous attempt's eventual resolution becomes stale and will be
    /// discarded; this is the cancellation point for overlapping checks.
    pub fn submit(&mut self, url: impl Into<String>, now_ms: u64) -> AttemptId {
        self.next_attempt += 1;
        let attempt = AttemptId(self.next_attempt);
        self.phase = ProbePhase::Debouncing {
            url: url.into(),
            attempt,
            request_at_ms: now_ms.saturating_add(self.policy.debounce_ms),
        };
        attempt
    }

    /// Emits the pending load request once the debounce window has elapsed.
    ///
    /// Returns at most one request per submitted attempt.
    pub fn poll(&mut self, now_ms: u64) -> Option<LoadRequest> {
        let (url, attempt) = match &self.phase {
            ProbePhase::Debouncing {
                url,
                attempt,
                request_at_ms,
            } if now_ms >= *request_at_ms => (url.clone(), *attempt),
            _ => return None,
        };

        self.phase = ProbePhase::Waiting {
            attempt,
            deadline_ms: self
                .policy
                .timeout_ms
                .map(|timeout| now_ms.saturating_add(timeout)),
        };
        Some(LoadRequest { attempt, url })
    }

    /// Polls and forwards the emitted request to the loader, if any.
    pub fn pump(&mut self, loader: &dyn ImageLoader, now_ms: u64) {
        if let Some(request) = self.poll(now_ms) {
            loader.begin(&request);
        }
    }

    /// Settles a waiting attempt as timed out when its deadline has passed.
    pub fn on_tick(&mut self, now_ms: u64) {
        if let ProbePhase::Waiting {
            deadline_ms: Some(deadline),
            ..
        } = &self.phase
            && now_ms >= *deadline
        {
            self.phase = ProbePhase::Settled {
                outcome: ProbeOutcome::TimedOut,
            };
        }
    }

    /// Applies a load result if, and only if, it belongs to the attempt that
    /// is still waiting.
    ///
    /// Returns `true` when the result was applied. Results for superseded
    /// attempts, already-settled probes, or reset probes are discarded
    /// without touching state.
    pub fn resolve(&mut self, attempt: AttemptId, outcome: LoadOutcome) -> bool {
        match &self.phase {
            ProbePhase::Waiting {
                attempt: waiting, ..
            } if *waiting == attempt => {}
            _ => return false,
        }

        self.phase = ProbePhase::Settled {
            outcome: match outcome {
                LoadOutcome::Loaded => ProbeOutcome::Reachable,
                LoadOutcome::Failed => ProbeOutcome::Unreachable,
            },
        };
        true
    }

    /// Returns the probe to idle, staling every outstanding attempt.
    ///
    /// Models view unmount and cleared input.
    pub fn reset(&mut self) {
        self.phase = ProbePhase::Idle;
    }

    /// Returns the current status projection.
    pub fn status(&self) -> ProbeStatus {
        match &self.phase {
            ProbePhase::Idle => ProbeStatus::Idle,
            ProbePhase::Debouncing { .. } | ProbePhase::Waiting { .. } => ProbeStatus::Checking,
            ProbePhase::Settled { outcome } => match outcome {
                ProbeOutcome::Reachable => ProbeStatus::Reachable,
                ProbeOutcome::Unreachable => ProbeStatus::Unreachable,
                ProbeOutcome::TimedOut => ProbeStatus::TimedOut,
            },
        }
    }
}
