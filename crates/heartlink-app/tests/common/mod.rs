//! Shared fixtures for app integration tests.

use std::sync::Mutex;

use heartlink_app::{ClipboardError, ClipboardWriter};
use heartlink_confetti::{ConfettiBurst, ConfettiSurface};
use heartlink_probe::{ImageLoader, LoadRequest};

/// Loader that records every issued request instead of doing network work.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingLoader {
    pub requests: Mutex<Vec<LoadRequest>>,
}

impl RecordingLoader {
    #[allow(dead_code)]
    pub fn last_request(&self) -> Option<LoadRequest> {
        self.requests
            .lock()
            .expect("loader lock should work")
            .last()
            .cloned()
    }

    #[allow(dead_code)]
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("loader lock should work").len()
    }
}

impl ImageLoader for RecordingLoader {
    fn begin(&self, request: &LoadRequest) {
        self.requests
            .lock()
            .expect("loader lock should work")
            .push(request.clone());
    }
}

/// Clipboard fake with a scripted failure mode.
#[allow(dead_code)]
pub struct FakeClipboard {
    fail: bool,
    pub writes: Mutex<Vec<String>>,
}

impl FakeClipboard {
    #[allow(dead_code)]
    pub fn working() -> Self {
        Self {
            fail: false,
            writes: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn broken() -> Self {
        Self {
            fail: true,
            writes: Mutex::new(Vec::new()),
        }
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError("platform clipboard unavailable".to_string()));
        }
        self.writes
            .lock()
            .expect("clipboard lock should work")
            .push(text.to_string());
        Ok(())
    }
}

/// Surface that records fired bursts.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSurface {
    pub bursts: Mutex<Vec<ConfettiBurst>>,
}

impl RecordingSurface {
    #[allow(dead_code)]
    pub fn burst_count(&self) -> usize {
        self.bursts.lock().expect("surface lock should work").len()
    }
}

impl ConfettiSurface for RecordingSurface {
    fn fire(&self, burst: &ConfettiBurst) {
        self.bursts
            .lock()
            .expect("surface lock should work")
            .push(burst.clone());
    }
}
