#![warn(missing_docs)]
//! # heartlink-evade
//!
//! ## Purpose
//! Implements the evasive target controller: a screen-space rectangle that
//! jumps away whenever the pointer gets close enough.
//!
//! ## Responsibilities
//! - Compute pointer-to-rectangle proximity in arena-local coordinates.
//! - Relocate the target uniformly at random while keeping it inside the
//!   arena.
//! - Select the target size preset from the viewport breakpoint.
//! - Ignore all movement triggers while the controller is disabled.
//!
//! ## Data flow
//! The reveal view forwards pointer samples and direct presses into
//! [`EvasiveTarget`]; the controller answers with its updated [`TargetRect`],
//! which the presentation layer animates toward.
//!
//! ## Ownership and lifetimes
//! The controller is a plain value owned by its view and dropped with it; the
//! RNG is injected per call so relocation stays deterministic under test.
//!
//! ## Error model
//! Only arena construction can fail ([`EvadeError::InvalidArena`]). Pointer
//! handling never fails: a relocation either happens or is a no-op.
//!
//! ## Example
//! ```rust
//! use heartlink_evade::{ArenaBounds, EvasiveTarget, PointerSample, TargetSize};
//! use rand::SeedableRng;
//!
//! let arena = ArenaBounds::new(600.0, 300.0).expect("arena should be valid");
//! let mut target = EvasiveTarget::new(arena, TargetSize::COMPACT);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! target.observe_pointer(arena, PointerSample { x: 0.0, y: 0.0 }, &mut rng);
//! ```

use rand::Rng;
use thiserror::Error;

/// Pointer distance at or below which the target relocates.
pub const PROXIMITY_THRESHOLD_PX: f64 = 5.0;

/// Viewport width at or above which the desktop size preset applies.
pub const DESKTOP_BREAKPOINT_PX: f64 = 900.0;

/// Bounding region the target must stay inside, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    width: f64,
    height: f64,
}

impl ArenaBounds {
    /// Creates validated arena bounds.
    ///
    /// # Errors
    /// Returns [`EvadeError::InvalidArena`] when either dimension is negative
    /// or not finite.
    pub fn new(width: f64, height: f64) -> Result<Self, EvadeError> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(EvadeError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns arena width in logical pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns arena height in logical pixels.
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Target dimensions, chosen from one of two responsive presets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSize {
    /// Target width in logical pixels.
    pub width: f64,
    /// Target height in logical pixels.
    pub height: f64,
}

impl TargetSize {
    /// Preset used at desktop viewport widths.
    pub const DESKTOP: Self = Self {
        width: 168.0,
        height: 60.0,
    };

    /// Preset used below the desktop breakpoint.
    pub const COMPACT: Self = Self {
        width: 84.0,
        height: 30.0,
    };

    /// Selects the preset for a viewport width.
    pub fn for_viewport_width(viewport_width: f64) -> Self {
        if viewport_width >= DESKTOP_BREAKPOINT_PX {
            Self::DESKTOP
        } else {
            Self::COMPACT
        }
    }
}

/// One pointer position in arena-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Horizontal offset from the arena's left edge.
    pub x: f64,
    /// Vertical offset from the arena's top edge.
    pub y: f64,
}

/// Axis-aligned rectangle currently occupied by the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRect {
    /// Left offset within the arena.
    pub x: f64,
    /// Top offset within the arena.
    pub y: f64,
    /// Rectangle width.
    pub width: f64,
    /// Rectangle height.
    pub height: f64,
}

/// Shortest Euclidean distance from a point to an axis-aligned rectangle.
///
/// Returns `0.0` when the point lies inside the rectangle or on its boundary;
/// otherwise the distance to the nearest edge or corner.
pub fn distance_to_rect(pointer: PointerSample, rect: TargetRect) -> f64 {
    let dx = (rect.x - pointer.x)
        .max(pointer.x - (rect.x + rect.width))
        .max(0.0);
    let dy = (rect.y - pointer.y)
        .max(pointer.y - (rect.y + rect.height))
        .max(0.0);
    dx.hypot(dy)
}

/// Controller state for the evasive rectangle.
///
/// The controller has no persisted "fleeing" state: each proximity trigger
/// repositions the rectangle instantaneously, and any visual smoothing is a
/// presentation-layer transition.
#[derive(Debug, Clone, PartialEq)]
pub struct EvasiveTarget {
    x: f64,
    y: f64,
    size: TargetSize,
    disabled: bool,
}

impl EvasiveTarget {
    /// Places a new target at the arena's right edge, vertically centered.
    ///
    /// The first placement is deliberately not randomized so the target looks
    /// stationary and reachable until the pointer actually approaches it.
    pub fn new(arena: ArenaBounds, size: TargetSize) -> Self {
        Self {
            x: (arena.width - size.width).max(0.0),
            y: ((arena.height - size.height) / 2.0).max(0.0),
            size,
            disabled: false,
        }
    }

    /// Returns the rectangle currently occupied by the target.
    pub fn rect(&self) -> TargetRect {
        TargetRect {
            x: self.x,
            y: self.y,
            width: self.size.width,
            height: self.size.height,
        }
    }

    /// Returns the current size preset.
    pub fn size(&self) -> TargetSize {
        self.size
    }

    /// Returns `true` when relocation triggers are ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables relocation triggers.
    ///
    /// A disabled controller ignores pointer samples and presses entirely; no
    /// state changes until it is re-enabled.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Processes one pointer sample, relocating when it lands within the
    /// proximity threshold.
    ///
    /// Returns `true` when a relocation happened. Each sample triggers at
    /// most one relocation.
    pub fn observe_pointer(
        &mut self,
        arena: ArenaBounds,
        pointer: PointerSample,
        rng: &mut impl Rng,
    ) -> bool {
        if self.disabled {
            return false;
        }

        if distance_to_rect(pointer, self.rect()) > PROXIMITY_THRESHOLD_PX {
            return false;
        }

        self.relocate(arena, rng);
        true
    }

    /// Direct-activation fallback for pointers that never stream proximity
    /// samples (a tap landing exactly on the target).
    ///
    /// Returns `true` when the press was converted into a relocation, in
    /// which case the target's nominal action must be suppressed.
    pub fn press(&mut self, arena: ArenaBounds, rng: &mut impl Rng) -> bool {
        if self.disabled {
            return false;
        }

        self.relocate(arena, rng);
        true
    }

    /// Applies a breakpoint crossover to the target size.
    ///
    /// The position is reclamped against the arena immediately so the
    /// containment invariant survives a size change near the arena edge.
    pub fn set_size(&mut self, arena: ArenaBounds, size: TargetSize) {
        self.size = size;
        self.x = self.x.min((arena.width - size.width).max(0.0));
        self.y = self.y.min((arena.height - size.height).max(0.0));
    }

    /// Picks a new top-left position uniformly at random, keeping the whole
    /// rectangle inside the arena. Arenas smaller than the rectangle clamp
    /// the range to the single point `0.0`.
    fn relocate(&mut self, arena: ArenaBounds, rng: &mut impl Rng) {
        let max_x = (arena.width - self.size.width).max(0.0);
        let max_y = (arena.height - self.size.height).max(0.0);
        self.x = rng.random_range(0.0..=max_x);
        self.y = rng.random_range(0.0..=max_y);
    }
}

/// Evasive controller error type.
#[derive(Debug, Error)]
pub enum EvadeError {
    /// Arena dimensions are negative or not finite.
    #[error("invalid arena bounds: {width}x{height}")]
    InvalidArena {
        /// Rejected width.
        width: f64,
        /// Rejected height.
        height: f64,
    },
}
