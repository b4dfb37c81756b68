#![warn(missing_docs)]
//! # heartlink-confetti
//!
//! ## Purpose
//! Defines the celebration burst plans sent to the external particle-effect
//! renderer.
//!
//! ## Responsibilities
//! - Describe renderer option objects (count, spread, origin, velocity,
//!   colors) as serializable values.
//! - Build the staged three-burst celebration volley and the single-burst
//!   fallback.
//! - Own the scoped renderer surface for the lifetime of one reveal view.
//!
//! ## Data flow
//! The reveal flow accepts the card -> [`CelebrationStage::fire_celebration`]
//! picks a plan -> each [`ConfettiBurst`] goes through the [`ConfettiSurface`]
//! seam; rendering itself stays outside this workspace.
//!
//! ## Ownership and lifetimes
//! [`CelebrationStage`] owns its optional surface handle and releases it on
//! drop, so the particle canvas lives exactly as long as the view that
//! acquired it. No module-level renderer state exists.
//!
//! ## Error model
//! Burst plans are static data; nothing here fails. A missing surface simply
//! selects the fallback plan.

use std::sync::Arc;

use serde::Serialize;

/// Color set applied to every celebration burst.
pub const CELEBRATION_COLORS: [&str; 4] = ["#fa5252", "#ff8787", "#fcc2d7", "#f783ac"];

/// Normalized burst origin, as fractions of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurstOrigin {
    /// Horizontal origin fraction, `0.0` = left edge.
    pub x: f64,
    /// Vertical origin fraction, `0.0` = top edge.
    pub y: f64,
}

/// One parameterized burst for the particle renderer.
///
/// Serializes to the renderer's camelCase option object; optional tuning
/// fields are omitted so the renderer applies its own defaults, matching how
/// the fallback burst has always been issued.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiBurst {
    /// Number of particles in the burst.
    pub particle_count: u32,
    /// Spread angle in degrees.
    pub spread: u32,
    /// Initial particle velocity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_velocity: Option<u32>,
    /// Frame count before particles disappear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<u32>,
    /// Downward acceleration factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    /// Per-frame velocity decay factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decay: Option<f64>,
    /// Burst origin on the surface.
    pub origin: BurstOrigin,
    /// Particle color set.
    pub colors: Vec<String>,
}

fn celebration_colors() -> Vec<String> {
    CELEBRATION_COLORS.iter().map(|color| color.to_string()).collect()
}

fn staged_burst(
    particle_count: u32,
    spread: u32,
    start_velocity: u32,
    ticks: u32,
    origin: BurstOrigin,
) -> ConfettiBurst {
    ConfettiBurst {
        particle_count,
        spread,
        start_velocity: Some(start_velocity),
        ticks: Some(ticks),
        gravity: Some(0.95),
        decay: Some(0.93),
        origin,
        colors: celebration_colors(),
    }
}

/// Builds the staged celebration volley: two side bursts plus a center burst.
pub fn celebration_bursts() -> Vec<ConfettiBurst> {
    vec![
        staged_burst(90, 96, 45, 420, BurstOrigin { x: 0.15, y: 0.2 }),
        staged_burst(90, 96, 45, 420, BurstOrigin { x: 0.85, y: 0.2 }),
        staged_burst(70, 110, 38, 440, BurstOrigin { x: 0.5, y: 0.1 }),
    ]
}

/// Builds the single mid-height burst used when no scoped surface exists.
pub fn fallback_burst() -> ConfettiBurst {
    ConfettiBurst {
        particle_count: 160,
        spread: 110,
        start_velocity: None,
        ticks: None,
        gravity: None,
        decay: None,
        origin: BurstOrigin { x: 0.5, y: 0.5 },
        colors: celebration_colors(),
    }
}

/// Plan selected for one celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationPlan {
    /// The three-burst volley fired through a scoped surface.
    Staged,
    /// The single fallback burst fired through the shared renderer channel.
    Fallback,
}

/// Renderer seam: fires one burst on some particle surface.
pub trait ConfettiSurface: Send + Sync {
    /// Renders one burst with the given parameters.
    fn fire(&self, burst: &ConfettiBurst);
}

/// Scoped owner of the reveal view's particle surface.
///
/// Created when the reveal view mounts and dropped when it unmounts; dropping
/// the stage releases the surface handle and with it the underlying canvas.
pub struct CelebrationStage {
    surface: Option<Arc<dyn ConfettiSurface>>,
    fallback: Arc<dyn ConfettiSurface>,
}

impl CelebrationStage {
    /// Creates a stage with a dedicated surface and a shared fallback
    /// channel.
    pub fn new(surface: Arc<dyn ConfettiSurface>, fallback: Arc<dyn ConfettiSurface>) -> Self {
        Self {
            surface: Some(surface),
            fallback,
        }
    }

    /// Creates a stage that only has the shared fallback channel, used when
    /// surface acquisition failed.
    pub fn without_surface(fallback: Arc<dyn ConfettiSurface>) -> Self {
        Self {
            surface: None,
            fallback,
        }
    }

    /// Fires the celebration and reports which plan ran.
    ///
    /// With a surface, the staged volley is fired burst by burst; without
    /// one, the single fallback burst goes through the shared channel.
    pub fn fire_celebration(&self) -> CelebrationPlan {
        match &self.surface {
            Some(surface) => {
                for burst in celebration_bursts() {
                    surface.fire(&burst);
                }
                CelebrationPlan::Staged
            }
            None => {
                self.fallback.fire(&fallback_burst());
                CelebrationPlan::Fallback
            }
        }
    }

    /// Releases the scoped surface early, before the stage itself drops.
    pub fn release_surface(&mut self) {
        self.surface = None;
    }
}
