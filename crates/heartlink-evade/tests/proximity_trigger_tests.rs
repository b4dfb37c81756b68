//! Tests the proximity threshold boundary and disabled-controller inertness.

use heartlink_evade::{
    ArenaBounds, EvasiveTarget, PROXIMITY_THRESHOLD_PX, PointerSample, TargetRect, TargetSize,
    distance_to_rect,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fixture_target() -> (ArenaBounds, EvasiveTarget) {
    let arena = ArenaBounds::new(600.0, 300.0).expect("arena should be valid");
    (arena, EvasiveTarget::new(arena, TargetSize::COMPACT))
}

#[test]
fn proximity_trigger_tests_distance_is_zero_inside_rect() {
    let rect = TargetRect {
        x: 50.0,
        y: 50.0,
        width: 10.0,
        height: 10.0,
    };

    assert_eq!(distance_to_rect(PointerSample { x: 55.0, y: 55.0 }, rect), 0.0);
    assert_eq!(distance_to_rect(PointerSample { x: 50.0, y: 50.0 }, rect), 0.0);
    assert_eq!(distance_to_rect(PointerSample { x: 60.0, y: 60.0 }, rect), 0.0);
}

#[test]
fn proximity_trigger_tests_measures_edge_and_corner_distance() {
    let rect = TargetRect {
        x: 50.0,
        y: 50.0,
        width: 10.0,
        height: 10.0,
    };

    // Straight out from the right edge.
    assert_eq!(distance_to_rect(PointerSample { x: 65.0, y: 55.0 }, rect), 5.0);
    // Diagonal from the bottom-right corner.
    assert_eq!(distance_to_rect(PointerSample { x: 63.0, y: 64.0 }, rect), 5.0);
}

#[test]
fn proximity_trigger_tests_fires_at_threshold_but_not_beyond() {
    let (arena, mut target) = fixture_target();
    let mut rng = StdRng::seed_from_u64(7);
    let rect = target.rect();

    let just_outside = PointerSample {
        x: rect.x - (PROXIMITY_THRESHOLD_PX + 1.0),
        y: rect.y + rect.height / 2.0,
    };
    assert!(!target.observe_pointer(arena, just_outside, &mut rng));
    assert_eq!(target.rect(), rect, "position must not change outside the threshold");

    let at_threshold = PointerSample {
        x: rect.x - PROXIMITY_THRESHOLD_PX,
        y: rect.y + rect.height / 2.0,
    };
    assert!(target.observe_pointer(arena, at_threshold, &mut rng));
    assert_ne!(target.rect(), rect, "threshold contact must relocate the target");
}

#[test]
fn proximity_trigger_tests_disabled_controller_ignores_everything() {
    let (arena, mut target) = fixture_target();
    let mut rng = StdRng::seed_from_u64(7);
    let rect = target.rect();
    target.set_disabled(true);

    let inside = PointerSample {
        x: rect.x + 1.0,
        y: rect.y + 1.0,
    };
    assert!(!target.observe_pointer(arena, inside, &mut rng));
    assert!(!target.press(arena, &mut rng));
    assert_eq!(target.rect(), rect);

    target.set_disabled(false);
    assert!(target.observe_pointer(arena, inside, &mut rng));
}

#[test]
fn proximity_trigger_tests_press_relocates_and_suppresses_action() {
    let (arena, mut target) = fixture_target();
    let mut rng = StdRng::seed_from_u64(11);
    let rect = target.rect();

    assert!(target.press(arena, &mut rng));
    assert_ne!(target.rect(), rect);
}
