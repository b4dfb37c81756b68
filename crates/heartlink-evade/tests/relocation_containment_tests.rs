//! Tests that every relocation keeps the target fully inside the arena.

use heartlink_evade::{ArenaBounds, EvasiveTarget, PointerSample, TargetSize};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn assert_contained(target: &EvasiveTarget, arena: ArenaBounds) {
    let rect = target.rect();
    let max_x = (arena.width() - rect.width).max(0.0);
    let max_y = (arena.height() - rect.height).max(0.0);
    assert!(
        rect.x >= 0.0 && rect.x <= max_x,
        "x={} escaped [0, {max_x}]",
        rect.x
    );
    assert!(
        rect.y >= 0.0 && rect.y <= max_y,
        "y={} escaped [0, {max_y}]",
        rect.y
    );
}

#[test]
fn relocation_containment_tests_holds_across_many_relocations() {
    let arena = ArenaBounds::new(640.0, 360.0).expect("arena should be valid");
    let mut target = EvasiveTarget::new(arena, TargetSize::DESKTOP);
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..1_000 {
        let rect = target.rect();
        // Land inside the current rect so every sample triggers a relocation.
        let pointer = PointerSample {
            x: rect.x + rect.width / 2.0,
            y: rect.y + rect.height / 2.0,
        };
        assert!(target.observe_pointer(arena, pointer, &mut rng));
        assert_contained(&target, arena);
    }
}

#[test]
fn relocation_containment_tests_clamps_in_arenas_smaller_than_target() {
    let arena = ArenaBounds::new(40.0, 20.0).expect("arena should be valid");
    let mut target = EvasiveTarget::new(arena, TargetSize::COMPACT);
    let mut rng = StdRng::seed_from_u64(3);

    assert_eq!(target.rect().x, 0.0);
    assert_eq!(target.rect().y, 0.0);

    assert!(target.press(arena, &mut rng));
    assert_eq!(target.rect().x, 0.0);
    assert_eq!(target.rect().y, 0.0);
}

#[test]
fn relocation_containment_tests_survives_breakpoint_crossover_at_edge() {
    let arena = ArenaBounds::new(200.0, 80.0).expect("arena should be valid");
    let mut target = EvasiveTarget::new(arena, TargetSize::COMPACT);

    // Initial placement hugs the right edge; growing the target there would
    // clip without the resize reclamp.
    target.set_size(arena, TargetSize::DESKTOP);
    assert_contained(&target, arena);

    target.set_size(arena, TargetSize::COMPACT);
    assert_contained(&target, arena);
}
