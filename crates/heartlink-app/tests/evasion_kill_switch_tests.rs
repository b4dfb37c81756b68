//! Integration tests for the evasion runtime gate.

use heartlink_app::{RevealFlow, evasion_enabled_from_env};
use heartlink_core::{CardPayload, encode_token};
use heartlink_evade::{ArenaBounds, PointerSample};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn evasion_kill_switch_tests_disables_relocation_when_env_is_false() {
    // Safety:
    // - Integration tests mutate process env in a single-threaded test body.
    // - We reset the variable before returning.
    unsafe { std::env::set_var("HEARTLINK_EVASION_ENABLED", "false") };
    assert!(!evasion_enabled_from_env());

    let token = encode_token(&CardPayload::new("https://example.com/a.jpg", "Egor"))
        .expect("encoding should succeed");
    let arena = ArenaBounds::new(600.0, 300.0).expect("arena should be valid");
    let mut flow = RevealFlow::open(&token, arena, 1_024.0, 0);
    let mut rng = StdRng::seed_from_u64(1);

    let rect = flow.target.rect();
    let inside = PointerSample {
        x: rect.x + 1.0,
        y: rect.y + 1.0,
    };
    assert!(flow.target.is_disabled());
    assert!(!flow.on_pointer(inside, &mut rng));
    assert_eq!(flow.target.rect(), rect);

    // Safety: see rationale above.
    unsafe { std::env::set_var("HEARTLINK_EVASION_ENABLED", "true") };
    assert!(evasion_enabled_from_env());

    // Safety: see rationale above.
    unsafe { std::env::remove_var("HEARTLINK_EVASION_ENABLED") };
}
