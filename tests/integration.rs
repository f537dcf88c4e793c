// Integration tests (native) for the `iris-bloom` crate.
// These tests avoid wasm-specific functionality and drive the bloom state
// machine on a virtual clock so they can run under `cargo test` on the host.

use iris_bloom::bloom::{RevealState, Stage, Update};
use iris_bloom::config::{GreetingConfig, MESSAGE};
use iris_bloom::{Event, Headless};

fn headless(seed: u64) -> Headless {
    Headless::seeded(GreetingConfig::default(), seed)
}

#[test]
fn triggers_outside_idle_leave_stage_unchanged() {
    let mut h = headless(1);
    h.click();
    for _ in 0..5 {
        assert_eq!(h.click(), None);
        assert_eq!(h.stage(), Stage::SeedDrop);
    }
    h.advance(900);
    for _ in 0..5 {
        assert_eq!(h.dispatch(Event::Trigger), None);
        assert_eq!(h.stage(), Stage::Bloom);
    }
}

#[test]
fn seed_drop_is_never_skipped() {
    let mut h = headless(2);
    assert_eq!(h.stage(), Stage::Idle);
    assert_eq!(h.click(), Some(Update::Stage(Stage::SeedDrop)));
    let mut stages = vec![Stage::SeedDrop];
    for _ in 0..100 {
        for update in h.advance(10) {
            if let Update::Stage(s) = update {
                stages.push(s);
            }
        }
    }
    assert_eq!(stages, vec![Stage::SeedDrop, Stage::Bloom]);
}

#[test]
fn bloom_arrives_exactly_after_delay() {
    let mut h = headless(3);
    h.advance(1234);
    h.click();
    let start = h.now_ms();
    h.advance(899);
    assert_eq!(h.stage(), Stage::SeedDrop);
    h.advance(1);
    assert_eq!(h.stage(), Stage::Bloom);
    assert_eq!(h.now_ms() - start, 900);
}

#[test]
fn field_grows_one_per_tick_to_exactly_one_hundred() {
    let mut h = headless(4);
    h.click();
    h.advance(900);
    assert!(h.greeting.elements().is_empty());
    let mut last = 0;
    for _ in 0..100 {
        h.advance(55);
        let len = h.greeting.elements().len();
        assert_eq!(len, last + 1);
        last = len;
    }
    h.advance(60_000);
    assert_eq!(h.greeting.elements().len(), 100);
}

#[test]
fn every_flower_is_within_bounds() {
    for seed in [5, 6, 7, 8] {
        let mut h = headless(seed);
        h.click();
        h.advance(900 + 55 * 100);
        for e in h.greeting.elements() {
            assert!((0.0..100.0).contains(&e.x), "x {}", e.x);
            assert!((5.0..100.0).contains(&e.y), "y {}", e.y);
            assert!((-20.0..20.0).contains(&e.rotation_deg), "rotation {}", e.rotation_deg);
            assert!((0.0..0.35).contains(&e.delay_s));
            assert!((3.0..8.0).contains(&e.duration_s));
            assert!((e.size - iris_bloom::bloom::size_for_y(e.y)).abs() < 1e-12);
        }
    }
}

#[test]
fn collection_is_empty_outside_bloom() {
    let mut h = headless(9);
    assert!(h.greeting.elements().is_empty());
    h.click();
    h.advance(899);
    assert!(h.greeting.elements().is_empty());
    h.advance(1 + 55 * 40);
    assert_eq!(h.greeting.elements().len(), 40);
    h.reset();
    assert!(h.greeting.elements().is_empty());
    h.advance(10_000);
    assert!(h.greeting.elements().is_empty());
}

#[test]
fn reset_cancels_every_pending_timer() {
    let mut h = headless(10);
    h.click();
    h.advance(900 + 300);
    assert!(h.greeting.has_pending_timers());
    h.reset();
    assert!(!h.greeting.has_pending_timers());
    assert_eq!(h.scheduler.pending_count(), 0);
    assert!(h.advance(120_000).is_empty());
    assert_eq!(h.greeting.reveal_state(), RevealState::Inactive);
}

#[test]
fn reveal_emits_growing_prefixes_and_restarts_on_rebloom() {
    let mut h = headless(11);
    h.click();
    let texts: Vec<String> = h
        .advance(900 + 5_000)
        .into_iter()
        .filter_map(|u| match u {
            Update::TextRevealed(s) => Some(s),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), MESSAGE.chars().count());
    for pair in texts.windows(2) {
        assert!(pair[1].starts_with(&pair[0]));
        assert_eq!(pair[1].chars().count(), pair[0].chars().count() + 1);
    }
    assert_eq!(texts.last().map(String::as_str), Some(MESSAGE));

    h.reset();
    h.click();
    h.advance(900);
    assert_eq!(h.greeting.revealed(), "");
    assert_eq!(h.greeting.reveal_state(), RevealState::Revealing(0));
}

#[test]
fn custom_config_is_honoured() {
    let config = GreetingConfig {
        seed_drop_ms: 100,
        spawn_interval_ms: 10,
        max_elements: 5,
        reveal_start_delay_ms: 0,
        reveal_speed_ms: 1,
        message: "hi".to_string(),
        ..GreetingConfig::default()
    };
    let mut h = Headless::seeded(config, 12);
    h.click();
    h.advance(100);
    assert_eq!(h.stage(), Stage::Bloom);
    h.advance(1_000);
    assert_eq!(h.greeting.elements().len(), 5);
    assert_eq!(h.greeting.revealed(), "hi");
}

#[test]
fn fixed_rng_places_predictably() {
    let mut h = Headless::with_rng(GreetingConfig::default(), || 0.5);
    h.click();
    h.advance(955);
    let e = &h.greeting.elements()[0];
    assert_eq!(e.x, 50.0);
    assert_eq!(e.y, 52.5);
    assert_eq!(e.rotation_deg, 0.0);
}
