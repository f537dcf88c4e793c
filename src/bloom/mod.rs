//! Bloom sequence state machine.
//!
//! A [`Greeting`] owns the three timer-driven pieces of the page: the stage
//! [`Sequencer`] (idle -> seed drop -> bloom), the flower [`Spawner`] and the
//! message [`Revealer`]. It is driven purely by [`Event`]s and talks to time
//! only through a [`Scheduler`], so the same code runs against browser timers
//! in the page and against a [`VirtualScheduler`] in [`Headless`] tests.
//!
//! Every handled event produces at most one [`Update`], small enough for a
//! view to apply incrementally (append one flower, replace the heading text).

mod element;
mod revealer;
mod spawner;
mod stage;

pub use element::{DecorativeElement, size_for_y};
pub use revealer::{RevealState, Revealer};
pub use spawner::Spawner;
pub use stage::{Sequencer, Stage};

use crate::config::{GreetingConfig, MAX_ELEMENTS};
use crate::rng::{Prng, UnitRng};
use crate::timer::{Scheduler, Timer, TimerId, TimerKind, VirtualScheduler};

/// Inputs to the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Trigger, // click on the iris
    Reset,   // reset button
    Timer(TimerId, Timer),
}

/// What a view has to redraw after an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    /// Stage changed. Entering Idle or Bloom also means the flower field and
    /// heading start out empty.
    Stage(Stage),
    ElementAdded(DecorativeElement),
    TextRevealed(String),
}

pub struct Greeting {
    config: GreetingConfig,
    sequencer: Sequencer,
    spawner: Spawner,
    revealer: Revealer,
}

impl Greeting {
    pub fn new(mut config: GreetingConfig) -> Self {
        if config.max_elements > MAX_ELEMENTS {
            log::warn!(
                "max_elements {} clamped to {}",
                config.max_elements,
                MAX_ELEMENTS
            );
            config.max_elements = MAX_ELEMENTS;
        }
        Self {
            sequencer: Sequencer::new(config.seed_drop_ms),
            spawner: Spawner::new(config.max_elements, config.spawn_interval_ms),
            revealer: Revealer::new(
                &config.message,
                config.reveal_start_delay_ms,
                config.reveal_speed_ms,
            ),
            config,
        }
    }

    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.sequencer.stage()
    }

    pub fn elements(&self) -> &[DecorativeElement] {
        self.spawner.elements()
    }

    pub fn revealed(&self) -> &str {
        self.revealer.shown()
    }

    pub fn reveal_state(&self) -> RevealState {
        self.revealer.state()
    }

    /// True while any of the three components still waits on a timer.
    pub fn has_pending_timers(&self) -> bool {
        self.sequencer.has_pending_landing()
            || self.spawner.is_running()
            || self.revealer.has_pending_step()
    }

    pub fn handle(
        &mut self,
        event: Event,
        sched: &mut impl Scheduler,
        rng: &mut impl UnitRng,
    ) -> Option<Update> {
        match event {
            Event::Trigger => {
                if !self.sequencer.trigger(sched) {
                    log::debug!("trigger ignored in {:?}", self.stage());
                    return None;
                }
                log::info!("seed dropping");
                Some(Update::Stage(Stage::SeedDrop))
            }
            Event::Reset => self.reset(sched),
            Event::Timer(id, timer) => match timer.kind {
                TimerKind::SeedLanded => {
                    if !self.sequencer.land(id, timer) {
                        return None;
                    }
                    log::info!("bloom");
                    self.spawner.start(sched);
                    self.revealer.set_active(true, sched);
                    Some(Update::Stage(Stage::Bloom))
                }
                TimerKind::SpawnTick => self
                    .spawner
                    .tick(id, timer, sched, rng)
                    .cloned()
                    .map(Update::ElementAdded),
                TimerKind::RevealStep => self
                    .revealer
                    .step(id, timer, sched)
                    .map(|s| Update::TextRevealed(s.to_string())),
            },
        }
    }

    /// Replace the message; an in-progress reveal restarts from empty.
    pub fn set_message(&mut self, message: &str, sched: &mut impl Scheduler) {
        self.config.message = message.to_string();
        self.revealer.set_text(message, sched);
    }

    pub fn set_reveal_speed(&mut self, speed_ms: u32, sched: &mut impl Scheduler) {
        self.config.reveal_speed_ms = speed_ms;
        self.revealer.set_speed(speed_ms, sched);
    }

    /// Cancel everything still pending. Only `Reset` is meaningful afterwards.
    pub fn teardown(&mut self, sched: &mut impl Scheduler) {
        self.sequencer.cancel(sched);
        self.spawner.stop(sched);
        self.revealer.set_active(false, sched);
        self.revealer.cancel(sched);
    }

    fn reset(&mut self, sched: &mut impl Scheduler) -> Option<Update> {
        let changed = self.sequencer.reset(sched);
        self.spawner.stop(sched);
        self.revealer.set_active(false, sched);
        if changed {
            log::info!("reset to idle");
            Some(Update::Stage(Stage::Idle))
        } else {
            None
        }
    }
}

// --- Headless driver ---------------------------------------------------------

/// A greeting on a virtual clock, for tests and non-browser hosts.
pub struct Headless<R: UnitRng = Prng> {
    pub greeting: Greeting,
    pub scheduler: VirtualScheduler,
    rng: R,
}

impl Headless<Prng> {
    pub fn seeded(config: GreetingConfig, seed: u64) -> Self {
        Self::with_rng(config, Prng::seeded(seed))
    }
}

impl<R: UnitRng> Headless<R> {
    pub fn with_rng(config: GreetingConfig, rng: R) -> Self {
        Self {
            greeting: Greeting::new(config),
            scheduler: VirtualScheduler::new(),
            rng,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn stage(&self) -> Stage {
        self.greeting.stage()
    }

    pub fn click(&mut self) -> Option<Update> {
        self.dispatch(Event::Trigger)
    }

    pub fn reset(&mut self) -> Option<Update> {
        self.dispatch(Event::Reset)
    }

    pub fn dispatch(&mut self, event: Event) -> Option<Update> {
        self.greeting.handle(event, &mut self.scheduler, &mut self.rng)
    }

    /// Run the clock forward `ms`, delivering every timer that comes due in
    /// order. Returns the updates produced.
    pub fn advance(&mut self, ms: u64) -> Vec<Update> {
        let until = self.scheduler.now_ms() + ms;
        let mut updates = Vec::new();
        while let Some((id, timer)) = self.scheduler.pop_due(until) {
            if let Some(update) = self.dispatch(Event::Timer(id, timer)) {
                updates.push(update);
            }
        }
        self.scheduler.set_now(until);
        updates
    }

    pub fn teardown(&mut self) {
        self.greeting.teardown(&mut self.scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless() -> Headless {
        Headless::seeded(GreetingConfig::default(), 0xB100_u64)
    }

    fn element_count(updates: &[Update]) -> usize {
        updates
            .iter()
            .filter(|u| matches!(u, Update::ElementAdded(_)))
            .count()
    }

    #[test]
    fn click_drops_seed_then_blooms() {
        let mut h = headless();
        assert_eq!(h.click(), Some(Update::Stage(Stage::SeedDrop)));
        assert_eq!(h.stage(), Stage::SeedDrop);
        assert!(h.advance(899).is_empty());
        assert_eq!(h.advance(1), vec![Update::Stage(Stage::Bloom)]);
        assert!(h.greeting.elements().is_empty());
    }

    #[test]
    fn clicks_outside_idle_are_ignored() {
        let mut h = headless();
        h.click();
        assert_eq!(h.click(), None);
        h.advance(900);
        assert_eq!(h.click(), None);
        assert_eq!(h.stage(), Stage::Bloom);
    }

    #[test]
    fn bloom_fills_field_and_reveals_message() {
        let mut h = headless();
        h.click();
        h.advance(900);
        let updates = h.advance(10_000);
        assert_eq!(element_count(&updates), 100);
        assert_eq!(h.greeting.elements().len(), 100);
        assert_eq!(h.greeting.revealed(), crate::config::MESSAGE);
        assert!(!h.greeting.has_pending_timers());
        assert_eq!(h.scheduler.pending_count(), 0);
    }

    #[test]
    fn reset_mid_bloom_clears_and_silences_timers() {
        let mut h = headless();
        h.click();
        h.advance(900 + 55 * 10);
        assert_eq!(h.greeting.elements().len(), 10);
        assert!(!h.greeting.revealed().is_empty());
        assert_eq!(h.reset(), Some(Update::Stage(Stage::Idle)));
        assert!(h.greeting.elements().is_empty());
        assert_eq!(h.greeting.revealed(), "");
        assert_eq!(h.scheduler.pending_count(), 0);
        assert!(h.advance(60_000).is_empty());
        assert_eq!(h.stage(), Stage::Idle);
    }

    #[test]
    fn reset_during_seed_drop_cancels_landing() {
        let mut h = headless();
        h.click();
        h.advance(400);
        assert_eq!(h.reset(), Some(Update::Stage(Stage::Idle)));
        assert!(h.advance(5_000).is_empty());
        assert_eq!(h.stage(), Stage::Idle);
    }

    #[test]
    fn stale_timers_after_reset_do_nothing() {
        let mut h = headless();
        h.click();
        h.advance(900 + 55 * 3);
        // Capture a spawn tick that was already due before the reset lands.
        let until = h.now_ms() + 55;
        let (id, timer) = std::iter::from_fn(|| h.scheduler.pop_due(until))
            .find(|(_, t)| t.kind == TimerKind::SpawnTick)
            .unwrap();
        h.reset();
        assert_eq!(h.dispatch(Event::Timer(id, timer)), None);
        assert!(h.greeting.elements().is_empty());
    }

    #[test]
    fn message_change_restarts_reveal() {
        let mut h = headless();
        h.click();
        h.advance(900 + 220 + 48 * 3);
        assert_eq!(h.greeting.revealed().chars().count(), 4);
        let Headless { greeting, scheduler, .. } = &mut h;
        greeting.set_message("Merhaba", scheduler);
        assert_eq!(h.greeting.revealed(), "");
        h.advance(10_000);
        assert_eq!(h.greeting.revealed(), "Merhaba");
    }

    #[test]
    fn oversized_cap_is_clamped() {
        let config = GreetingConfig {
            max_elements: 150,
            ..GreetingConfig::default()
        };
        let mut h = Headless::seeded(config, 21);
        assert_eq!(h.greeting.config().max_elements, MAX_ELEMENTS);
        h.click();
        h.advance(900 + 55 * 200);
        assert_eq!(h.greeting.elements().len(), MAX_ELEMENTS as usize);
    }

    #[test]
    fn reveal_speed_change_restarts_reveal() {
        let mut h = headless();
        h.click();
        h.advance(900 + 220 + 48 * 2);
        assert_eq!(h.greeting.revealed().chars().count(), 3);
        let Headless { greeting, scheduler, .. } = &mut h;
        greeting.set_reveal_speed(10, scheduler);
        assert_eq!(h.greeting.config().reveal_speed_ms, 10);
        assert_eq!(h.greeting.revealed(), "");
        // 220 ms pause, then one character per 10 ms.
        h.advance(220 + 10 * 4);
        assert_eq!(h.greeting.revealed().chars().count(), 5);
    }

    #[test]
    fn teardown_leaves_nothing_pending() {
        let mut h = headless();
        h.click();
        h.advance(950);
        assert!(h.greeting.has_pending_timers());
        h.teardown();
        assert!(!h.greeting.has_pending_timers());
        assert_eq!(h.scheduler.pending_count(), 0);
    }

    #[test]
    fn rebloom_after_reset_starts_fresh() {
        let mut h = headless();
        h.click();
        h.advance(900 + 55 * 50);
        h.reset();
        h.click();
        h.advance(900);
        assert!(h.greeting.elements().is_empty());
        h.advance(55);
        assert_eq!(h.greeting.elements().len(), 1);
        assert_eq!(h.greeting.elements()[0].id, 0);
    }
}
