// Stage sequencer: idle -> seedDrop -> bloom, and back to idle on reset.
use crate::timer::{Scheduler, Timer, TimerId, TimerKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    SeedDrop,
    Bloom,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::SeedDrop => "seedDrop",
            Stage::Bloom => "bloom",
        }
    }
}

/// Owns the current stage and the pending seed-landing timer.
#[derive(Debug)]
pub struct Sequencer {
    stage: Stage,
    seed_drop_ms: u32,
    generation: u64,
    landing: Option<TimerId>,
}

impl Sequencer {
    pub fn new(seed_drop_ms: u32) -> Self {
        Self {
            stage: Stage::Idle,
            seed_drop_ms,
            generation: 0,
            landing: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn has_pending_landing(&self) -> bool {
        self.landing.is_some()
    }

    /// Idle -> SeedDrop, arming the landing timer. Ignored in any other stage.
    pub fn trigger(&mut self, sched: &mut impl Scheduler) -> bool {
        if self.stage != Stage::Idle {
            return false;
        }
        self.stage = Stage::SeedDrop;
        let timer = Timer::new(TimerKind::SeedLanded, self.generation);
        self.landing = Some(sched.schedule_once(self.seed_drop_ms, timer));
        true
    }

    /// SeedDrop -> Bloom when the landing timer from the current generation fires.
    pub fn land(&mut self, id: TimerId, timer: Timer) -> bool {
        if timer.kind != TimerKind::SeedLanded || timer.generation != self.generation {
            return false;
        }
        if self.landing == Some(id) {
            self.landing = None;
        }
        if self.stage != Stage::SeedDrop {
            return false;
        }
        self.stage = Stage::Bloom;
        true
    }

    /// Back to Idle from anywhere, dropping a landing that has not happened yet.
    /// Returns whether the stage changed.
    pub fn reset(&mut self, sched: &mut impl Scheduler) -> bool {
        self.cancel(sched);
        let changed = self.stage != Stage::Idle;
        self.stage = Stage::Idle;
        changed
    }

    /// Cancel the landing timer and invalidate any delivery already in flight.
    pub fn cancel(&mut self, sched: &mut impl Scheduler) {
        if let Some(id) = self.landing.take() {
            sched.cancel(id);
        }
        self.generation += 1;
    }
}
