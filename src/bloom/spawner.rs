// Incremental spawner: one flower per interval tick until the cap is reached.
use super::element::DecorativeElement;
use crate::config::MAX_ELEMENTS;
use crate::rng::UnitRng;
use crate::timer::{Scheduler, Timer, TimerId, TimerKind};

#[derive(Debug)]
pub struct Spawner {
    elements: Vec<DecorativeElement>,
    next_id: u32,
    cap: u32,
    interval_ms: u32,
    generation: u64,
    ticker: Option<TimerId>,
}

impl Spawner {
    /// `cap` is bounded by `MAX_ELEMENTS`.
    pub fn new(cap: u32, interval_ms: u32) -> Self {
        let cap = cap.min(MAX_ELEMENTS);
        Self {
            elements: Vec::with_capacity(cap as usize),
            next_id: 0,
            cap,
            interval_ms,
            generation: 0,
            ticker: None,
        }
    }

    pub fn elements(&self) -> &[DecorativeElement] {
        &self.elements
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Clear the field and start ticking. A spawner already running is restarted.
    pub fn start(&mut self, sched: &mut impl Scheduler) {
        self.stop(sched);
        if self.cap == 0 {
            return;
        }
        let timer = Timer::new(TimerKind::SpawnTick, self.generation);
        self.ticker = Some(sched.schedule_repeating(self.interval_ms, timer));
    }

    /// Cancel ticking and discard every element.
    pub fn stop(&mut self, sched: &mut impl Scheduler) {
        if let Some(id) = self.ticker.take() {
            sched.cancel(id);
        }
        self.generation += 1;
        self.elements.clear();
        self.next_id = 0;
    }

    /// Handle one tick; returns the element appended, if any.
    pub fn tick(
        &mut self,
        id: TimerId,
        timer: Timer,
        sched: &mut impl Scheduler,
        rng: &mut impl UnitRng,
    ) -> Option<&DecorativeElement> {
        if timer.kind != TimerKind::SpawnTick
            || timer.generation != self.generation
            || self.ticker != Some(id)
        {
            return None;
        }
        if self.next_id >= self.cap {
            self.finish(sched);
            return None;
        }
        let element = DecorativeElement::random(self.next_id, rng);
        self.next_id += 1;
        self.elements.push(element);
        log::trace!("spawned flower {}/{}", self.next_id, self.cap);
        if self.next_id >= self.cap {
            self.finish(sched);
        }
        self.elements.last()
    }

    fn finish(&mut self, sched: &mut impl Scheduler) {
        if let Some(id) = self.ticker.take() {
            sched.cancel(id);
            log::debug!("spawner finished with {} flowers", self.elements.len());
        }
    }
}
