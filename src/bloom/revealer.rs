// Typewriter reveal of a fixed message, one character per step.
use crate::timer::{Scheduler, Timer, TimerId, TimerKind};

/// Reveal progress. `Revealing(n)` means the first `n` characters are visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Inactive,
    Revealing(usize),
}

#[derive(Debug)]
pub struct Revealer {
    text: Vec<char>,
    start_delay_ms: u32,
    speed_ms: u32,
    active: bool,
    state: RevealState,
    shown: String,
    generation: u64,
    step: Option<TimerId>,
}

impl Revealer {
    pub fn new(text: &str, start_delay_ms: u32, speed_ms: u32) -> Self {
        Self {
            text: text.chars().collect(),
            start_delay_ms,
            speed_ms,
            active: false,
            state: RevealState::Inactive,
            shown: String::new(),
            generation: 0,
            step: None,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// The revealed prefix.
    pub fn shown(&self) -> &str {
        &self.shown
    }

    pub fn is_complete(&self) -> bool {
        self.state == RevealState::Revealing(self.text.len())
    }

    pub fn has_pending_step(&self) -> bool {
        self.step.is_some()
    }

    /// Assert or drop the active signal. A rising edge restarts from empty;
    /// dropping it cancels the pending step and clears the text.
    pub fn set_active(&mut self, active: bool, sched: &mut impl Scheduler) {
        match (self.active, active) {
            (false, true) => {
                self.active = true;
                self.restart(sched);
            }
            (true, false) => {
                self.active = false;
                self.cancel(sched);
                self.state = RevealState::Inactive;
                self.shown.clear();
            }
            _ => {}
        }
    }

    /// Swap the message; restarts when active.
    pub fn set_text(&mut self, text: &str, sched: &mut impl Scheduler) {
        let chars: Vec<char> = text.chars().collect();
        if chars == self.text {
            return;
        }
        self.text = chars;
        if self.active {
            self.restart(sched);
        }
    }

    /// Change the per-character interval; restarts when active.
    pub fn set_speed(&mut self, speed_ms: u32, sched: &mut impl Scheduler) {
        if speed_ms == self.speed_ms {
            return;
        }
        self.speed_ms = speed_ms;
        if self.active {
            self.restart(sched);
        }
    }

    /// Handle one step; returns the new prefix when a character was appended.
    pub fn step(&mut self, id: TimerId, timer: Timer, sched: &mut impl Scheduler) -> Option<&str> {
        if timer.kind != TimerKind::RevealStep
            || timer.generation != self.generation
            || self.step != Some(id)
        {
            return None;
        }
        self.step = None;
        let RevealState::Revealing(idx) = self.state else {
            return None;
        };
        let ch = *self.text.get(idx)?;
        self.shown.push(ch);
        self.state = RevealState::Revealing(idx + 1);
        if idx + 1 < self.text.len() {
            let next = Timer::new(TimerKind::RevealStep, self.generation);
            self.step = Some(sched.schedule_once(self.speed_ms, next));
        } else {
            log::debug!("message fully revealed ({} chars)", self.text.len());
        }
        Some(&self.shown)
    }

    /// Cancel the pending step without touching progress.
    pub fn cancel(&mut self, sched: &mut impl Scheduler) {
        if let Some(id) = self.step.take() {
            sched.cancel(id);
        }
        self.generation += 1;
    }

    fn restart(&mut self, sched: &mut impl Scheduler) {
        self.cancel(sched);
        self.shown.clear();
        self.state = RevealState::Revealing(0);
        if !self.text.is_empty() {
            let first = Timer::new(TimerKind::RevealStep, self.generation);
            self.step = Some(sched.schedule_once(self.start_delay_ms, first));
        }
    }
}
