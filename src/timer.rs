//! Timer queue abstraction.
//!
//! Components never hold closures; they ask a [`Scheduler`] to deliver a
//! [`Timer`] back to them later and keep the returned [`TimerId`] so they can
//! cancel it. Each timer also carries the generation of the component that
//! armed it, which lets a component reject deliveries that were already in
//! flight when it restarted.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Which component a timer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    SeedLanded,
    SpawnTick,
    RevealStep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub generation: u64,
}

impl Timer {
    pub fn new(kind: TimerKind, generation: u64) -> Self {
        Self { kind, generation }
    }
}

pub trait Scheduler {
    /// Deliver `timer` once after `delay_ms`.
    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerId;
    /// Deliver `timer` every `period_ms` until cancelled.
    fn schedule_repeating(&mut self, period_ms: u32, timer: Timer) -> TimerId;
    /// Cancelling an unknown or already-fired id is a no-op.
    fn cancel(&mut self, id: TimerId);
}

// --- Virtual clock -----------------------------------------------------------

struct Entry {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u32>,
    timer: Timer,
    seq: u64, // insertion order, breaks ties between equal due times
}

/// Deterministic scheduler driven by an explicit clock. Timers due at the same
/// instant fire in the order they were (re)armed.
#[derive(Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    next_id: u32,
    next_seq: u64,
    pending: Vec<Entry>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|e| e.id == id)
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, Timer)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)?;
        let entry = self.pending.swap_remove(idx);
        self.now_ms = self.now_ms.max(entry.due_ms);
        let fired = (entry.id, entry.timer);
        if let Some(period) = entry.period_ms {
            let seq = self.bump_seq();
            self.pending.push(Entry {
                due_ms: entry.due_ms + u64::from(period.max(1)),
                seq,
                ..entry
            });
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Fire everything due within the next `ms`, returning deliveries in order.
    /// Only useful when nothing reacts to the deliveries by arming new timers;
    /// the headless driver interleaves `pop_due` with dispatch instead.
    pub fn drain(&mut self, ms: u64) -> VecDeque<(TimerId, Timer)> {
        let until = self.now_ms + ms;
        let mut out = VecDeque::new();
        while let Some(fired) = self.pop_due(until) {
            out.push_back(fired);
        }
        self.set_now(until);
        out
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn arm(&mut self, delay_ms: u32, period_ms: Option<u32>, timer: Timer) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let seq = self.bump_seq();
        self.pending.push(Entry {
            id,
            due_ms: self.now_ms + u64::from(delay_ms),
            period_ms,
            timer,
            seq,
        });
        id
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerId {
        self.arm(delay_ms, None, timer)
    }

    fn schedule_repeating(&mut self, period_ms: u32, timer: Timer) -> TimerId {
        self.arm(period_ms.max(1), Some(period_ms), timer)
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|e| e.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(kind: TimerKind) -> Timer {
        Timer::new(kind, 1)
    }

    #[test]
    fn once_fires_at_due_time_only() {
        let mut s = VirtualScheduler::new();
        let id = s.schedule_once(100, t(TimerKind::SeedLanded));
        assert!(s.pop_due(99).is_none());
        assert_eq!(s.pop_due(100), Some((id, t(TimerKind::SeedLanded))));
        assert_eq!(s.now_ms(), 100);
        assert!(s.pop_due(1_000).is_none());
    }

    #[test]
    fn repeating_rearms_until_cancelled() {
        let mut s = VirtualScheduler::new();
        let id = s.schedule_repeating(55, t(TimerKind::SpawnTick));
        let fired = s.drain(165);
        assert_eq!(fired.len(), 3);
        assert!(s.is_pending(id));
        s.cancel(id);
        assert!(s.drain(1_000).is_empty());
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn equal_due_times_fire_in_arm_order() {
        let mut s = VirtualScheduler::new();
        let a = s.schedule_once(10, t(TimerKind::RevealStep));
        let b = s.schedule_once(10, t(TimerKind::SeedLanded));
        let fired: Vec<_> = s.drain(10).into_iter().map(|(id, _)| id).collect();
        assert_eq!(fired, vec![a, b]);
    }

    #[test]
    fn cancel_unknown_is_noop() {
        let mut s = VirtualScheduler::new();
        s.schedule_once(5, t(TimerKind::RevealStep));
        s.cancel(TimerId(999));
        assert_eq!(s.pending_count(), 1);
    }
}
