// Browser-backed Scheduler on top of setTimeout / setInterval.
//
// Each armed timer keeps its JS closure alive here. A closure that stops
// being callable (one-shot fired, or cancelled) may still be on the stack,
// so it is parked in `retired` and only dropped on the next dispatch.
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::timer::{Scheduler, Timer, TimerId};

/// Called from the JS timer callback with the id and payload it was armed with.
pub type Deliver = fn(TimerId, Timer);

struct Armed {
    handle: i32,
    repeating: bool,
    callback: Closure<dyn FnMut()>,
}

pub struct BrowserScheduler {
    window: Window,
    deliver: Deliver,
    next_id: u32,
    armed: HashMap<TimerId, Armed>,
    retired: Vec<Closure<dyn FnMut()>>,
}

impl BrowserScheduler {
    pub fn new(window: Window, deliver: Deliver) -> Self {
        Self {
            window,
            deliver,
            next_id: 0,
            armed: HashMap::new(),
            retired: Vec::new(),
        }
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Drop closures retired by earlier dispatches.
    pub fn collect_retired(&mut self) {
        self.retired.clear();
    }

    /// Bookkeeping for a timer that just fired: one-shots are done.
    pub fn settle(&mut self, id: TimerId) {
        if self.armed.get(&id).is_some_and(|a| !a.repeating) {
            if let Some(armed) = self.armed.remove(&id) {
                self.retired.push(armed.callback);
            }
        }
    }

    pub fn cancel_all(&mut self) {
        let ids: Vec<TimerId> = self.armed.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    fn arm(&mut self, delay_ms: u32, repeating: bool, timer: Timer) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deliver = self.deliver;
        let callback = Closure::wrap(Box::new(move || deliver(id, timer)) as Box<dyn FnMut()>);
        let function = callback.as_ref().unchecked_ref();
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let handle = if repeating {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(function, delay)
        } else {
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(function, delay)
        };
        match handle {
            Ok(handle) => {
                self.armed.insert(
                    id,
                    Armed {
                        handle,
                        repeating,
                        callback,
                    },
                );
            }
            Err(err) => log::warn!("could not arm {:?} timer: {err:?}", timer.kind),
        }
        id
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerId {
        self.arm(delay_ms, false, timer)
    }

    fn schedule_repeating(&mut self, period_ms: u32, timer: Timer) -> TimerId {
        self.arm(period_ms, true, timer)
    }

    fn cancel(&mut self, id: TimerId) {
        let Some(armed) = self.armed.remove(&id) else {
            return;
        };
        if armed.repeating {
            self.window.clear_interval_with_handle(armed.handle);
        } else {
            self.window.clear_timeout_with_handle(armed.handle);
        }
        self.retired.push(armed.callback);
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
