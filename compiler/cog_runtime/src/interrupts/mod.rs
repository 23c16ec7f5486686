//! Interrupt table, pending queue, and timers.
//!
//! Raised interrupts wait in a FIFO queue until the worker drains it at
//! the start of a tick. The queue holds only ids and arguments; the
//! handler is looked up when the interrupt is taken, so removing a
//! handler also drops any of its queued interrupts. Timers are one-shot
//! interrupts with negative ids whose handlers are unregistered as they
//! fire.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use cog_eval::{Closure, Value};
use rustc_hash::FxHashMap;
use tracing::trace;

/// An interrupt taken off the queue, ready to run.
#[derive(Debug)]
pub struct Fired {
    pub id: i64,
    pub handler: Arc<Closure>,
    pub args: Vec<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Timer {
    id: i64,
    due: Duration,
}

#[derive(Debug)]
pub struct Interrupts {
    handlers: FxHashMap<i64, Arc<Closure>>,
    pending: VecDeque<(i64, Vec<Value>)>,
    timers: Vec<Timer>,
    next_timer: i64,
    enabled: bool,
    in_handler: bool,
}

impl Interrupts {
    pub fn new() -> Self {
        Interrupts {
            handlers: FxHashMap::default(),
            pending: VecDeque::new(),
            timers: Vec::new(),
            next_timer: -1,
            enabled: true,
            in_handler: false,
        }
    }

    /// Install `handler` for `id`, replacing any previous one.
    pub fn register(&mut self, id: i64, handler: Arc<Closure>) {
        self.handlers.insert(id, handler);
    }

    /// Remove the handler for `id`. Queued interrupts for it will be
    /// skipped. Returns whether a handler was installed.
    pub fn remove(&mut self, id: i64) -> bool {
        self.timers.retain(|t| t.id != id);
        self.handlers.remove(&id).is_some()
    }

    pub fn is_registered(&self, id: i64) -> bool {
        self.handlers.contains_key(&id)
    }

    pub fn raise(&mut self, id: i64, args: Vec<Value>) {
        trace!(id, queued = self.pending.len(), "interrupt raised");
        self.pending.push_back((id, args));
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Schedule `handler` to run once `delay` after `now`. Returns the
    /// timer's id, always negative.
    pub fn set_timeout(&mut self, handler: Arc<Closure>, now: Duration, delay: Duration) -> i64 {
        let id = self.next_timer;
        self.next_timer = self.next_timer.checked_sub(1).unwrap_or(-1);
        self.handlers.insert(id, handler);
        self.timers.push(Timer {
            id,
            due: now.saturating_add(delay),
        });
        id
    }

    /// Cancel a timer that has not fired yet.
    pub fn clear_timeout(&mut self, id: i64) -> bool {
        id < 0 && self.remove(id)
    }

    /// Queue every timer due at `now`, earliest first.
    pub fn fire_due(&mut self, now: Duration) {
        let mut due: Vec<Timer> = Vec::new();
        self.timers.retain(|t| {
            if t.due <= now {
                due.push(*t);
                false
            } else {
                true
            }
        });
        // Equal deadlines keep creation order; ids count down.
        due.sort_by_key(|t| (t.due, std::cmp::Reverse(t.id)));
        for timer in due {
            self.raise(timer.id, Vec::new());
        }
    }

    /// Take the next interrupt that can run now, or `None` when the gate
    /// is closed, a handler is already running, or nothing is queued.
    /// Marks a handler as running until [`Interrupts::finish`].
    pub fn take_next(&mut self) -> Option<Fired> {
        if !self.enabled || self.in_handler {
            return None;
        }
        while let Some((id, args)) = self.pending.pop_front() {
            let handler = if id < 0 {
                self.handlers.remove(&id)
            } else {
                self.handlers.get(&id).cloned()
            };
            match handler {
                Some(handler) => {
                    self.in_handler = true;
                    return Some(Fired { id, handler, args });
                }
                None => trace!(id, "no handler; interrupt dropped"),
            }
        }
        None
    }

    /// Mark the running handler as done.
    pub fn finish(&mut self) {
        self.in_handler = false;
    }

    pub fn in_handler(&self) -> bool {
        self.in_handler
    }

    /// Drop every handler, timer, and queued interrupt.
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.pending.clear();
        self.timers.clear();
    }
}

impl Default for Interrupts {
    fn default() -> Self {
        Interrupts::new()
    }
}

#[cfg(test)]
mod tests;
