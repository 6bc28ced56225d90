//! Logical-clock timers.
//!
//! Everything in the quiz runs on one thread; the only suspension points are
//! timers. The scheduler keeps a virtual clock that the host advances, and
//! hands out a [`TimerHandle`] per scheduled event so the owner can cancel it.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<E> {
    handle: TimerHandle,
    due: Duration,
    event: E,
}

#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `event` to fire `delay` after the current logical time.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            due: self.now + delay,
            event,
        });
        handle
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        before != self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pops the earliest event due at or before `until` and moves the clock to
    /// its deadline. Ties fire in scheduling order.
    ///
    /// Callers loop on this so that events scheduled by a callback still fire
    /// if they fall inside the same window, then call [`Scheduler::settle`].
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.handle.0))
            .map(|(i, _)| i)?;

        let fired = self.pending.remove(position);
        if fired.due > self.now {
            self.now = fired.due;
        }
        Some(fired.event)
    }

    /// Moves the clock to `until` once every due event has been popped.
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}
