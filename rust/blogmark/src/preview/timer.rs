//! Cancellable delayed tasks.
//!
//! The hover controller never touches `setTimeout` directly; it schedules
//! `TimerTask`s through a `Scheduler`. `ManualClock` is the simulated clock
//! used by tests and by headless drivers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Delayed actions of the hover state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    /// Debounce elapsed: show the panel
    Reveal,
    /// Grace period elapsed: forget the active link
    ReleaseActive,
}

pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, task: TimerTask) -> TimerHandle;
    /// Cancelling an unknown or already fired handle is a no-op
    fn cancel(&mut self, handle: TimerHandle);
    /// Called once a fired task has been handled
    fn complete(&mut self, _handle: TimerHandle) {}
}

// =============================================================================
// ManualClock
// =============================================================================

#[derive(Debug, Clone)]
struct Pending {
    due_ms: u64,
    handle: TimerHandle,
    task: TimerTask,
}

/// Simulated clock; time only moves on `advance`
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now_ms: u64,
    next_id: u32,
    queue: Vec<Pending>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move time forward and return the tasks that came due, earliest first
    pub fn advance(&mut self, ms: u64) -> Vec<(TimerHandle, TimerTask)> {
        self.now_ms += ms;
        let now = self.now_ms;

        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.queue.drain(..).partition(|p| p.due_ms <= now);
        self.queue = rest;

        due.sort_by_key(|p| (p.due_ms, p.handle));
        due.into_iter().map(|p| (p.handle, p.task)).collect()
    }
}

impl Scheduler for ManualClock {
    fn schedule(&mut self, delay_ms: u32, task: TimerTask) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.queue.push(Pending {
            due_ms: self.now_ms + u64::from(delay_ms),
            handle,
            task,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.retain(|p| p.handle != handle);
    }
}
