//! Virtual clock, one-shot timers and fixed-step pacing
//!
//! The simulation never reads wall-clock time. `Scheduler` keeps its own
//! millisecond clock that only moves when a tick advances it, so timer firing
//! is reproducible. `FixedStep` converts real elapsed time into a whole number
//! of ticks for the driver loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};

/// Handle to a scheduled one-shot timer.
///
/// Handles are never reused by the scheduler that issued them, so a stale
/// handle can always be told apart from the currently armed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a timer asks the game to do when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    SpawnObstacle,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due_ms: u64,
    kind: TimerKind,
}

/// Virtual millisecond clock with cancellable one-shot timers
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer that fires once `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            kind,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Milliseconds until the timer fires (None if not pending)
    pub fn remaining_ms(&self, handle: TimerHandle) -> Option<u64> {
        self.pending
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }

    /// Move the clock forward and return every timer that came due,
    /// ordered by due time then by arming order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<(TimerHandle, TimerKind)> {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
        let now = self.now_ms;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_ms <= now);
        self.pending = rest;

        due.sort_by_key(|t| (t.due_ms, t.handle));
        due.into_iter().map(|t| (t.handle, t.kind)).collect()
    }
}

/// Fixed timestep accumulator for the driver loop
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    max_substeps: u32,
    max_frame: Duration,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(step_ms: u64) -> Self {
        Self::with_limits(step_ms, MAX_SUBSTEPS, MAX_FRAME_MS)
    }

    pub fn with_limits(step_ms: u64, max_substeps: u32, max_frame_ms: u64) -> Self {
        Self {
            step: Duration::from_millis(step_ms.max(1)),
            max_substeps: max_substeps.max(1),
            max_frame: Duration::from_millis(max_frame_ms),
            accumulator: Duration::ZERO,
        }
    }

    /// Feed real elapsed time, get the number of ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(self.max_frame);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Backlog beyond the substep cap is dropped, not replayed later
        if self.accumulator >= self.step {
            let step_nanos = self.step.as_nanos();
            let rem = self.accumulator.as_nanos() % step_nanos;
            self.accumulator = Duration::from_nanos(rem as u64);
        }

        steps
    }

    /// Time left before the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}
