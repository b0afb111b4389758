//! Periodic timer seam.

use std::time::Duration;

use crate::error::{Result, SimError};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Handle to a scheduled repeating tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// A source of repeating ticks.
///
/// The engine only schedules and cancels; whoever owns the timer is
/// responsible for calling back into the engine when a tick fires.
pub trait Timer {
    /// Schedule a tick every `period`.
    fn schedule(&mut self, period: Duration) -> Result<TimerHandle>;

    /// Cancel a schedule. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    handle: TimerHandle,
    period: Duration,
    /// Time accumulated since the last firing
    pending: Duration,
}

/// A timer driven by explicitly advancing time.
///
/// Holds at most one schedule; scheduling again replaces it. Used by tests
/// and by the scenario runner, where `wait 120ms` must fire exactly two ticks
/// at a 50 ms period without sleeping.
#[derive(Debug, Default)]
pub struct ManualTimer {
    active: Option<Schedule>,
    next_handle: u32,
    /// Total number of schedules ever created
    created: usize,
}

impl ManualTimer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a schedule is live.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Period of the live schedule.
    pub fn period(&self) -> Option<Duration> {
        self.active.map(|s| s.period)
    }

    /// How many schedules have been created over the timer's lifetime.
    pub fn schedules_created(&self) -> usize {
        self.created
    }

    /// Advance time and return how many ticks fell due.
    ///
    /// Leftover time carries over to the next call. The count saturates at
    /// `u64::MAX`.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let Some(schedule) = self.active.as_mut() else {
            return 0;
        };

        let total = schedule.pending.saturating_add(elapsed).as_nanos();
        let period = schedule.period.as_nanos();
        let rest = total % period;
        schedule.pending = Duration::new(
            (rest / NANOS_PER_SEC) as u64,
            (rest % NANOS_PER_SEC) as u32,
        );
        u64::try_from(total / period).unwrap_or(u64::MAX)
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, period: Duration) -> Result<TimerHandle> {
        if period.is_zero() {
            return Err(SimError::timer("tick period must be non-zero"));
        }
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.active = Some(Schedule {
            handle,
            period,
            pending: Duration::ZERO,
        });
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.active.map(|s| s.handle) == Some(handle) {
            self.active = None;
        }
    }
}
