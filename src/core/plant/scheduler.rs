//! Single-threaded cooperative task scheduler.
//!
//! All "delays" in the dashboard are deferred continuations: one-shot tasks
//! with a due time, drained by the main loop. At most one periodic job exists
//! at a time; starting a new one cancels the previous via a token generation
//! counter, so duplicate simulation ticks cannot pile up.

use std::time::{Duration, Instant};

/// Identity of one periodic-job registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobToken(u64);

/// Continuations an action handler can schedule for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Emit the shutdown completion notification
    ShutdownComplete,
    /// Bring every machine online and restart the periodic job
    StartAllMachines,
    /// Draw a savings amount and add it to the running total
    ApplyOptimization,
    /// Build the CSV report and deliver it through the sink
    BuildReport,
}

#[derive(Debug)]
struct OneShot {
    due: Instant,
    action: DeferredAction,
}

#[derive(Debug)]
struct PeriodicJob {
    token: JobToken,
    every: Duration,
    next_due: Instant,
}

/// Pending one-shot tasks plus the (at most one) periodic job
#[derive(Debug)]
pub struct TaskQueue {
    pending: Vec<OneShot>,
    periodic: Option<PeriodicJob>,
    last_every: Option<Duration>,
    next_token: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            periodic: None,
            last_every: None,
            next_token: 0,
        }
    }

    /// Schedule a one-shot continuation `delay` after `now`
    pub fn schedule_in(&mut self, now: Instant, delay: Duration, action: DeferredAction) {
        self.pending.push(OneShot {
            due: now + delay,
            action,
        });
    }

    /// Start the periodic job, cancelling any previously running one
    pub fn start_periodic(&mut self, now: Instant, every: Duration) -> JobToken {
        let token = JobToken(self.next_token);
        self.next_token += 1;
        self.last_every = Some(every);
        self.periodic = Some(PeriodicJob {
            token,
            every,
            next_due: now + every,
        });
        token
    }

    /// Cancel the periodic job, returning its token if one was running
    pub fn cancel_periodic(&mut self) -> Option<JobToken> {
        self.periodic.take().map(|job| job.token)
    }

    /// Token of the currently registered periodic job, if any
    pub fn periodic_token(&self) -> Option<JobToken> {
        self.periodic.as_ref().map(|job| job.token)
    }

    /// Interval of the running periodic job, or of the most recently
    /// cancelled one. Lets a restart reuse the configured interval.
    pub fn periodic_interval(&self) -> Option<Duration> {
        self.last_every
    }

    /// Returns true when a periodic tick is due, advancing the next deadline.
    /// Missed intervals collapse into a single tick.
    pub fn poll_periodic(&mut self, now: Instant) -> bool {
        match self.periodic.as_mut() {
            Some(job) if now >= job.next_due => {
                while job.next_due <= now {
                    job.next_due += job.every;
                }
                true
            }
            _ => false,
        }
    }

    /// Remove and return every one-shot task due at `now`, oldest first
    pub fn drain_due(&mut self, now: Instant) -> Vec<DeferredAction> {
        let mut due: Vec<OneShot> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|task| task.due);
        due.into_iter().map(|task| task.action).collect()
    }

    /// Number of one-shot tasks still waiting
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Time until the next one-shot or periodic deadline, if anything is queued
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        let one_shot = self.pending.iter().map(|task| task.due).min();
        let periodic = self.periodic.as_ref().map(|job| job.next_due);

        let next = match (one_shot, periodic) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }?;

        Some(next.saturating_duration_since(now))
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
