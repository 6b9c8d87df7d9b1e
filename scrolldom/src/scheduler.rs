use std::time::{Duration, Instant};

/// Cancellation token for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    handle: TimerHandle,
    deadline: Instant,
    period: Option<Duration>,
    task: T,
}

/// Single-threaded timer queue. All deferred work in the crate (debounces,
/// button repeat, wheel fallback, auto-hide) lives here, keyed by handle, so
/// teardown can cancel deterministically instead of racing callbacks.
///
/// Time is always passed in explicitly; the scheduler never reads the clock.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Schedule a one-shot task `delay` from `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TimerHandle {
        self.insert(now + delay, None, task)
    }

    /// Schedule a task that first fires `delay` from `now`, then re-arms
    /// every `period` until cancelled.
    pub fn schedule_repeating(
        &mut self,
        now: Instant,
        delay: Duration,
        period: Duration,
        task: T,
    ) -> TimerHandle {
        self.insert(now + delay, Some(period), task)
    }

    fn insert(&mut self, deadline: Instant, period: Option<Duration>, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            deadline,
            period,
            task,
        });
        handle
    }

    /// Remove a pending task. Returns false if the handle already fired or
    /// was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest pending deadline, for sizing poll timeouts.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Scheduler<T> {
    /// Collect every task due at `now`, in deadline order. Repeating entries
    /// re-arm one period from `now`; one-shot entries are consumed.
    pub fn fire_due(&mut self, now: Instant) -> Vec<(TimerHandle, T)> {
        let mut due: Vec<(Instant, TimerHandle, T)> = Vec::new();

        self.entries.retain_mut(|entry| {
            if entry.deadline > now {
                return true;
            }
            due.push((entry.deadline, entry.handle, entry.task.clone()));
            match entry.period {
                Some(period) => {
                    entry.deadline = now + period;
                    true
                }
                None => false,
            }
        });

        due.sort_by_key(|(deadline, handle, _)| (*deadline, handle.0));
        due.into_iter()
            .map(|(_, handle, task)| (handle, task))
            .collect()
    }
}

/// Trailing debounce over the scheduler: every kick cancels the pending
/// task and re-arms it, so the task fires once the burst settles.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn kick<T>(&mut self, scheduler: &mut Scheduler<T>, now: Instant, task: T) {
        if let Some(handle) = self.pending.take() {
            let _ = scheduler.cancel(handle);
        }
        self.pending = Some(scheduler.schedule(now, self.delay, task));
    }

    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) {
        if let Some(handle) = self.pending.take() {
            let _ = scheduler.cancel(handle);
        }
    }

    /// Acknowledge a fired handle. Returns true only when it is the pending
    /// one, so stale fires from a superseded schedule are ignored.
    pub fn acknowledge(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
