//! Virtual-time task scheduler.
//!
//! Tasks are queued by deadline and fire when the host advances the clock.
//! Cancelled tasks leave their heap entries behind; those are skipped when
//! they surface.
//!
//! Deadlines saturate at `Duration::MAX`. A repeating task that can no
//! longer move forward is dropped.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Handle for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl TaskId {
    /// Create a new task ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// A task that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle the task was scheduled under.
    pub id: TaskId,
    /// The task payload.
    pub task: T,
    /// Virtual time of the last occurrence in this batch.
    pub at: Duration,
    /// Consecutive occurrences reported at once. Always 1 for one-shot
    /// tasks; a repeating task that fell behind reports every period that
    /// came due before any other task.
    pub count: u64,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    task: T,
    due: Duration,
    period: Option<Duration>,
}

/// Single-threaded scheduler over a virtual clock.
///
/// The clock starts at zero and only moves when [`Scheduler::pop_due`]
/// fires a task or [`Scheduler::advance_to`] is called. Tasks due at the
/// same instant fire in the order they were (re)scheduled.
///
/// ```
/// use memory_match::schedule::Scheduler;
/// use std::time::Duration;
///
/// let mut scheduler = Scheduler::new();
/// let tick = scheduler.schedule_repeating(Duration::from_secs(1), "tick");
/// scheduler.schedule_once(Duration::from_millis(1500), "once");
///
/// let until = Duration::from_secs(2);
/// let mut fired = Vec::new();
/// while let Some(task) = scheduler.pop_due(until) {
///     fired.push(task.task);
/// }
/// scheduler.advance_to(until);
///
/// assert_eq!(fired, vec!["tick", "once", "tick"]);
/// assert!(scheduler.cancel(tick));
/// assert_eq!(scheduler.pending(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: Duration,

    /// (due, sequence, id), min-first.
    queue: BinaryHeap<Reverse<(Duration, u64, TaskId)>>,

    /// Live tasks. Cancelling removes the entry here only.
    live: FxHashMap<TaskId, Entry<T>>,

    next_id: u32,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            queue: BinaryHeap::new(),
            live: FxHashMap::default(),
            next_id: 0,
            next_seq: 0,
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Create a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TaskId {
        self.insert(task, self.now.saturating_add(delay), None)
    }

    /// Run `task` every `period`, first firing one period from now.
    ///
    /// A zero period is bumped to one millisecond so the clock always
    /// makes progress.
    pub fn schedule_repeating(&mut self, period: Duration, task: T) -> TaskId {
        let period = period.max(Duration::from_millis(1));
        self.insert(task, self.now.saturating_add(period), Some(period))
    }

    /// Cancel a task. Returns `false` if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Is the task still waiting to fire?
    #[must_use]
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.live.contains_key(&id)
    }

    /// Number of live tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Deadline of the earliest live task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.live.values().map(|entry| entry.due).min()
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// Moves the clock to the task's deadline. A repeating task is batched
    /// with its following periods up to `until`, stopping short of the next
    /// deadline of any other task, then rescheduled after the batch.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<T>> {
        loop {
            let Reverse((due, _, id)) = *self.queue.peek()?;
            if due > until {
                return None;
            }
            self.queue.pop();

            let Some(entry) = self.live.get(&id) else {
                // Cancelled
                continue;
            };
            if entry.due != due {
                continue;
            }

            let task = entry.task.clone();
            let period = entry.period;

            let Some(period) = period else {
                self.live.remove(&id);
                self.now = self.now.max(due);
                return Some(Fired { id, task, at: due, count: 1 });
            };

            let count = self.batch_len(id, due, period, until);
            let last = due.saturating_add(periods(period, count - 1));
            let next = last.saturating_add(period);
            self.now = self.now.max(last);

            if next > last {
                let seq = self.bump_seq();
                if let Some(entry) = self.live.get_mut(&id) {
                    entry.due = next;
                }
                self.queue.push(Reverse((next, seq, id)));
            } else {
                self.live.remove(&id);
            }

            return Some(Fired { id, task, at: last, count });
        }
    }

    /// Move the clock forward to `until` without firing anything.
    ///
    /// Call after draining [`Scheduler::pop_due`]. The clock never moves
    /// backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, task: T, due: Duration, period: Option<Duration>) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();

        self.live.insert(id, Entry { task, due, period });
        self.queue.push(Reverse((due, seq, id)));
        id
    }

    /// Occurrences of a repeating task starting at `due` that fire before
    /// anything else: at most `until`, strictly before other deadlines.
    fn batch_len(&self, id: TaskId, due: Duration, period: Duration, until: Duration) -> u64 {
        let step = period.as_nanos();
        let mut count = (until - due).as_nanos() / step + 1;
        let other = self
            .live
            .iter()
            .filter(|(other, _)| **other != id)
            .map(|(_, entry)| entry.due)
            .min();
        if let Some(other) = other {
            let before_other = if other > due {
                ((other - due).as_nanos() - 1) / step + 1
            } else {
                1
            };
            count = count.min(before_other);
        }
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

/// `period * n`, saturating at `Duration::MAX`.
pub(crate) fn periods(period: Duration, n: u64) -> Duration {
    let nanos = period.as_nanos().saturating_mul(u128::from(n));
    match u64::try_from(nanos / 1_000_000_000) {
        Ok(secs) => Duration::new(secs, (nanos % 1_000_000_000) as u32),
        Err(_) => Duration::MAX,
    }
}
