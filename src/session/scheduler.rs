//! Cancellable deferred tasks on a virtual clock.
//!
//! The host reports elapsed time; the scheduler never sleeps. Tasks come
//! out one at a time in due order, so running one task may cancel or
//! schedule others before the next is popped.
//!
//! ```
//! use arcana_match::session::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! let flip_back = scheduler.schedule(1000, "flip back");
//! scheduler.schedule(500, "announce");
//!
//! assert_eq!(scheduler.pop_due(2000).map(|(_, t)| t), Some("announce"));
//! assert!(scheduler.cancel(flip_back));
//! assert_eq!(scheduler.pop_due(2000), None);
//! ```

use rustc_hash::FxHashMap;

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    due_ms: u64,
    /// Period for repeating tasks.
    every_ms: Option<u64>,
    task: T,
}

/// Deferred task queue.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_handle: u64,
    entries: FxHashMap<TaskHandle, Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_handle: 0,
            entries: FxHashMap::default(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        self.insert(delay_ms, None, task)
    }

    /// Run `task` every `interval_ms`, first after one interval.
    ///
    /// A zero interval is treated as 1ms.
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: T) -> TaskHandle {
        let interval_ms = interval_ms.max(1);
        self.insert(interval_ms, Some(interval_ms), task)
    }

    fn insert(&mut self, delay_ms: u64, every_ms: Option<u64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(
            handle,
            Entry {
                due_ms: self.now_ms.saturating_add(delay_ms),
                every_ms,
                task,
            },
        );
        handle
    }

    /// Cancel a task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    /// Cancel every pending task.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.entries.values().map(|e| e.due_ms).min()
    }

    /// Pop the earliest task due at or before `deadline_ms`.
    ///
    /// The clock moves to the task's due time. Ties run in scheduling
    /// order. Repeating tasks are re-armed one period later under the same
    /// handle.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<(TaskHandle, T)> {
        let (handle, due_ms, every_ms) = self
            .entries
            .iter()
            .filter(|(_, e)| e.due_ms <= deadline_ms)
            .min_by_key(|(h, e)| (e.due_ms, **h))
            .map(|(h, e)| (*h, e.due_ms, e.every_ms))?;

        self.now_ms = self.now_ms.max(due_ms);

        let task = match every_ms {
            Some(every) => {
                let entry = self.entries.get_mut(&handle)?;
                entry.due_ms = due_ms.saturating_add(every);
                entry.task.clone()
            }
            None => self.entries.remove(&handle)?.task,
        };
        Some((handle, task))
    }

    /// Move the clock forward to `deadline_ms` without running anything.
    pub fn settle(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, deadline: u64) -> Vec<&'static str> {
        let mut out = Vec::new();
        while let Some((_, task)) = s.pop_due(deadline) {
            out.push(task);
        }
        s.settle(deadline);
        out
    }

    #[test]
    fn test_runs_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(300, "c");
        s.schedule(100, "a");
        s.schedule(200, "b");

        assert_eq!(drain(&mut s, 250), vec!["a", "b"]);
        assert_eq!(s.now_ms(), 250);
        assert_eq!(drain(&mut s, 300), vec!["c"]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_ties_run_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(100, "first");
        s.schedule(100, "second");
        assert_eq!(drain(&mut s, 100), vec!["first", "second"]);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let h = s.schedule(100, "x");
        assert!(s.is_pending(h));
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(drain(&mut s, 1000).is_empty());
    }

    #[test]
    fn test_repeating() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeating(100, "tick");

        assert_eq!(drain(&mut s, 350), vec!["tick", "tick", "tick"]);
        assert!(s.is_pending(h));
        assert_eq!(s.next_due(), Some(400));

        s.cancel(h);
        assert!(drain(&mut s, 1000).is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.settle(1000);
        s.schedule(50, "later");
        assert!(drain(&mut s, 1049).is_empty());
        assert_eq!(drain(&mut s, 1050), vec!["later"]);
    }

    #[test]
    fn test_clock_moves_to_due_time() {
        let mut s = Scheduler::new();
        s.schedule(100, "a");
        s.schedule(400, "b");

        let (_, task) = s.pop_due(1000).unwrap();
        assert_eq!(task, "a");
        assert_eq!(s.now_ms(), 100);

        // Scheduled from inside a task: relative to that task's due time
        s.schedule(100, "c");
        assert_eq!(drain(&mut s, 1000), vec!["c", "b"]);
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        s.schedule(1, "a");
        s.schedule_repeating(1, "b");
        assert_eq!(s.len(), 2);
        s.cancel_all();
        assert!(s.is_empty());
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let mut s = Scheduler::new();
        s.schedule_repeating(0, "spin");
        assert_eq!(drain(&mut s, 3).len(), 3);
    }
}
