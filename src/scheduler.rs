//! Deferred one-shot task scheduler.
//!
//! The controller is single-threaded and tick-driven; the only
//! concurrency-like behaviour it needs is "run this at tick time ≥ T"
//! (the optional grace-delay detector clear).  Tasks live in a fixed
//! slot array and fire through a [`TaskDelegate`] callback, keeping the
//! scheduler decoupled from the components it services and independently
//! testable.  A full controller reset cancels every pending task.

use log::info;

/// Maximum number of concurrently pending tasks (stack-allocated).
const MAX_TASKS: usize = 4;

/// What a due task should do.  The delegate interprets the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Clear the flash detector back to IDLE (post-double-flash grace).
    ClearDetector,
}

/// A single pending one-shot task.
#[derive(Debug, Clone, Copy)]
pub struct DeferredTask {
    /// Human-readable label for logging.
    pub label: &'static str,
    /// Absolute due time (ms, same clock as the tick loop).
    pub due_ms: u64,
    pub kind: TaskKind,
}

/// Callback trait invoked when a task comes due.
pub trait TaskDelegate {
    fn on_task_due(&mut self, label: &'static str, kind: TaskKind);
}

/// The scheduler engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredScheduler {
    slots: [Option<DeferredTask>; MAX_TASKS],
}

impl DeferredScheduler {
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_TASKS],
        }
    }

    /// Queue a task.  Returns the slot index, or `None` if all slots are
    /// occupied (the task is dropped).
    pub fn schedule(&mut self, task: DeferredTask) -> Option<usize> {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                info!("Deferred '{}' due at {}ms (slot {i})", task.label, task.due_ms);
                *slot = Some(task);
                return Some(i);
            }
        }
        None
    }

    /// Fire every task whose due time has arrived.  Call once per tick,
    /// after the detector has processed this tick's edges.
    pub fn tick(&mut self, now: u64, delegate: &mut dyn TaskDelegate) {
        for slot in &mut self.slots {
            let due = matches!(slot, Some(task) if now >= task.due_ms);
            if due {
                if let Some(task) = slot.take() {
                    info!("Deferred '{}' fired at {now}ms", task.label);
                    delegate.on_task_due(task.label, task.kind);
                }
            }
        }
    }

    /// Drop every pending task (controller reset).
    pub fn cancel_all(&mut self) {
        if self.pending() > 0 {
            info!("Cancelling {} pending deferred task(s)", self.pending());
        }
        self.slots = [None; MAX_TASKS];
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingDelegate {
        fires: Vec<(&'static str, TaskKind)>,
    }

    impl RecordingDelegate {
        fn new() -> Self {
            Self { fires: Vec::new() }
        }
    }

    impl TaskDelegate for RecordingDelegate {
        fn on_task_due(&mut self, label: &'static str, kind: TaskKind) {
            self.fires.push((label, kind));
        }
    }

    fn clear_task(due_ms: u64) -> DeferredTask {
        DeferredTask {
            label: "detector-clear",
            due_ms,
            kind: TaskKind::ClearDetector,
        }
    }

    #[test]
    fn fires_at_due_time_not_before() {
        let mut sched = DeferredScheduler::new();
        let mut delegate = RecordingDelegate::new();
        let _ = sched.schedule(clear_task(500));

        sched.tick(499, &mut delegate);
        assert!(delegate.fires.is_empty());

        sched.tick(500, &mut delegate);
        assert_eq!(delegate.fires, vec![("detector-clear", TaskKind::ClearDetector)]);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn fires_only_once() {
        let mut sched = DeferredScheduler::new();
        let mut delegate = RecordingDelegate::new();
        let _ = sched.schedule(clear_task(100));
        for t in [100, 150, 200] {
            sched.tick(t, &mut delegate);
        }
        assert_eq!(delegate.fires.len(), 1);
    }

    #[test]
    fn cancel_all_drops_pending() {
        let mut sched = DeferredScheduler::new();
        let mut delegate = RecordingDelegate::new();
        let _ = sched.schedule(clear_task(100));
        let _ = sched.schedule(clear_task(200));
        assert_eq!(sched.pending(), 2);

        sched.cancel_all();
        assert_eq!(sched.pending(), 0);
        sched.tick(1000, &mut delegate);
        assert!(delegate.fires.is_empty());
    }

    #[test]
    fn full_slots_reject_new_tasks() {
        let mut sched = DeferredScheduler::new();
        for i in 0..4 {
            assert_eq!(sched.schedule(clear_task(100 + i)), Some(i as usize));
        }
        assert_eq!(sched.schedule(clear_task(999)), None);
    }
}
