use std::time::Instant;

use crate::session::screen::Screen;

/// Deferred work scheduled by a session. Every task carries enough context
/// for the handler to check it still applies; a task that fires after the
/// session has moved on is dropped without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// End the feedback window for classify item `item` and move to the next.
    ClearFeedback { item: usize },
    /// Leave a quiz screen after its feedback has been shown.
    QuizAdvance { from: Screen },
    /// Produce the simulated model's output for one prediction trial.
    RevealPrediction { stage: usize, item: usize },
    /// One increment of a simulated training run.
    TrainingTick { stage: usize },
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due: Instant,
    task: Task,
}

/// Pending timers owned by a session. Dropping the session drops the queue,
/// so a timer can never outlive (or mutate) a disposed session.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<Scheduled>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, task: Task) {
        self.tasks.push(Scheduled { due, task });
    }

    /// Remove and return every task due at `now`, in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Vec<Task> {
        let mut due = Vec::new();
        self.tasks.retain(|s| {
            if s.due <= now {
                due.push(s.task);
                false
            } else {
                true
            }
        });
        due
    }

    #[allow(dead_code)] // Used by tests
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn pop_due_returns_only_elapsed_tasks() {
        let t0 = Instant::now();
        let mut queue = TaskQueue::new();
        queue.schedule(t0 + Duration::from_millis(100), Task::ClearFeedback { item: 0 });
        queue.schedule(t0 + Duration::from_millis(500), Task::TrainingTick { stage: 1 });

        assert!(queue.pop_due(t0).is_empty());
        let fired = queue.pop_due(t0 + Duration::from_millis(200));
        assert_eq!(fired, vec![Task::ClearFeedback { item: 0 }]);
        assert!(!queue.is_empty());

        let fired = queue.pop_due(t0 + Duration::from_secs(1));
        assert_eq!(fired, vec![Task::TrainingTick { stage: 1 }]);
        assert!(queue.is_empty());
    }

    #[test]
    fn pop_due_preserves_scheduling_order() {
        let t0 = Instant::now();
        let mut queue = TaskQueue::new();
        queue.schedule(t0 + Duration::from_millis(10), Task::ClearFeedback { item: 0 });
        queue.schedule(t0 + Duration::from_millis(10), Task::ClearFeedback { item: 1 });

        let fired = queue.pop_due(t0 + Duration::from_millis(20));
        assert_eq!(
            fired,
            vec![
                Task::ClearFeedback { item: 0 },
                Task::ClearFeedback { item: 1 }
            ]
        );
    }
}
