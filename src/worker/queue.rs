//! In-process delayed job queue.
//!
//! Jobs are ordered by their scheduled time and de-duplicated by value: a
//! job equal to one already waiting is not added again, which keeps a slow
//! cycle from piling up behind itself. Dispatchers skip jobs whose
//! exclusion key is currently running.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::model::worker::WorkerJob;

struct QueueEntry {
    scheduled_at: DateTime<Utc>,
    seq: u64,
    job: WorkerJob,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.scheduled_at == other.scheduled_at && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Reversed so the BinaryHeap pops the earliest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .scheduled_at
            .cmp(&self.scheduled_at)
            .then(other.seq.cmp(&self.seq))
    }
}

struct QueueState {
    heap: BinaryHeap<QueueEntry>,
    waiting: HashSet<WorkerJob>,
    seq: u64,
}

#[derive(Clone)]
pub struct WorkerQueue {
    inner: Arc<Mutex<QueueState>>,
}

impl Default for WorkerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueueState {
                heap: BinaryHeap::new(),
                waiting: HashSet::new(),
                seq: 0,
            })),
        }
    }

    /// Queue a job to run as soon as possible.
    ///
    /// Returns false when an equal job is already waiting.
    pub fn push(&self, job: WorkerJob) -> bool {
        self.schedule(job, Utc::now())
    }

    /// Queue a job to run at a specific time.
    pub fn schedule(&self, job: WorkerJob, scheduled_at: DateTime<Utc>) -> bool {
        let mut state = self.inner.lock().expect("worker queue lock poisoned");
        if state.waiting.contains(&job) {
            return false;
        }
        state.waiting.insert(job.clone());
        state.seq += 1;
        let seq = state.seq;
        state.heap.push(QueueEntry {
            scheduled_at,
            seq,
            job,
        });
        true
    }

    /// Pop the earliest due job whose exclusion key is not busy.
    ///
    /// Due jobs that are blocked on a busy key stay queued and are retried
    /// on the next poll.
    pub fn pop_ready(&self, busy: &HashSet<String>) -> Option<WorkerJob> {
        let mut state = self.inner.lock().expect("worker queue lock poisoned");
        let now = Utc::now();

        let mut blocked: Vec<QueueEntry> = Vec::new();
        let mut picked: Option<WorkerJob> = None;

        while let Some(entry) = state.heap.peek() {
            if entry.scheduled_at > now {
                break;
            }
            let entry = state.heap.pop().expect("peeked entry exists");
            if busy.contains(&entry.job.exclusion_key()) {
                blocked.push(entry);
                continue;
            }
            state.waiting.remove(&entry.job);
            picked = Some(entry.job);
            break;
        }

        for entry in blocked {
            state.heap.push(entry);
        }
        picked
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("worker queue lock poisoned").heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_push_deduplicates_waiting_jobs() {
        let queue = WorkerQueue::new();
        assert!(queue.push(WorkerJob::UpdateStructures { owner_id: 1 }));
        assert!(!queue.push(WorkerJob::UpdateStructures { owner_id: 1 }));
        assert!(queue.push(WorkerJob::UpdateStructures { owner_id: 2 }));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_pop_ready_returns_earliest_due_job() {
        let queue = WorkerQueue::new();
        let now = Utc::now();
        queue.schedule(WorkerJob::UpdateStructures { owner_id: 2 }, now - Duration::seconds(1));
        queue.schedule(WorkerJob::UpdateStructures { owner_id: 1 }, now - Duration::seconds(5));

        let busy = HashSet::new();
        assert_eq!(
            queue.pop_ready(&busy),
            Some(WorkerJob::UpdateStructures { owner_id: 1 })
        );
        assert_eq!(
            queue.pop_ready(&busy),
            Some(WorkerJob::UpdateStructures { owner_id: 2 })
        );
        assert_eq!(queue.pop_ready(&busy), None);
    }

    #[test]
    fn test_future_jobs_are_not_popped() {
        let queue = WorkerQueue::new();
        queue.schedule(
            WorkerJob::CheckFuelAlerts,
            Utc::now() + Duration::minutes(5),
        );
        assert_eq!(queue.pop_ready(&HashSet::new()), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_busy_exclusion_key_blocks_job() {
        let queue = WorkerQueue::new();
        queue.push(WorkerJob::UpdateStructures { owner_id: 1 });
        queue.push(WorkerJob::FetchNotifications { owner_id: 1 });

        let mut busy = HashSet::new();
        busy.insert("structures:1".to_string());

        // The structures job is blocked, the notifications job is not.
        assert_eq!(
            queue.pop_ready(&busy),
            Some(WorkerJob::FetchNotifications { owner_id: 1 })
        );
        assert_eq!(queue.pop_ready(&busy), None);
        assert_eq!(queue.len(), 1);

        busy.clear();
        assert_eq!(
            queue.pop_ready(&busy),
            Some(WorkerJob::UpdateStructures { owner_id: 1 })
        );
    }

    #[test]
    fn test_job_can_requeue_after_pop() {
        let queue = WorkerQueue::new();
        let job = WorkerJob::CheckServiceStatus;
        assert!(queue.push(job.clone()));
        assert_eq!(queue.pop_ready(&HashSet::new()), Some(job.clone()));
        // Once popped, the same job may be queued again.
        assert!(queue.push(job));
    }
}
