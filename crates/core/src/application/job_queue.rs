// Job Queue - bounded FIFO buffer shared by every producer and every worker
//
// All synchronization lives here: producers and workers never lock against
// each other directly.

use crate::domain::{EngineConfig, Job, PushPolicy, QueueState, QueueStats};
use crate::error::QueueError;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info};

struct Inner {
    buffer: VecDeque<Job>,
    closed: bool,
    high_water: usize,
}

/// Bounded, ordered, concurrency-safe job buffer.
///
/// Capacity accounting and delivery happen under one lock, so a job is
/// handed to exactly one caller of [`JobQueue::pop`] and the length never
/// exceeds the capacity, whatever the number of concurrent producers.
pub struct JobQueue {
    inner: Mutex<Inner>,
    capacity: usize,
    policy: PushPolicy,
    not_empty: Notify,
    not_full: Notify,
}

impl JobQueue {
    /// Create an open queue
    ///
    /// A zero capacity is clamped to one; use [`EngineConfig::validate`] to
    /// reject it before construction.
    pub fn new(capacity: usize, policy: PushPolicy) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                buffer: VecDeque::with_capacity(capacity),
                closed: false,
                high_water: 0,
            }),
            capacity,
            policy,
            not_empty: Notify::new(),
            not_full: Notify::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.queue_capacity, config.push_policy)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Critical sections never panic midway, so a poisoned buffer is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push using the configured [`PushPolicy`]
    pub async fn push(&self, job: Job) -> Result<(), QueueError> {
        match self.policy {
            PushPolicy::Reject => self.try_push(job),
            PushPolicy::Wait(wait) => self.push_timeout(job, wait).await,
        }
    }

    /// Push without waiting
    ///
    /// # Errors
    /// - QueueError::Closed once `close` has been called
    /// - QueueError::Full if the queue is at capacity
    pub fn try_push(&self, job: Job) -> Result<(), QueueError> {
        self.push_inner(job).map_err(|(err, _)| err)
    }

    /// Push, waiting at most `wait` for space to free up
    ///
    /// Closing the queue while waiting ends the wait with `Closed`.
    pub async fn push_timeout(&self, job: Job, wait: Duration) -> Result<(), QueueError> {
        let deadline = Instant::now() + wait;
        let mut job = job;

        loop {
            // Register interest before looking at the buffer so a pop in between is not missed
            let notified = self.not_full.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.push_inner(job) {
                Ok(()) => return Ok(()),
                Err((QueueError::Closed, _)) => return Err(QueueError::Closed),
                Err((QueueError::Full { .. }, returned)) => job = returned,
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                debug!(
                    capacity = self.capacity,
                    wait_ms = wait.as_millis() as u64,
                    "Push wait elapsed"
                );
                return self.try_push(job);
            }
        }
    }

    fn push_inner(&self, job: Job) -> Result<(), (QueueError, Job)> {
        let depth = {
            let mut inner = self.lock();
            if inner.closed {
                return Err((QueueError::Closed, job));
            }
            if inner.buffer.len() >= self.capacity {
                return Err((
                    QueueError::Full {
                        capacity: self.capacity,
                    },
                    job,
                ));
            }
            inner.buffer.push_back(job);
            let depth = inner.buffer.len();
            inner.high_water = inner.high_water.max(depth);
            depth
        };

        debug!(depth, capacity = self.capacity, "Job pushed");
        self.not_empty.notify_one();
        Ok(())
    }

    /// Take the oldest job, waiting while the queue is empty but not closed
    ///
    /// Returns `None` once the queue is closed and fully drained: the
    /// caller's signal to exit, not an error. Cancel-safe: dropping the
    /// future never loses a job.
    pub async fn pop(&self) -> Option<Job> {
        loop {
            let notified = self.not_empty.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(result) = self.try_pop_inner() {
                return result;
            }

            notified.await;
        }
    }

    /// Take the oldest job without waiting
    ///
    /// `None` means nothing is buffered right now, whatever the state.
    pub fn try_pop(&self) -> Option<Job> {
        self.try_pop_inner().flatten()
    }

    // Some(Some(job)) = delivered, Some(None) = closed and drained, None = wait
    fn try_pop_inner(&self) -> Option<Option<Job>> {
        let (job, depth, closed) = {
            let mut inner = self.lock();
            let job = inner.buffer.pop_front();
            (job, inner.buffer.len(), inner.closed)
        };

        match job {
            Some(job) => {
                debug!(depth, "Job popped");
                self.not_full.notify_one();
                Some(Some(job))
            }
            None if closed => Some(None),
            None => None,
        }
    }

    /// Stop accepting pushes; buffered jobs stay retrievable
    ///
    /// Idempotent. Returns true if this call performed the transition.
    pub fn close(&self) -> bool {
        let remaining = {
            let mut inner = self.lock();
            if inner.closed {
                return false;
            }
            inner.closed = true;
            inner.buffer.len()
        };

        info!(remaining, "Job queue closed, draining buffered jobs");
        self.not_empty.notify_waiters();
        self.not_full.notify_waiters();
        true
    }

    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> QueueState {
        let inner = self.lock();
        Self::state_of(&inner)
    }

    fn state_of(inner: &Inner) -> QueueState {
        match (inner.closed, inner.buffer.is_empty()) {
            (false, _) => QueueState::Open,
            (true, false) => QueueState::Draining,
            (true, true) => QueueState::Closed,
        }
    }

    pub fn stats(&self) -> QueueStats {
        let inner = self.lock();
        QueueStats {
            len: inner.buffer.len(),
            capacity: self.capacity,
            high_water: inner.high_water,
            state: Self::state_of(&inner),
        }
    }
}
