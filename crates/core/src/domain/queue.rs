// Queue Domain Model

use std::fmt;
use std::time::Duration;

/// Lifecycle of the job queue.
///
/// `Open -> Draining` happens on an explicit close; `Draining -> Closed`
/// happens on its own once the last buffered job has been handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Accepting pushes and pops
    Open,
    /// Closed to pushes, still handing out buffered jobs
    Draining,
    /// Closed and empty (terminal)
    Closed,
}

impl QueueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueState::Open => "OPEN",
            QueueState::Draining => "DRAINING",
            QueueState::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a producer does when the queue is at capacity.
///
/// There is deliberately no variant for waiting forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushPolicy {
    /// Fail with `QueueFull` immediately
    #[default]
    Reject,
    /// Wait up to the given duration for space, then fail with `QueueFull`
    Wait(Duration),
}

impl PushPolicy {
    /// Build a policy from a wait budget; zero means reject immediately
    pub fn from_wait(wait: Duration) -> Self {
        if wait.is_zero() {
            PushPolicy::Reject
        } else {
            PushPolicy::Wait(wait)
        }
    }
}

/// Point-in-time view of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub len: usize,
    pub capacity: usize,
    /// Largest length ever observed; never exceeds `capacity`
    pub high_water: usize,
    pub state: QueueState,
}
