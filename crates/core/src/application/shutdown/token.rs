// Shutdown Token

use std::fmt;
use tokio::sync::watch;

/// Phase of the shutdown sequence; only ever moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShutdownPhase {
    Running,
    /// No new inbound requests are admitted
    StopAccepting,
    /// Queue closed, waiting for workers to drain it
    Draining,
    Terminated,
}

impl fmt::Display for ShutdownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShutdownPhase::Running => "RUNNING",
            ShutdownPhase::StopAccepting => "STOP_ACCEPTING",
            ShutdownPhase::Draining => "DRAINING",
            ShutdownPhase::Terminated => "TERMINATED",
        };
        f.write_str(s)
    }
}

/// Shutdown signal observed by adapters (HTTP server, admission handlers)
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<ShutdownPhase>,
}

impl ShutdownToken {
    pub fn phase(&self) -> ShutdownPhase {
        *self.rx.borrow()
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.phase() > ShutdownPhase::Running
    }

    /// Wait until new admissions must stop
    pub async fn wait(&mut self) {
        self.wait_for(ShutdownPhase::StopAccepting).await;
    }

    /// Wait until the sequence reaches at least `phase`
    ///
    /// Also returns if the sender is dropped.
    pub async fn wait_for(&mut self, phase: ShutdownPhase) {
        let _ = self.rx.wait_for(|current| *current >= phase).await;
    }
}

/// Shutdown sender, owned by the coordinator
pub struct ShutdownSender {
    tx: watch::Sender<ShutdownPhase>,
}

impl ShutdownSender {
    /// Move to `phase`; moving backwards is ignored
    pub fn advance(&self, phase: ShutdownPhase) {
        self.tx.send_if_modified(|current| {
            if phase > *current {
                *current = phase;
                true
            } else {
                false
            }
        });
    }

    pub fn phase(&self) -> ShutdownPhase {
        *self.tx.borrow()
    }

    /// Hand out another token
    pub fn token(&self) -> ShutdownToken {
        ShutdownToken {
            rx: self.tx.subscribe(),
        }
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(ShutdownPhase::Running);
    (ShutdownSender { tx }, ShutdownToken { rx })
}
