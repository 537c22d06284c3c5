//! Exactly-once shutdown signalling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tokio::sync::oneshot;

/// One-shot gate in front of the server's graceful-shutdown channel.
///
/// Any number of requests may observe the completed session concurrently;
/// `fire` lets exactly one of them deliver the shutdown signal.
#[derive(Debug)]
pub struct ShutdownGate {
    fired: AtomicBool,
    tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl ShutdownGate {
    /// Create the gate and the receiver the server waits on.
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                fired: AtomicBool::new(false),
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Fire the gate. Returns `true` for the single caller that won the
    /// transition; every later or concurrent caller is a no-op.
    pub fn fire(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        if let Some(tx) = self.tx.lock().unwrap().take() {
            // The receiver is gone once the server is already draining;
            // nothing left to signal then.
            let _ = tx.send(());
        }
        true
    }

    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
