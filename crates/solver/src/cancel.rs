//! Cooperative cancellation for the async solver.
//!
//! The search checks its token between candidates only, so a cancelled
//! search never leaves a simulation half-run.
use tokio::sync::watch;

/// Creates a linked handle and token. Cancelling the handle is observed by
/// every clone of the token.
pub fn cancellation() -> (CancelHandle, CancellationToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancellationToken { rx: Some(rx) })
}

/// Owner side of a cancellation pair.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observer side of a cancellation pair.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    rx: Option<watch::Receiver<bool>>,
}

impl CancellationToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self { rx: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }
}
