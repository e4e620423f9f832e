//! Cancellation for processes that race on shared numerals.
//!
//! A [`Canceller`] owns the only sender of a zero-capacity channel that is
//! never written to. Dropping it disconnects the channel, which every
//! [`CancelSignal`] observes as ready at its next blocking point.

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::debug;

/// Create a linked canceller and signal.
pub fn cancellation() -> (Canceller, CancelSignal) {
    let (tx, rx) = bounded(0);
    (Canceller { _tx: tx }, CancelSignal { rx })
}

/// Cancels every linked [`CancelSignal`] when cancelled or dropped.
#[derive(Debug)]
pub struct Canceller {
    _tx: Sender<()>,
}

impl Canceller {
    /// Cancel explicitly.
    pub fn cancel(self) {
        debug!("cancellation requested");
    }
}

/// Observer side of a cancellation, passed to
/// [`NumeralRx::next_or_cancel`](crate::NumeralRx::next_or_cancel).
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: Receiver<()>,
}

impl CancelSignal {
    pub(crate) fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}
