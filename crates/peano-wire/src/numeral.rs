//! Numeral channel-pairs.
//!
//! [`numeral`] allocates one channel-pair and splits it into a producer half
//! and a consumer half. The producer half is linear: firing the zero signal
//! consumes it, so nothing can be synchronized on the pair afterwards.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{bounded, select, Receiver, Sender};
use tracing::trace;

use crate::cancel::CancelSignal;
use crate::error::{Endpoint, Result, WireError};

static NEXT_NUMERAL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a channel-pair, used only in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumeralId(u64);

impl NumeralId {
    fn next() -> Self {
        Self(NEXT_NUMERAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NumeralId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque synchronization token.
///
/// The rendezvous itself is the unit; the token carries nothing. Protocols
/// that relay a unit hand the token they received to the next rendezvous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Token(());

impl Token {
    pub fn new() -> Self {
        Self(())
    }
}

/// One event observed on a channel-pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// One unit of magnitude.
    Successor(Token),
    /// End of the numeral.
    Zero(Token),
}

impl Signal {
    /// Which endpoint the event was observed on.
    pub fn endpoint(self) -> Endpoint {
        match self {
            Signal::Successor(_) => Endpoint::Successor,
            Signal::Zero(_) => Endpoint::Zero,
        }
    }
}

/// Allocate a fresh channel-pair.
///
/// Both endpoints are zero-capacity: a fire blocks until a consumer takes it.
pub fn numeral() -> (NumeralTx, NumeralRx) {
    let id = NumeralId::next();
    let (successor_tx, successor_rx) = bounded(0);
    let (zero_tx, zero_rx) = bounded(0);
    trace!(numeral = %id, "channel-pair allocated");

    (
        NumeralTx {
            id,
            successor: successor_tx,
            zero: zero_tx,
            fired: 0,
        },
        NumeralRx {
            id,
            successor: successor_rx,
            zero: zero_rx,
        },
    )
}

/// Producer half of a channel-pair.
pub struct NumeralTx {
    id: NumeralId,
    successor: Sender<Token>,
    zero: Sender<Token>,
    // Diagnostics only.
    fired: u64,
}

impl NumeralTx {
    /// Identifier of the underlying channel-pair.
    pub fn id(&self) -> NumeralId {
        self.id
    }

    /// Fire one successor (blocking until a consumer takes it).
    pub fn successor(&mut self, token: Token) -> Result<()> {
        self.successor
            .send(token)
            .map_err(|_| disconnected(self.id, Endpoint::Successor))?;
        self.fired = self.fired.saturating_add(1);
        Ok(())
    }

    /// Fire the zero signal, ending the numeral.
    pub fn zero(self, token: Token) -> Result<()> {
        self.zero
            .send(token)
            .map_err(|_| disconnected(self.id, Endpoint::Zero))?;
        trace!(numeral = %self.id, successors = self.fired, "numeral terminated");
        Ok(())
    }

    /// Successor-only view of this pair.
    ///
    /// A view can fire units but never the zero signal, so whoever holds the
    /// `NumeralTx` stays responsible for terminating the numeral.
    pub fn successors(&self) -> Successors {
        Successors {
            id: self.id,
            successor: self.successor.clone(),
        }
    }
}

impl fmt::Debug for NumeralTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumeralTx")
            .field("id", &self.id)
            .field("fired", &self.fired)
            .finish()
    }
}

/// Cloneable handle that can only fire successors onto a channel-pair.
#[derive(Clone)]
pub struct Successors {
    id: NumeralId,
    successor: Sender<Token>,
}

impl Successors {
    /// Identifier of the underlying channel-pair.
    pub fn id(&self) -> NumeralId {
        self.id
    }

    /// Fire one successor (blocking until a consumer takes it).
    pub fn fire(&self, token: Token) -> Result<()> {
        self.successor
            .send(token)
            .map_err(|_| disconnected(self.id, Endpoint::Successor))
    }
}

impl fmt::Debug for Successors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Successors").field("id", &self.id).finish()
    }
}

/// Consumer half of a channel-pair.
pub struct NumeralRx {
    id: NumeralId,
    successor: Receiver<Token>,
    zero: Receiver<Token>,
}

impl NumeralRx {
    /// Identifier of the underlying channel-pair.
    pub fn id(&self) -> NumeralId {
        self.id
    }

    /// Wait for the next event on either endpoint.
    ///
    /// The choice between ready endpoints is made by `select!`, never by
    /// polling one endpoint before the other.
    pub fn next(&self) -> Result<Signal> {
        select! {
            recv(self.successor) -> msg => msg
                .map(Signal::Successor)
                .map_err(|_| disconnected(self.id, Endpoint::Successor)),
            recv(self.zero) -> msg => msg
                .map(Signal::Zero)
                .map_err(|_| disconnected(self.id, Endpoint::Zero)),
        }
    }

    /// Like [`NumeralRx::next`], but gives up with `Ok(None)` once `cancel`
    /// has been signalled.
    pub fn next_or_cancel(&self, cancel: &CancelSignal) -> Result<Option<Signal>> {
        select! {
            recv(self.successor) -> msg => msg
                .map(|token| Some(Signal::Successor(token)))
                .map_err(|_| disconnected(self.id, Endpoint::Successor)),
            recv(self.zero) -> msg => msg
                .map(|token| Some(Signal::Zero(token)))
                .map_err(|_| disconnected(self.id, Endpoint::Zero)),
            recv(cancel.receiver()) -> _ => Ok(None),
        }
    }

    /// Attach another consumer to the same channel-pair.
    ///
    /// Consumers compete: each event is observed by exactly one of them.
    pub fn share(&self) -> NumeralRx {
        NumeralRx {
            id: self.id,
            successor: self.successor.clone(),
            zero: self.zero.clone(),
        }
    }
}

impl fmt::Debug for NumeralRx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumeralRx").field("id", &self.id).finish()
    }
}

fn disconnected(numeral: NumeralId, endpoint: Endpoint) -> WireError {
    WireError::Disconnected { numeral, endpoint }
}
