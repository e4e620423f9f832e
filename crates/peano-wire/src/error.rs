use std::fmt;

use crate::numeral::NumeralId;

/// One of the two synchronization endpoints of a channel-pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Counts magnitude, one rendezvous per unit.
    Successor,
    /// Terminates the numeral, exactly one rendezvous.
    Zero,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Successor => f.write_str("successor"),
            Endpoint::Zero => f.write_str("zero"),
        }
    }
}

/// Errors that can occur while synchronizing on a channel-pair.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Every process on the other side of the rendezvous has gone away.
    #[error("numeral {numeral} disconnected on {endpoint} endpoint")]
    Disconnected {
        numeral: NumeralId,
        endpoint: Endpoint,
    },
}

pub type Result<T> = std::result::Result<T, WireError>;
