//! Rendezvous channel-pairs that encode Peano numerals.
//!
//! This is the lowest layer of peano. A numeral is never stored as a value;
//! it is the sequence of synchronizations performed on one channel-pair:
//! - `n` rendezvous on the successor endpoint
//! - followed by exactly one rendezvous on the zero endpoint
//!
//! Both endpoints are zero-capacity channels, so every event is a handshake
//! between the producing process and a consuming process.

pub mod cancel;
pub mod error;
pub mod numeral;
pub mod tally;

pub use cancel::{cancellation, CancelSignal, Canceller};
pub use error::{Endpoint, Result, WireError};
pub use numeral::{numeral, NumeralId, NumeralRx, NumeralTx, Signal, Successors, Token};
pub use tally::{drain, emit};
