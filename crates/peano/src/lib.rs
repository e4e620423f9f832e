//! Peano arithmetic computed by networks of rendezvous processes.
//!
//! A number is never stored: `n` is a process that synchronizes `n` times on
//! a successor channel and once on a zero channel. Arithmetic is a set of
//! protocols between such processes.
//!
//! # Crate Structure
//!
//! - [`wire`]: Numeral channel-pairs, producer and tally
//! - [`proto`]: Process spawner and the arithmetic protocols
//! - [`eval`]: Wire operands, one protocol, and drains into a result

pub mod eval;

/// Re-export wire types.
pub mod wire {
    pub use peano_wire::*;
}

/// Re-export protocol types.
pub mod proto {
    pub use peano_proto::*;
}
