//! Arithmetic protocols over numeral channel-pairs.
//!
//! Every protocol is the body of one process: it consumes one or more
//! [`NumeralRx`] inputs, produces onto [`NumeralTx`] outputs, and returns
//! once the numerals involved are exhausted. Protocols that need parallel
//! sub-processes spawn them through a [`Spawner`] and join them before
//! returning.
//!
//! Recursion in the calculus (`Copy(i, j) = iX?.Succ(i, j) + iZ?.jZ!`) is
//! written as one loop per process with the same synchronization per step.

pub mod additive;
pub mod diff;
pub mod dup;
pub mod error;
pub mod multiply;
pub mod process;
pub mod structural;

pub use additive::{add, add_to, sub, subtract};
pub use diff::diff;
pub use dup::{double, dup};
pub use error::{ProtocolError, Result};
pub use multiply::{flush, flush_fire, multiply};
pub use process::{join_all, Process, SpawnConfig, Spawner};
pub use structural::{copy, succ};

pub use peano_wire::{NumeralRx, NumeralTx};

#[cfg(test)]
pub(crate) mod testing {
    use peano_wire::{drain, emit, numeral};

    use super::*;

    /// Spawn a producer for `n` and return its consumer half.
    pub fn source(spawner: &Spawner, n: u64) -> NumeralRx {
        let (tx, rx) = numeral();
        spawner
            .spawn("n", move || emit(n, tx).map_err(Into::into))
            .expect("producer should spawn");
        rx
    }

    /// Run `protocol` as a process writing into a fresh numeral and drain it.
    pub fn sink<F>(spawner: &Spawner, protocol: F) -> u64
    where
        F: FnOnce(NumeralTx) -> Result<()> + Send + 'static,
    {
        let (tx, rx) = numeral();
        let process = spawner
            .spawn("protocol", move || protocol(tx))
            .expect("protocol should spawn");
        let value = drain(rx).expect("output should drain");
        process.join().expect("protocol should succeed");
        value
    }
}
