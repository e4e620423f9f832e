//! Producer and tally: the two ends every numeral network is plugged into.

use tracing::trace;

use crate::error::Result;
use crate::numeral::{NumeralRx, NumeralTx, Signal, Token};

/// Emit `n` onto `out`: `n` successors, then zero.
pub fn emit(n: u64, mut out: NumeralTx) -> Result<()> {
    trace!(numeral = %out.id(), n, "emitting numeral");
    for _ in 0..n {
        out.successor(Token::new())?;
    }
    out.zero(Token::new())
}

/// Drain `input` to its zero signal and return the number of successors seen.
pub fn drain(input: NumeralRx) -> Result<u64> {
    let mut count = 0u64;
    loop {
        match input.next()? {
            Signal::Successor(_) => count = count.saturating_add(1),
            Signal::Zero(_) => break,
        }
    }
    trace!(numeral = %input.id(), count, "numeral drained");
    Ok(count)
}
