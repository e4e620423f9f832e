//! `Add`, `AddTo`, `Sub` and `Subtract`.

use peano_wire::{NumeralRx, NumeralTx, Signal, Successors};
use tracing::debug;

use crate::error::{ProtocolError, Result};
use crate::structural::copy;

/// `w = i + j`: relay every successor of `i`, then copy `j`.
pub fn add(i: NumeralRx, j: NumeralRx, mut w: NumeralTx) -> Result<()> {
    loop {
        match i.next()? {
            Signal::Successor(token) => w.successor(token)?,
            Signal::Zero(_) => return copy(j, w),
        }
    }
}

/// Relay every successor of `i` into `w` and stop at `i`'s zero.
///
/// `w` is a successor-only view: the numeral it feeds is terminated by
/// whoever owns its producer half.
pub fn add_to(i: NumeralRx, w: Successors) -> Result<()> {
    loop {
        match i.next()? {
            Signal::Successor(token) => w.fire(token)?,
            Signal::Zero(_) => return Ok(()),
        }
    }
}

/// Consume `i` and `j` in lockstep until `j` is exhausted.
///
/// The remainder of `i` is left unread for the caller. Fails with
/// [`ProtocolError::Underflow`] if `i` reaches zero first.
pub fn sub(i: &NumeralRx, j: NumeralRx) -> Result<()> {
    loop {
        match j.next()? {
            Signal::Successor(_) => {
                if let Signal::Zero(_) = i.next()? {
                    debug!(minuend = %i.id(), subtrahend = %j.id(), "minuend exhausted");
                    return Err(ProtocolError::Underflow { numeral: i.id() });
                }
            }
            Signal::Zero(_) => return Ok(()),
        }
    }
}

/// `w = i - j`, requires `i >= j`.
pub fn subtract(i: NumeralRx, j: NumeralRx, w: NumeralTx) -> Result<()> {
    sub(&i, j)?;
    copy(i, w)
}

#[cfg(test)]
mod tests {
    use peano_wire::{drain, emit, numeral};

    use super::*;
    use crate::process::Spawner;
    use crate::testing::{sink, source};

    #[test]
    fn add_sums() {
        let spawner = Spawner::new();
        for (a, b) in [(0, 0), (3, 4), (0, 5), (5, 0)] {
            let i = source(&spawner, a);
            let j = source(&spawner, b);
            assert_eq!(sink(&spawner, move |w| add(i, j, w)), a + b);
        }
    }

    #[test]
    fn add_to_leaves_accumulator_open() {
        let spawner = Spawner::new();
        let (mut w_tx, w_rx) = numeral();
        let first = source(&spawner, 2);
        let second = source(&spawner, 3);
        let first_view = w_tx.successors();
        let second_view = w_tx.successors();

        let owner = spawner
            .spawn("owner", move || {
                add_to(first, first_view)?;
                add_to(second, second_view)?;
                w_tx.successor(peano_wire::Token::new())?;
                Ok(w_tx.zero(peano_wire::Token::new())?)
            })
            .expect("owner should spawn");

        assert_eq!(drain(w_rx).expect("accumulator should drain"), 6);
        owner.join().expect("owner should complete");
    }

    #[test]
    fn subtract_takes_difference() {
        let spawner = Spawner::new();
        for (a, b) in [(5, 2), (4, 4), (3, 0), (0, 0)] {
            let i = source(&spawner, a);
            let j = source(&spawner, b);
            assert_eq!(sink(&spawner, move |w| subtract(i, j, w)), a - b);
        }
    }

    #[test]
    fn sub_leaves_remainder_unread() {
        let spawner = Spawner::new();
        let i = source(&spawner, 7);
        let j = source(&spawner, 3);

        sub(&i, j).expect("sub should complete");
        assert_eq!(drain(i).expect("remainder should drain"), 4);
    }

    #[test]
    fn subtract_underflow_is_reported() {
        let (i_tx, i_rx) = numeral();
        let (j_tx, j_rx) = numeral();
        let (w_tx, w_rx) = numeral();
        let i_id = i_tx.id();
        let producer_i = std::thread::spawn(move || emit(2, i_tx));
        let producer_j = std::thread::spawn(move || emit(5, j_tx));

        let err = subtract(i_rx, j_rx, w_tx).expect_err("2 - 5 should underflow");
        assert!(matches!(err, ProtocolError::Underflow { numeral } if numeral == i_id));

        // The output was never terminated and the subtrahend was abandoned.
        assert!(drain(w_rx).is_err());
        producer_i
            .join()
            .expect("producer thread should complete")
            .expect("minuend should be fully consumed");
        assert!(producer_j
            .join()
            .expect("producer thread should complete")
            .is_err());
    }
}
