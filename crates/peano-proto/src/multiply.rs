//! `Multiply` and `FlushFire`.

use peano_wire::{numeral, NumeralRx, NumeralTx, Signal, Token};
use tracing::debug;

use crate::additive::add_to;
use crate::dup::double;
use crate::error::Result;
use crate::process::{join_all, Spawner};

/// `w = i * j`.
///
/// Every unit of `j` doubles the current multiplicand: one copy is
/// accumulated into `w` by an `AddTo` process, the other becomes the
/// multiplicand for the next unit. When `j` is exhausted the last
/// multiplicand is flushed, every accumulator is joined, and only then is
/// `w` terminated. An accumulator can still be relaying its last unit after
/// the flush, so firing zero before the join could cut `w` short.
pub fn multiply(spawner: &Spawner, i: NumeralRx, j: NumeralRx, w: NumeralTx) -> Result<()> {
    let mut multiplicand = i;
    let mut workers = Vec::new();

    loop {
        match j.next()? {
            Signal::Successor(_) => {
                let (i1_tx, i1_rx) = numeral();
                let (i2_tx, i2_rx) = numeral();
                let source = std::mem::replace(&mut multiplicand, i1_rx);

                let inner = spawner.clone();
                workers.push(spawner.spawn("double", move || {
                    double(&inner, source, i1_tx, i2_tx)
                })?);
                let accumulator = w.successors();
                workers.push(spawner.spawn("add-to", move || add_to(i2_rx, accumulator))?);
            }
            Signal::Zero(_) => {
                let token = flush(multiplicand)?;
                debug!(levels = workers.len() / 2, product = %w.id(), "joining accumulators");
                join_all(workers)?;
                return Ok(w.zero(token)?);
            }
        }
    }
}

/// Discard every successor of `i` and return the token of its zero signal.
pub fn flush(i: NumeralRx) -> Result<Token> {
    loop {
        if let Signal::Zero(token) = i.next()? {
            return Ok(token);
        }
    }
}

/// Drain `i`, then fire zero on `w`.
pub fn flush_fire(i: NumeralRx, w: NumeralTx) -> Result<()> {
    let token = flush(i)?;
    Ok(w.zero(token)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sink, source};

    fn run_multiply(spawner: &Spawner, a: u64, b: u64) -> u64 {
        let i = source(spawner, a);
        let j = source(spawner, b);
        let inner = spawner.clone();
        sink(spawner, move |w| multiply(&inner, i, j, w))
    }

    #[test]
    fn multiply_three_by_four() {
        let spawner = Spawner::new();
        assert_eq!(run_multiply(&spawner, 3, 4), 12);
    }

    #[test]
    fn multiply_by_zero() {
        let spawner = Spawner::new();
        assert_eq!(run_multiply(&spawner, 0, 5), 0);
        assert_eq!(run_multiply(&spawner, 5, 0), 0);
        assert_eq!(run_multiply(&spawner, 0, 0), 0);
    }

    #[test]
    fn multiply_by_one() {
        let spawner = Spawner::new();
        assert_eq!(run_multiply(&spawner, 7, 1), 7);
        assert_eq!(run_multiply(&spawner, 1, 7), 7);
    }

    #[test]
    fn multiply_is_stable_across_runs() {
        let spawner = Spawner::new();
        for _ in 0..25 {
            assert_eq!(run_multiply(&spawner, 2, 3), 6);
        }
    }

    #[test]
    fn multiply_spawns_processes_per_unit_of_multiplier() {
        let idle = Spawner::new();
        run_multiply(&idle, 4, 0);
        // Two producers and the protocol itself.
        assert_eq!(idle.spawned(), 3);

        let busy = Spawner::new();
        run_multiply(&busy, 0, 4);
        // Per level: double, add-to, dup, copy and one zero relay in dup.
        assert_eq!(busy.spawned(), 3 + 4 * 5);
    }

    #[test]
    fn flush_fire_terminates_target() {
        let spawner = Spawner::new();
        let input = source(&spawner, 4);
        assert_eq!(sink(&spawner, move |w| flush_fire(input, w)), 0);
    }

    #[test]
    fn flush_returns_after_zero() {
        let spawner = Spawner::new();
        let input = source(&spawner, 3);
        flush(input).expect("flush should reach zero");

        let (tx, rx) = numeral();
        drop(tx);
        assert!(flush(rx).is_err());
    }
}
