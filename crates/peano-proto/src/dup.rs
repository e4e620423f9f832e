//! `Dup` and `Double`: one numeral in, two identical numerals out.

use crossbeam_channel::{bounded, Sender};
use peano_wire::{numeral, NumeralRx, NumeralTx, Signal, Successors, Token};

use crate::error::{ProtocolError, Result};
use crate::process::{join_all, Spawner};
use crate::structural::copy;

const FORWARDER: &str = "dup-fire";

/// Broadcast every unit of `i` onto both `v` and `w`.
///
/// Each successor is handed to two forwarder processes, one per target. The
/// next unit of `i` is not read until both forwarders have reported on the
/// step's completion rendezvous, so `v` and `w` never drift apart.
pub fn dup(spawner: &Spawner, i: NumeralRx, v: NumeralTx, w: NumeralTx) -> Result<()> {
    loop {
        match i.next()? {
            Signal::Successor(token) => {
                let (done_tx, done_rx) = bounded(0);
                spawner.spawn(FORWARDER, forward(v.successors(), token, done_tx.clone()))?;
                spawner.spawn(FORWARDER, forward(w.successors(), token, done_tx))?;

                // Both forwarders must finish before `v` or `w` can be dropped,
                // even when the first report is a failure.
                let reports = [done_rx.recv(), done_rx.recv()];
                for report in reports {
                    report.map_err(|_| ProtocolError::Panicked {
                        name: FORWARDER.to_string(),
                    })??;
                }
            }
            Signal::Zero(token) => {
                let zero_v = spawner.spawn("dup-zero", move || Ok(v.zero(token)?))?;
                let fired_w = w.zero(token);
                let fired_v = zero_v.join();
                fired_w?;
                return fired_v;
            }
        }
    }
}

fn forward(
    target: Successors,
    token: Token,
    done: Sender<peano_wire::Result<()>>,
) -> impl FnOnce() -> Result<()> + Send + 'static {
    move || {
        let fired = target.fire(token);
        // The parent only stops listening once it is already failing.
        let _ = done.send(fired);
        Ok(())
    }
}

/// `v = i` and `w = i`.
///
/// `Dup` writes into two private numerals that are copied onto `v` and `w`
/// by independent processes.
pub fn double(spawner: &Spawner, i: NumeralRx, v: NumeralTx, w: NumeralTx) -> Result<()> {
    let (i1_tx, i1_rx) = numeral();
    let (i2_tx, i2_rx) = numeral();

    let inner = spawner.clone();
    let duplicator = spawner.spawn("dup", move || dup(&inner, i, i1_tx, i2_tx))?;
    let copy_v = spawner.spawn("copy", move || copy(i1_rx, v))?;
    let copied_w = copy(i2_rx, w);

    join_all([duplicator, copy_v])?;
    copied_w
}
