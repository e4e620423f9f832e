//! `Diff`: absolute difference without comparing the operands first.
//!
//! Two races run concurrently on shared handles to both inputs. The left race
//! subtracts `j` from `i`, the right race subtracts `i` from `j`. Each race
//! reads one unit of its subtrahend, then one unit of its minuend, so every
//! completed step removes one unit from each input no matter which race took
//! it. A race stops when it sees a zero signal or a cancellation; at that
//! moment it holds at most one unpaired subtrahend unit.
//!
//! The coordinator waits for the first race to see a zero signal, cancels
//! the other, and joins both. From the two outcomes it knows which inputs
//! are exhausted and how many unpaired units were taken from each, which is
//! enough to finish `w` from the input that still has units left.

use crossbeam_channel::{bounded, Sender};
use peano_wire::{cancellation, emit, CancelSignal, NumeralRx, NumeralTx, Signal, WireError};
use tracing::debug;

use crate::error::{ProtocolError, Result};
use crate::process::{Process, Spawner};
use crate::structural::{copy, succ};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// `i - j`
    Left,
    /// `j - i`
    Right,
}

/// How a race stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Race {
    /// Saw its subtrahend's zero between steps.
    Exhausted,
    /// Saw its minuend's zero while holding one subtrahend unit.
    Overdrawn,
    /// Cancelled by the coordinator.
    Cancelled { holding: bool },
    /// An input was already closed by the other race.
    Closed { holding: bool },
}

impl Race {
    fn decisive(self) -> bool {
        matches!(self, Race::Exhausted | Race::Overdrawn)
    }

    fn holding(self) -> bool {
        match self {
            Race::Exhausted => false,
            Race::Overdrawn => true,
            Race::Cancelled { holding } | Race::Closed { holding } => holding,
        }
    }
}

type Report = (Side, Race);

/// `w = |i - j|`.
pub fn diff(spawner: &Spawner, i: NumeralRx, j: NumeralRx, w: NumeralTx) -> Result<()> {
    let (canceller, signal) = cancellation();
    let (report_tx, report_rx) = bounded::<Report>(0);

    let left = spawn_race(
        spawner,
        Side::Left,
        i.share(),
        j.share(),
        signal.clone(),
        report_tx.clone(),
    )?;
    let right = spawn_race(spawner, Side::Right, j.share(), i.share(), signal, report_tx)?;

    let mut canceller = Some(canceller);
    let mut left_race = None;
    let mut right_race = None;
    for _ in 0..2 {
        let (side, race) = report_rx
            .recv()
            .map_err(|_| ProtocolError::Unbalanced("race exited without a report".to_string()))?;
        if race.decisive() {
            if let Some(canceller) = canceller.take() {
                canceller.cancel();
            }
        }
        match side {
            Side::Left => left_race = Some(race),
            Side::Right => right_race = Some(race),
        }
    }
    left.join()?;
    right.join()?;

    let (Some(left_race), Some(right_race)) = (left_race, right_race) else {
        return Err(ProtocolError::Unbalanced(
            "a race reported twice".to_string(),
        ));
    };
    debug!(?left_race, ?right_race, "difference races settled");
    settle(left_race, right_race, i, j, w)
}

fn spawn_race(
    spawner: &Spawner,
    side: Side,
    minuend: NumeralRx,
    subtrahend: NumeralRx,
    cancel: CancelSignal,
    report: Sender<Report>,
) -> Result<Process<()>> {
    spawner.spawn("diff-race", move || {
        let outcome = race(&minuend, &subtrahend, &cancel);
        // Only fails when the coordinator already gave up.
        let _ = report.send((side, outcome));
        Ok(())
    })
}

fn race(minuend: &NumeralRx, subtrahend: &NumeralRx, cancel: &CancelSignal) -> Race {
    loop {
        match subtrahend.next_or_cancel(cancel) {
            Ok(Some(Signal::Successor(_))) => {}
            Ok(Some(Signal::Zero(_))) => return Race::Exhausted,
            Ok(None) => return Race::Cancelled { holding: false },
            Err(WireError::Disconnected { .. }) => return Race::Closed { holding: false },
        }
        match minuend.next_or_cancel(cancel) {
            Ok(Some(Signal::Successor(_))) => {}
            Ok(Some(Signal::Zero(_))) => return Race::Overdrawn,
            Ok(None) => return Race::Cancelled { holding: true },
            Err(WireError::Disconnected { .. }) => return Race::Closed { holding: true },
        }
    }
}

/// Finish `w` from the race outcomes.
///
/// The left race holds unpaired units of `j`, the right race of `i`.
fn settle(left: Race, right: Race, i: NumeralRx, j: NumeralRx, w: NumeralTx) -> Result<()> {
    let i_done = right == Race::Exhausted || left == Race::Overdrawn;
    let j_done = left == Race::Exhausted || right == Race::Overdrawn;
    let held_i = right.holding();
    let held_j = left.holding();

    match (i_done, j_done) {
        (true, true) => Ok(emit(u64::from(held_i != held_j), w)?),
        (true, false) => finish(j, w, held_j, held_i),
        (false, true) => finish(i, w, held_i, held_j),
        (false, false) => Err(ProtocolError::Unbalanced(format!(
            "no race reached zero (left {left:?}, right {right:?})"
        ))),
    }
}

/// Copy the remainder onto `w`, adding back one unit the races took from it
/// without a partner.
fn finish(rest: NumeralRx, w: NumeralTx, held_rest: bool, held_done: bool) -> Result<()> {
    match (held_rest, held_done) {
        (true, false) => succ(rest, w),
        (true, true) | (false, false) => copy(rest, w),
        (false, true) => Err(ProtocolError::Unbalanced(format!(
            "exhausted numeral has an unpaired unit while {} is still open",
            rest.id()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sink, source};

    fn run_diff(spawner: &Spawner, a: u64, b: u64) -> u64 {
        let i = source(spawner, a);
        let j = source(spawner, b);
        let inner = spawner.clone();
        sink(spawner, move |w| diff(&inner, i, j, w))
    }

    #[test]
    fn diff_either_order() {
        let spawner = Spawner::new();
        assert_eq!(run_diff(&spawner, 2, 5), 3);
        assert_eq!(run_diff(&spawner, 5, 2), 3);
    }

    #[test]
    fn diff_equal_is_zero() {
        let spawner = Spawner::new();
        for n in [0, 1, 4] {
            assert_eq!(run_diff(&spawner, n, n), 0);
        }
    }

    #[test]
    fn diff_against_zero() {
        let spawner = Spawner::new();
        assert_eq!(run_diff(&spawner, 0, 3), 3);
        assert_eq!(run_diff(&spawner, 3, 0), 3);
        assert_eq!(run_diff(&spawner, 1, 0), 1);
    }

    #[test]
    fn diff_is_stable_across_runs() {
        let spawner = Spawner::new();
        for _ in 0..100 {
            assert_eq!(run_diff(&spawner, 1, 2), 1);
            assert_eq!(run_diff(&spawner, 1, 1), 0);
        }
    }

    #[test]
    fn race_outcome_flags() {
        assert!(Race::Overdrawn.holding());
        assert!(!Race::Exhausted.holding());
        assert!(Race::Closed { holding: true }.holding());
        assert!(!Race::Cancelled { holding: false }.decisive());
    }
}
