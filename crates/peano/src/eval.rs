//! Evaluate one operation end to end.
//!
//! [`evaluate`] starts a producer per operand, the protocol for the
//! operation, and drains the output numeral(s) on the calling thread. Every
//! process it started is joined before it returns.

use std::fmt;

use peano_proto::{
    add, copy, diff, double, join_all, multiply, subtract, succ, Process, Result, Spawner,
};
use peano_wire::{drain, emit, numeral, NumeralRx};

/// An arithmetic operation on literal operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    N(u64),
    Copy(u64),
    Succ(u64),
    Add(u64, u64),
    Subtract(u64, u64),
    Diff(u64, u64),
    Double(u64),
    Multiply(u64, u64),
}

impl Operation {
    /// Command name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::N(_) => "n",
            Operation::Copy(_) => "copy",
            Operation::Succ(_) => "succ",
            Operation::Add(..) => "add",
            Operation::Subtract(..) => "subtract",
            Operation::Diff(..) => "diff",
            Operation::Double(_) => "double",
            Operation::Multiply(..) => "multiply",
        }
    }

    /// Literal operands in argument order.
    pub fn operands(&self) -> Vec<u64> {
        match *self {
            Operation::N(n) | Operation::Copy(n) | Operation::Succ(n) | Operation::Double(n) => {
                vec![n]
            }
            Operation::Add(a, b)
            | Operation::Subtract(a, b)
            | Operation::Diff(a, b)
            | Operation::Multiply(a, b) => vec![a, b],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self
            .operands()
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({operands})", self.name())
    }
}

/// Drained result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// One value per output numeral (two for `double`).
    pub values: Vec<u64>,
    /// Processes started for this evaluation.
    pub processes: u64,
}

/// Run `operation` as a process network and drain its output.
pub fn evaluate(spawner: &Spawner, operation: Operation) -> Result<Evaluation> {
    let before = spawner.spawned();
    let mut producers = Vec::new();
    let mut source = |n: u64| -> Result<NumeralRx> {
        let (tx, rx) = numeral();
        producers.push(spawner.spawn("n", move || Ok(emit(n, tx)?))?);
        Ok(rx)
    };

    let (out_tx, out_rx) = numeral();
    let mut second: Option<Process<u64>> = None;
    let protocol = match operation {
        Operation::N(n) => spawner.spawn("n", move || Ok(emit(n, out_tx)?))?,
        Operation::Copy(n) => {
            let i = source(n)?;
            spawner.spawn("copy", move || copy(i, out_tx))?
        }
        Operation::Succ(n) => {
            let i = source(n)?;
            spawner.spawn("succ", move || succ(i, out_tx))?
        }
        Operation::Add(a, b) => {
            let (i, j) = (source(a)?, source(b)?);
            spawner.spawn("add", move || add(i, j, out_tx))?
        }
        Operation::Subtract(a, b) => {
            let (i, j) = (source(a)?, source(b)?);
            spawner.spawn("subtract", move || subtract(i, j, out_tx))?
        }
        Operation::Diff(a, b) => {
            let (i, j) = (source(a)?, source(b)?);
            let inner = spawner.clone();
            spawner.spawn("diff", move || diff(&inner, i, j, out_tx))?
        }
        Operation::Double(n) => {
            let i = source(n)?;
            let (w_tx, w_rx) = numeral();
            // Both outputs advance together, so they are drained concurrently.
            second = Some(spawner.spawn("drain", move || Ok(drain(w_rx)?))?);
            let inner = spawner.clone();
            spawner.spawn("double", move || double(&inner, i, out_tx, w_tx))?
        }
        Operation::Multiply(a, b) => {
            let (i, j) = (source(a)?, source(b)?);
            let inner = spawner.clone();
            spawner.spawn("multiply", move || multiply(&inner, i, j, out_tx))?
        }
    };

    let drained = drain(out_rx);
    let second = second.map(Process::join);
    // The protocol's own error explains a failed drain better than the drain.
    protocol.join()?;
    join_all(producers)?;

    let mut values = vec![drained?];
    if let Some(value) = second {
        values.push(value?);
    }

    Ok(Evaluation {
        values,
        processes: spawner.spawned().saturating_sub(before),
    })
}

#[cfg(test)]
mod tests {
    use peano_proto::ProtocolError;

    use super::*;

    fn values(operation: Operation) -> Vec<u64> {
        evaluate(&Spawner::new(), operation)
            .expect("evaluation should succeed")
            .values
    }

    #[test]
    fn evaluates_every_operation() {
        assert_eq!(values(Operation::N(0)), vec![0]);
        assert_eq!(values(Operation::N(5)), vec![5]);
        assert_eq!(values(Operation::Copy(4)), vec![4]);
        assert_eq!(values(Operation::Succ(4)), vec![5]);
        assert_eq!(values(Operation::Add(3, 4)), vec![7]);
        assert_eq!(values(Operation::Subtract(5, 2)), vec![3]);
        assert_eq!(values(Operation::Diff(2, 5)), vec![3]);
        assert_eq!(values(Operation::Double(6)), vec![6, 6]);
        assert_eq!(values(Operation::Multiply(3, 4)), vec![12]);
        assert_eq!(values(Operation::Multiply(0, 5)), vec![0]);
    }

    #[test]
    fn subtract_underflow_surfaces_protocol_error() {
        let err = evaluate(&Spawner::new(), Operation::Subtract(2, 5))
            .expect_err("2 - 5 should fail");
        assert!(matches!(err, ProtocolError::Underflow { .. }));
    }

    #[test]
    fn counts_processes_per_evaluation() {
        let spawner = Spawner::new();
        let first = evaluate(&spawner, Operation::Add(1, 1)).expect("add should succeed");
        let second = evaluate(&spawner, Operation::Add(1, 1)).expect("add should succeed");

        // Two producers and the protocol.
        assert_eq!(first.processes, 3);
        assert_eq!(second.processes, 3);
        assert_eq!(spawner.spawned(), 6);
    }

    #[test]
    fn display_lists_operands() {
        assert_eq!(Operation::Multiply(3, 4).to_string(), "multiply(3, 4)");
        assert_eq!(Operation::Double(6).to_string(), "double(6)");
        assert_eq!(Operation::Diff(1, 2).operands(), vec![1, 2]);
    }
}
