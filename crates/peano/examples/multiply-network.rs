//! Wire a small network by hand: `(a + b) * c`, then split the product
//! with `double` and take the difference of the halves against `a`.
//!
//! Run with: cargo run -p peano --example multiply-network -- 2 3 4

use peano::proto::{add, diff, double, join_all, multiply, Process, Result, Spawner};
use peano::wire::{drain, emit, numeral, NumeralRx};

fn source(spawner: &Spawner, n: u64) -> Result<(NumeralRx, Process<()>)> {
    let (tx, rx) = numeral();
    let process = spawner.spawn("n", move || Ok(emit(n, tx)?))?;
    Ok((rx, process))
}

fn operand(args: &[String], index: usize, default: u64) -> u64 {
    args.get(index)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (a, b, c) = (operand(&args, 0, 2), operand(&args, 1, 3), operand(&args, 2, 4));
    let spawner = Spawner::new();

    let (a1, pa1) = source(&spawner, a)?;
    let (a2, pa2) = source(&spawner, a)?;
    let (b, pb) = source(&spawner, b)?;
    let (c, pc) = source(&spawner, c)?;

    let (sum_tx, sum_rx) = numeral();
    let adder = spawner.spawn("add", move || add(a1, b, sum_tx))?;

    let (product_tx, product_rx) = numeral();
    let inner = spawner.clone();
    let multiplier = spawner.spawn("multiply", move || multiply(&inner, sum_rx, c, product_tx))?;

    let (left_tx, left_rx) = numeral();
    let (right_tx, right_rx) = numeral();
    let inner = spawner.clone();
    let doubler = spawner.spawn("double", move || double(&inner, product_rx, left_tx, right_tx))?;

    let (gap_tx, gap_rx) = numeral();
    let inner = spawner.clone();
    let differ = spawner.spawn("diff", move || diff(&inner, left_rx, a2, gap_tx))?;

    let right = spawner.spawn("drain", move || Ok(drain(right_rx)?))?;
    let gap = drain(gap_rx)?;
    let product = right.join()?;

    join_all([pa1, pa2, pb, pc, adder, multiplier, doubler, differ])?;

    println!("(a + b) * c = {product}");
    println!("|(a + b) * c - a| = {gap}");
    println!("processes: {}", spawner.spawned());
    Ok(())
}
