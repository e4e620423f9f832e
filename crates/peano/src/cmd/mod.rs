use clap::{Args, Subcommand};
use peano::eval::Operation;
use peano::proto::Spawner;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod compute;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Emit a numeral and count it.
    N(UnaryArgs),
    /// Relay a numeral unchanged.
    Copy(UnaryArgs),
    /// Add one.
    Succ(UnaryArgs),
    /// Add two numerals.
    Add(BinaryArgs),
    /// Subtract B from A (A must be at least B).
    Subtract(BinaryArgs),
    /// Absolute difference, without comparing the operands first.
    Diff(BinaryArgs),
    /// Duplicate a numeral onto two outputs.
    Double(UnaryArgs),
    /// Multiply two numerals by repeated addition.
    Multiply(BinaryArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, spawner: &Spawner) -> CliResult<i32> {
    let (operation, run) = match command {
        Command::N(args) => (Operation::N(args.n), args.run),
        Command::Copy(args) => (Operation::Copy(args.n), args.run),
        Command::Succ(args) => (Operation::Succ(args.n), args.run),
        Command::Add(args) => (Operation::Add(args.a, args.b), args.run),
        Command::Subtract(args) => (Operation::Subtract(args.a, args.b), args.run),
        Command::Diff(args) => (Operation::Diff(args.a, args.b), args.run),
        Command::Double(args) => (Operation::Double(args.n), args.run),
        Command::Multiply(args) => (Operation::Multiply(args.a, args.b), args.run),
        Command::Version(args) => return version::run(args),
    };
    compute::run(operation, &run, format, spawner)
}

#[derive(Args, Debug)]
pub struct UnaryArgs {
    /// Operand.
    pub n: u64,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct BinaryArgs {
    /// Left operand.
    pub a: u64,
    /// Right operand.
    pub b: u64,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Build and run the network this many times; all runs must agree.
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
