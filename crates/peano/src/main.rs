mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use peano::proto::{SpawnConfig, Spawner};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "peano",
    version,
    about = "Peano arithmetic over rendezvous processes"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "PEANO_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    /// Stack size of each process thread, in bytes.
    #[arg(long, value_name = "BYTES", global = true)]
    stack_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn spawner(&self) -> Spawner {
        Spawner::with_config(SpawnConfig {
            stack_size: self.stack_size,
            ..SpawnConfig::default()
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let spawner = cli.spawner();
    let result = cmd::run(cli.command, format, &spawner);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
