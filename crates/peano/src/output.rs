use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use peano::eval::{Evaluation, Operation};
use serde::Serialize;

const EVALUATION_SCHEMA_ID: &str = "peano/cli/v1/evaluation";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct EvaluationOutput<'a> {
    schema_id: &'a str,
    operation: &'a str,
    operands: Vec<u64>,
    values: &'a [u64],
    runs: u32,
    processes: u64,
}

pub fn print_evaluation(
    operation: &Operation,
    evaluation: &Evaluation,
    runs: u32,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = EvaluationOutput {
                schema_id: EVALUATION_SCHEMA_ID,
                operation: operation.name(),
                operands: operation.operands(),
                values: &evaluation.values,
                runs,
                processes: evaluation.processes,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OPERATION", "RESULT", "RUNS", "PROCESSES"])
                .add_row(vec![
                    operation.to_string(),
                    join_values(&evaluation.values),
                    runs.to_string(),
                    evaluation.processes.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let result = match evaluation.values.as_slice() {
                [value] => value.to_string(),
                values => format!("({})", join_values(values)),
            };
            println!("{operation} = {result}");
        }
        OutputFormat::Raw => {
            for value in &evaluation.values {
                println!("{value}");
            }
        }
    }
}

fn join_values(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
