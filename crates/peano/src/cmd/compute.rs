use peano::eval::{evaluate, Evaluation, Operation};
use peano::proto::Spawner;
use tracing::{debug, info};

use crate::cmd::RunArgs;
use crate::exit::{protocol_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_evaluation, OutputFormat};

pub fn run(
    operation: Operation,
    args: &RunArgs,
    format: OutputFormat,
    spawner: &Spawner,
) -> CliResult<i32> {
    let context = operation.to_string();
    let mut first: Option<Evaluation> = None;

    for run in 1..=args.repeat {
        let evaluation =
            evaluate(spawner, operation).map_err(|err| protocol_error(&context, err))?;
        debug!(
            run,
            values = ?evaluation.values,
            processes = evaluation.processes,
            "network finished"
        );

        match &first {
            None => first = Some(evaluation),
            Some(expected) if expected.values != evaluation.values => {
                return Err(CliError::new(
                    DATA_INVALID,
                    format!(
                        "{context}: run {run} produced {:?}, run 1 produced {:?}",
                        evaluation.values, expected.values
                    ),
                ));
            }
            Some(_) => {}
        }
    }

    let Some(evaluation) = first else {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{context}: no run completed"),
        ));
    };
    info!(%operation, runs = args.repeat, total_processes = spawner.spawned(), "evaluation complete");
    print_evaluation(&operation, &evaluation, args.repeat, format);

    Ok(SUCCESS)
}
