use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use nav2json_cli::{parse_invocation, Invocation, HELP};
use navjson_core::{ConversionRequest, OutputTarget, Pipeline, StdTerminal};
use tracing::level_filters::LevelFilter;

fn main() -> Result<ExitCode> {
    let args = env::args_os()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument {arg:?} is not valid UTF-8"))
        })
        .collect::<Result<Vec<_>>>()?;

    match parse_invocation(args, io::stdin().is_terminal()) {
        Invocation::Help => {
            print!("{HELP}");
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Rejected { message } => {
            println!("{message}");
            print!("{HELP}");
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Convert(request) => convert(&request),
    }
}

fn convert(request: &ConversionRequest) -> Result<ExitCode> {
    init_tracing(request.silent())?;
    let to_stdout = matches!(request.output(), OutputTarget::Stdout { .. });
    let mut terminal = StdTerminal::new(to_stdout);
    match Pipeline::new(request, &mut terminal).run() {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn init_tracing(silent: bool) -> Result<()> {
    let level = if silent {
        LevelFilter::OFF
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("install log subscriber")
}
