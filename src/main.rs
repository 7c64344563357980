mod cli;
mod execute;

use std::process::ExitCode;
use colored::Colorize;
use env_logger::Env;
use crate::cli::Invocation;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::new().filter_or("BINGORUN_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let invocation = Invocation::parse(std::env::args_os());
    match execute::execute(invocation) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
