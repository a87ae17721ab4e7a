use clap::Parser;
use foldersort::cli::{Cli, SortOptions, program_file_name, run_sort};
use foldersort::confirm::TerminalConfirmation;
use foldersort::output::OutputFormatter;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let arg0 = env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned());
    let options = SortOptions::from_cli(cli, program_file_name(arg0.as_deref()));

    match run_sort(&options, &mut TerminalConfirmation::new()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
