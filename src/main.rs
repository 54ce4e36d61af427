//! Provides the main entry point to the program.
use ::log::error;
use carbonsense::cli::run_cli;
use carbonsense::log::is_logger_initialised;
use human_panic::{metadata, setup_panic};
use std::process::ExitCode;

fn main() -> ExitCode {
    setup_panic!(metadata!().support("- Open an issue on the project's issue tracker"));

    if let Err(err) = run_cli() {
        if is_logger_initialised() {
            error!("{err:?}");
        } else {
            eprintln!("Error: {err:?}");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
