// cli/src/main.rs

use std::process::ExitCode;

use patientor_cli::cli::start_cli;

fn main() -> ExitCode {
    match start_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error encountered: {e:#}");
            ExitCode::FAILURE
        }
    }
}
