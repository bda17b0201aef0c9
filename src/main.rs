// Entrypoint for the `pb` binary.
// - Keeps `main` small: parse the arguments and hand them to the workflow.
// - The two user-facing conditions (no devices registered, unknown device
//   name) print their own message and exit with status 1; everything else
//   bubbles up as an `anyhow` error and is printed as a diagnostic.

use std::process::ExitCode;

use clap::Parser;
use pb_cli::{app, cli::Cli, device::UserError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(user) = err.downcast_ref::<UserError>() {
                eprintln!("{user}");
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
