//! Fleetdraw - command-line tool for rendering inventories, cards and maps

use std::process::ExitCode;

use fleetdraw::cli;

fn main() -> ExitCode {
    cli::run()
}
