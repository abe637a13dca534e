//! adrkit - Parse and generate architecture decision records

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = adrkit::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
