//! ticker - periodic timestamp printer with graceful shutdown
//!
//! Prints the time every interval until SIGINT/SIGTERM, then gives the
//! background task a bounded window to finish.

use clap::Parser;
use dupseek::{cli::TickerCli, error::ExitCode, logging::init_logging};

fn main() {
    let cli = TickerCli::parse();
    init_logging(cli.verbose, cli.quiet);

    match dupseek::run_ticker(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
