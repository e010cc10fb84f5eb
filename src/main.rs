use clap::Parser;
use downsort::cli::{Cli, run_cli};
use downsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_cli(cli) {
        Ok(_) => {
            OutputFormatter::plain("Downloads folder has been organized!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
