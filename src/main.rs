use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use basecount::cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag; stdout carries the report
    let filter = if cli.verbose {
        EnvFilter::new("basecount=debug,info")
    } else {
        EnvFilter::new("basecount=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli::count::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
