//! hdwallet - command-line front end for `hdwallet-core`.

mod commands;
mod telemetry;

use clap::Parser;

fn main() {
    let cli = commands::Cli::parse();

    if let Err(e) = telemetry::init_telemetry(&cli.log_level) {
        eprintln!("Error: invalid log level '{}': {}", cli.log_level, e);
        std::process::exit(2);
    }

    let result = cli
        .resolve_config()
        .and_then(|config| commands::execute(cli.command, &config));

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
