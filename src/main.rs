use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use arabic_conjugator::cli::{run_headless, Cli};
use arabic_conjugator::config::load_config;
use arabic_conjugator::{detect_defaults, gui, Formatter, HostEnvironment, ShapingCapability};

fn init_tracing() {
    // stdout is reserved for the table.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "could not load configuration");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let host = HostEnvironment::capture();
    let formatter = Formatter::new(ShapingCapability::detect(), detect_defaults(&host));

    if cli.is_headless() {
        let mut out = io::stdout().lock();
        return match run_headless(&cli, &config, &formatter, &mut out) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "conjugation failed");
                eprintln!("{:#}", e);
                ExitCode::FAILURE
            }
        };
    }

    match gui::run(config, formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "could not open the window");
            eprintln!("Could not open the window: {}. Use --verb to conjugate in the terminal.", e);
            ExitCode::FAILURE
        }
    }
}
