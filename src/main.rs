//! RDMA Latency Simulator - Main CLI Application
//!
//! Runs the transfer model for every selected transport and prints one
//! latency/throughput line per transport.

use clap::Parser;
use rdma_latency_sim::{
    app::App,
    cli::Cli,
    config::{display_config_summary, load_config, EnvManager},
    error::{AppError, ErrorReporter, Result},
    transport::Transport,
    VERSION, PKG_NAME,
};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Worker panics are turned into driver errors, so only report them here
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
    }));

    let cli = Cli::parse();
    let use_color = cli.use_colors();
    let verbose = cli.verbose;

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);

        if verbose {
            ErrorReporter::new(use_color, true).report_error(&e);
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        eprintln!("Built: {}", option_env!("BUILD_TIME").unwrap_or("unknown"));
        eprintln!("Commit: {}", option_env!("GIT_COMMIT").unwrap_or("unknown"));
        eprintln!("Target: {}", option_env!("TARGET_TRIPLE").unwrap_or("unknown"));
        eprintln!();
        eprint!("{}", cli.get_config_summary());
        eprintln!();

        if let Some(problems) = EnvManager::check_env_file(Path::new(".env"))? {
            for problem in problems {
                eprintln!(".env: {}", problem);
            }
        }
    }

    // Everything is validated here, before any output is produced
    let config = load_config(cli)?;

    if config.debug {
        eprintln!("Effective configuration:");
        eprintln!("{}", display_config_summary(&config));
        eprintln!();
    }

    let app = App::new(config);
    let summaries = app.run().await?;
    let output = app.render(&summaries)?;

    println!("{}", output);

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::UnknownTransport(_) => {
            eprintln!();
            eprintln!("Transport help:");
            eprintln!("  - Supported transports: {}", Transport::names().join(", "));
            eprintln!("  - Names are case-sensitive");
        }
        AppError::InvalidPayload(_) => {
            eprintln!();
            eprintln!("Payload help:");
            eprintln!("  - --payload takes a positive size in GB, e.g. --payload 0.5");
        }
        AppError::Driver(_) => {
            eprintln!();
            eprintln!("Driver help:");
            eprintln!("  - --world-size must be at least 1");
            eprintln!("  - Payloads too large to wait for in real time need --analytic");
        }
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!();
            eprint!("{}", EnvManager::display_env_help());
        }
        _ => {}
    }
}
