use std::process;

use clap::Parser;
use colored::Colorize;
use search_api_client::telemetry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use crate::cli::{TesterArgs, execute_command};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file when present.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to read .env: {e}");
        }
    }

    let args = TesterArgs::parse();

    // `-v` beats RUST_LOG for this library; without it RUST_LOG decides.
    let level = telemetry::verbosity_level(args.verbose);

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", level))
        .with(telemetry::layer())
        .init();

    if let Err(e) = execute_command(args).await {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}
