//! # pokevault
//!
//! Command-line front end: `refresh` mirrors the remote catalog into JSON,
//! `image` exercises the image cache.
//!
//! Logs go to stderr. `RUST_LOG` overrides the default filter and
//! `POKEVAULT_LOG_FORMAT=json` switches to machine-readable output.

mod cli;
mod error;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet);

    let result = tokio::select! {
        result = cli::execute(cli) => result,
        _ = tokio::signal::ctrl_c() => Err(exn::Exn::from(error::ErrorKind::Interrupted)),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(quiet: bool) {
    let log_format = std::env::var("POKEVAULT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if quiet { "pokevault=warn" } else { "pokevault=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        },
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        },
    }
}
