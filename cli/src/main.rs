#![cfg_attr(test, allow(unused_crate_dependencies))]
#![forbid(unsafe_code)]

mod cli_input;
mod commands;
mod dashboard;
mod errors;
mod output;

use std::process;

use clap::Parser;
use kiwi_client::Client;
use kiwi_config::LogLevel;
use tokio::runtime;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use crate::{
    cli_input::{Args, SubCommand},
    errors::CliError,
    output::report,
};

const THREAD_NAME: &str = "kiwi";

fn main() {
    let args = Args::parse();

    let exit_code = match try_main(args) {
        Ok(()) => 0,
        Err(error) => {
            report::error(&error);
            1
        }
    };

    process::exit(exit_code);
}

fn try_main(args: Args) -> Result<(), CliError> {
    let config = args.config()?;

    init_tracing(args.log_level(&config));

    let sources = args.sources(&config);
    tracing::debug!(sources = sources.len(), "resolved sources");

    let command = args.command();

    if command == SubCommand::Sources {
        return commands::sources(&sources, args.format);
    }

    let source = args.select(&sources)?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(async move {
        let client = Client::connect(source).await?;

        commands::run(command, &client, args.format).await
    })
}

/// Installs the stderr subscriber. Without a level, `RUST_LOG` applies, defaulting to warnings.
fn init_tracing(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::builder().parse_lossy(level.as_filter()),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy(),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
