//! linkt - Linkt campus events CLI
//!
//! # Examples
//!
//! ```bash
//! # Sign in; organizers and students are asked for a second factor
//! linkt login --email olga@uni.edu --password secret
//! linkt verify-2fa --code 123456
//!
//! # Check a ticket in at the door
//! linkt validate --event-id 12 --qr-code TICKET-4f1c --pretty
//! ```

use linkt_cli::{App, Cli, CliResult, logger, run};
use linkt_config::Config;

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> CliResult<()> {
    let mut config = Config::load()?;
    if let Some(server) = cli.server {
        config.api.base_url = server;
    }
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    if config.logging.level.0 >= LevelFilter::Debug {
        info!("Starting linkt v{}", env!("CARGO_PKG_VERSION"));
        config.log_summary();
    }

    let app = App::from_config(&config)?;
    let output = run(cli.command, &app).await?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");

    Ok(())
}
