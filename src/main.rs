//! Demonstration server for the request logging middleware.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --listen 127.0.0.1:8080 --format text
//! curl localhost:8080/attr
//! curl localhost:8080/panic
//! ```
//!
//! See [`httplog::config`] for the environment variables.

use anyhow::Result;
use clap::Parser;
use httplog::application::options::LogFormat;
use httplog::{config, server, telemetry};

/// Structured request logging demo server.
#[derive(Parser)]
#[command(name = "httplog-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(long)]
    listen: Option<String>,

    /// Subscriber format (`json` or `text`), overrides `LOG_FORMAT`
    #[arg(long)]
    format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(format) = cli.format {
        config.log_format = format;
    }
    config.validate()?;

    telemetry::init(&config.log_filter, config.log_format)?;
    config.print_summary();

    server::run(config).await
}
