//! AttachProbe
//!
//! Checks whether a JIRA attachment download survives its redirect to object storage.

use anyhow::Result;
use attachprobe_cli::config::{DEFAULT_ISSUE_KEY, DEFAULT_ORIGIN};
use attachprobe_cli::{exit_code, Credentials, ProbeConfig};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "attachprobe")]
#[command(
    about = "Debug JIRA attachment redirects to pre-signed object-storage URLs",
    long_about = "Reads JIRA_BASE_URL, JIRA_EMAIL and JIRA_API_TOKEN from the environment."
)]
struct Args {
    /// Issue whose first attachment is probed
    #[arg(short, long, default_value = DEFAULT_ISSUE_KEY)]
    issue: String,

    /// Origin sent with the CORS preflight
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Log level (logs go to stderr)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Exit non-zero when the issue cannot be fetched
    #[arg(long)]
    strict_exit: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(&args.log_level)
        .init();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::debug!("Configuration error: {:?}", e);
            println!("{}", e);
            return Ok(ExitCode::from(1));
        }
    };

    let config = ProbeConfig::new(credentials)
        .with_issue_key(args.issue)
        .with_preflight_origin(args.origin);

    let mut stdout = std::io::stdout().lock();
    let result = attachprobe_cli::run(&config, &mut stdout).await;
    match &result {
        Ok(outcome) => tracing::info!("Probe finished: {:?}", outcome),
        Err(e) => {
            tracing::error!("Probe aborted: {:?}", e);
            writeln!(stdout, "{}", e)?;
        }
    }

    Ok(ExitCode::from(exit_code(&result, args.strict_exit)))
}
