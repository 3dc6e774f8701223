//! update-noti - check for package updates, auto-apply an allow-list and
//! report to a webhook.

use anyhow::Context;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use update_noti_core::config::{Config, Telemetry, DEFAULT_CONFIG_PATH};
use update_noti_core::detector::Detector;
use update_noti_core::executor::{Executor, LocalExecutor};
use update_noti_core::notifier::SlackNotifier;
use update_noti_core::pipeline::{announce_install, run_update_check};

#[derive(Parser)]
#[command(name = "update-noti")]
#[command(
    author,
    version,
    about = "Check for package updates, auto-update allowed packages and report to Slack"
)]
struct Cli {
    /// Path to config.json
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Send the installation completion notification and exit
    #[arg(long)]
    install_complete: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;

    init_logging(cli.verbose, &config.telemetry);

    let executor: Arc<dyn Executor> = Arc::new(LocalExecutor::new());
    let notifier = SlackNotifier::new(config.webhook());
    if !notifier.is_configured() {
        info!("No webhook configured; reports will only be logged locally");
    }

    if cli.install_complete {
        if !announce_install(executor.as_ref(), &notifier).await {
            warn!("Installation notification was not delivered");
        }
        return Ok(());
    }

    let delivered = run_update_check(
        &Detector::new(),
        executor,
        &config.allow_list(),
        &notifier,
    )
    .await?;

    if !delivered {
        warn!("Update report was not delivered");
    }

    Ok(())
}

/// Console logging plus, when configured, an append-only log file.
fn init_logging(verbose: bool, telemetry: &Telemetry) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_directive(&telemetry.log_level)))
    };

    let file_layer = telemetry.log_file.as_deref().and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
            Err(e) => {
                eprintln!("Cannot open log file {}: {}", path, e);
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .with(filter)
        .init();
}

/// Map config levels (`DEBUG`, `INFO`, `WARN`/`WARNING`, `ERROR`) to filter directives.
fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("Warning"), "warn");
        assert_eq!(level_directive(" error "), "error");
        assert_eq!(level_directive(""), "info");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["update-noti"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.install_complete);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "update-noti",
            "--config",
            "/etc/update-noti.json",
            "--install-complete",
            "-v",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/update-noti.json"));
        assert!(cli.install_complete);
        assert!(cli.verbose);
    }
}
