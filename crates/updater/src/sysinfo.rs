//! Best-effort host facts for the report header.

use crate::executor::Executor;
use std::path::{Path, PathBuf};
use tokio::net::UdpSocket;
use tracing::debug;
use update_noti_common::Timestamp;

/// Placeholder for facts that could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// Snapshot of the host, taken once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub time: Timestamp,
    pub hostname: String,
    pub ip: String,
    pub os: String,
    pub uptime: String,
}

/// Collects [`SystemInfo`] through an [`Executor`].
pub struct SystemProbe<'a> {
    executor: &'a dyn Executor,
    hostname_path: PathBuf,
    uptime_path: PathBuf,
}

impl<'a> SystemProbe<'a> {
    pub fn new(executor: &'a dyn Executor) -> Self {
        Self {
            executor,
            hostname_path: PathBuf::from("/proc/sys/kernel/hostname"),
            uptime_path: PathBuf::from("/proc/uptime"),
        }
    }

    pub fn with_hostname_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.hostname_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_uptime_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.uptime_path = path.as_ref().to_path_buf();
        self
    }

    /// Gather every field; failures degrade to [`UNKNOWN`] and never error.
    pub async fn collect(&self) -> SystemInfo {
        SystemInfo {
            time: Timestamp::now(),
            hostname: self.hostname().await,
            ip: outbound_ip().await.unwrap_or_else(|| UNKNOWN.to_string()),
            os: self.os_description().await,
            uptime: self.uptime().await,
        }
    }

    /// Kernel hostname, then `uname -n`, then the `hostname` binary, which
    /// minimal Arch and Fedora installs lack.
    async fn hostname(&self) -> String {
        if let Some(name) = self.read_trimmed(&self.hostname_path).await {
            return name;
        }
        if let Some(name) = self.command_stdout("uname", &["-n"]).await {
            return name;
        }
        self.command_stdout("hostname", &[])
            .await
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    async fn read_trimmed(&self, path: &Path) -> Option<String> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let value = content.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            Err(e) => {
                debug!("Cannot read {:?}: {}", path, e);
                None
            }
        }
    }

    async fn os_description(&self) -> String {
        let release = self
            .command_stdout("uname", &["-r"])
            .await
            .unwrap_or_else(|| std::env::consts::ARCH.to_string());
        format!("{} {}", std::env::consts::OS, release)
    }

    async fn uptime(&self) -> String {
        match tokio::fs::read_to_string(&self.uptime_path).await {
            Ok(content) => parse_uptime(&content).unwrap_or_else(|| UNKNOWN.to_string()),
            Err(e) => {
                debug!("Cannot read {:?}: {}", self.uptime_path, e);
                UNKNOWN.to_string()
            }
        }
    }

    async fn command_stdout(&self, program: &str, args: &[&str]) -> Option<String> {
        match self.executor.execute(program, args).await {
            Ok(output) if output.success() => {
                let value = output.stdout.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            Ok(output) => {
                debug!("{} exited with {:?}", program, output.exit_code);
                None
            }
            Err(e) => {
                debug!("{} failed: {:#}", program, e);
                None
            }
        }
    }
}

/// Local address the host would use to reach the internet.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
async fn outbound_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").await.ok()?;
    socket.connect("8.8.8.8:80").await.ok()?;
    socket.local_addr().ok().map(|addr| addr.ip().to_string())
}

/// Whole hours from the first field of `/proc/uptime`, rendered as `"<n>h"`.
pub fn parse_uptime(content: &str) -> Option<String> {
    let seconds: f64 = content.split_whitespace().next()?.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(format!("{}h", (seconds / 3600.0).floor() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::fake::FakeExecutor;
    use tempfile::tempdir;

    #[test]
    fn test_parse_uptime() {
        assert_eq!(parse_uptime("12345.67 45678.90\n"), Some("3h".to_string()));
        assert_eq!(parse_uptime("59.0 1.0"), Some("0h".to_string()));
        assert_eq!(parse_uptime("90000 1"), Some("25h".to_string()));
        assert_eq!(parse_uptime(""), None);
        assert_eq!(parse_uptime("garbage"), None);
    }

    #[tokio::test]
    async fn test_collect_with_fake_commands() {
        let dir = tempdir().unwrap();
        let uptime = dir.path().join("uptime");
        std::fs::write(&uptime, "7300.5 100.0\n").unwrap();

        let executor = FakeExecutor::new()
            .respond("hostname", 0, "web-01\n")
            .respond("uname -r", 0, "6.1.0-18-amd64\n");
        let info = SystemProbe::new(&executor)
            .with_hostname_path(dir.path().join("missing-hostname"))
            .with_uptime_path(&uptime)
            .collect()
            .await;

        assert_eq!(info.hostname, "web-01");
        assert_eq!(info.os, format!("{} 6.1.0-18-amd64", std::env::consts::OS));
        assert_eq!(info.uptime, "2h");
        assert!(!info.ip.is_empty());
    }

    #[tokio::test]
    async fn test_collect_degrades_to_unknown() {
        let dir = tempdir().unwrap();
        let executor = FakeExecutor::new();
        let info = SystemProbe::new(&executor)
            .with_hostname_path(dir.path().join("missing-hostname"))
            .with_uptime_path(dir.path().join("missing"))
            .collect()
            .await;

        assert_eq!(info.hostname, UNKNOWN);
        assert_eq!(
            info.os,
            format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
        );
        assert_eq!(info.uptime, UNKNOWN);
    }

    #[tokio::test]
    async fn test_hostname_prefers_kernel_value() {
        let dir = tempdir().unwrap();
        let kernel = dir.path().join("hostname");
        std::fs::write(&kernel, "vm\n").unwrap();

        let executor = FakeExecutor::new()
            .respond("uname -n", 0, "other\n")
            .respond("hostname", 0, "third\n");
        let info = SystemProbe::new(&executor)
            .with_hostname_path(&kernel)
            .collect()
            .await;

        assert_eq!(info.hostname, "vm");
        assert!(!executor.calls().iter().any(|c| c == "uname -n" || c == "hostname"));
    }

    #[tokio::test]
    async fn test_hostname_falls_back_to_uname_without_hostname_binary() {
        let dir = tempdir().unwrap();
        // Only coreutils available: no `hostname` scripted.
        let executor = FakeExecutor::new().respond("uname -n", 0, "vm\n");
        let info = SystemProbe::new(&executor)
            .with_hostname_path(dir.path().join("missing-hostname"))
            .collect()
            .await;

        assert_eq!(info.hostname, "vm");
        assert!(!executor.calls().iter().any(|c| c == "hostname"));
    }

    #[tokio::test]
    async fn test_hostname_falls_back_to_hostname_binary() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("hostname");
        std::fs::write(&empty, "\n").unwrap();

        let executor = FakeExecutor::new()
            .respond("uname -n", 1, "")
            .respond("hostname", 0, "legacy-box\n");
        let info = SystemProbe::new(&executor)
            .with_hostname_path(&empty)
            .collect()
            .await;

        assert_eq!(info.hostname, "legacy-box");
        let calls = executor.calls();
        let uname = calls.iter().position(|c| c == "uname -n").unwrap();
        let hostname = calls.iter().position(|c| c == "hostname").unwrap();
        assert!(uname < hostname);
    }
}
