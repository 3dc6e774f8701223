//! Run reports and their text rendering.

use crate::config::{DEFAULT_CONFIG_PATH, INSTALL_DIR};
use crate::orchestrator::UpdateOutcome;
use crate::sysinfo::SystemInfo;
use std::fmt::Write;
use update_noti_common::{PackageManagerKind, PackageName, UpgradableSet};

/// Above this many upgradable packages the list is rendered inline.
pub const AVAILABLE_INLINE_THRESHOLD: usize = 10;

/// Above this many auto-updated packages the list is rendered inline.
pub const UPDATED_INLINE_THRESHOLD: usize = 5;

const RULE_WIDTH: usize = 40;

/// What a report is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    UpdateCheck {
        manager: PackageManagerKind,
        upgradable: UpgradableSet,
        updated: Vec<PackageName>,
        /// Set when the manager could not be queried.
        listing_unavailable: bool,
    },
    InstallComplete,
}

/// Immutable summary of one run, sent to the notification endpoint once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    system: SystemInfo,
    kind: ReportKind,
}

impl Report {
    pub fn update_check(
        system: SystemInfo,
        manager: PackageManagerKind,
        outcome: &UpdateOutcome,
    ) -> Self {
        Self {
            system,
            kind: ReportKind::UpdateCheck {
                manager,
                upgradable: outcome.upgradable().to_vec(),
                updated: outcome.updated(),
                listing_unavailable: outcome.listing.is_unavailable(),
            },
        }
    }

    pub fn install_complete(system: SystemInfo) -> Self {
        Self {
            system,
            kind: ReportKind::InstallComplete,
        }
    }

    pub fn system(&self) -> &SystemInfo {
        &self.system
    }

    pub fn kind(&self) -> &ReportKind {
        &self.kind
    }

    /// Render the human-readable message body.
    pub fn render(&self) -> String {
        match &self.kind {
            ReportKind::UpdateCheck {
                manager,
                upgradable,
                updated,
                listing_unavailable,
            } => self.render_update_check(*manager, upgradable, updated, *listing_unavailable),
            ReportKind::InstallComplete => self.render_install_complete(),
        }
    }

    fn render_update_check(
        &self,
        manager: PackageManagerKind,
        upgradable: &[PackageName],
        updated: &[PackageName],
        listing_unavailable: bool,
    ) -> String {
        let mut msg = header("SYSTEM UPDATE CHECK");
        self.write_host_block(&mut msg);
        let _ = writeln!(msg, "📦 Package Manager: `{}`", manager);
        msg.push_str(&rule());

        if upgradable.is_empty() {
            if listing_unavailable {
                msg.push_str("❓ STATUS: Could not determine available updates");
            } else {
                msg.push_str("✅ STATUS: All packages are up to date! 🎉");
            }
            msg.push_str(&footer());
            return msg;
        }

        let _ = writeln!(msg, "🔄 AVAILABLE UPDATES ({}):", upgradable.len());
        msg.push_str(&package_block(upgradable, "•", AVAILABLE_INLINE_THRESHOLD));
        msg.push_str(&rule());

        if updated.is_empty() {
            msg.push_str("⚠️ STATUS: Updates available but none auto-updated");
        } else {
            let _ = writeln!(msg, "🛠️ AUTO-UPDATED ({}):", updated.len());
            msg.push_str(&package_block(updated, "✅", UPDATED_INLINE_THRESHOLD));
            msg.push_str(&rule());
            msg.push_str("✅ STATUS: Updates completed successfully! 🚀");
        }

        msg.push_str(&footer());
        msg
    }

    fn render_install_complete(&self) -> String {
        let mut msg = header("UPDATE-NOTI INSTALLED!");
        self.write_host_block(&mut msg);
        let _ = writeln!(msg, "📍 Location: `{}`", INSTALL_DIR);
        msg.push_str("📦 Method: Binary from GitHub releases\n");
        msg.push_str("✅ Status: Installation completed successfully! 🚀\n");
        msg.push_str(&rule());
        msg.push_str("⏰ Schedule: Daily at 01:00 + boot backup\n");
        msg.push_str("🔄 Auto-update: Enabled\n");
        let _ = write!(msg, "📝 Config: `{}`", DEFAULT_CONFIG_PATH);
        msg.push_str(&footer());
        msg
    }

    fn write_host_block(&self, msg: &mut String) {
        let sys = &self.system;
        let _ = writeln!(msg, "📅 Time: `{}`", sys.time);
        let _ = writeln!(msg, "🖥️ Host: `{}` (`{}`)", sys.hostname, sys.ip);
        let _ = writeln!(msg, "💻 OS: `{}`", sys.os);
        let _ = writeln!(msg, "⏰ Uptime: `{}`", sys.uptime);
    }
}

fn rule() -> String {
    let mut line = "━".repeat(RULE_WIDTH);
    line.push('\n');
    line
}

fn header(title: &str) -> String {
    format!("{rule}🔍 *{title}* 🔍\n{rule}", rule = rule(), title = title)
}

fn footer() -> String {
    format!("\n{}", "━".repeat(RULE_WIDTH))
}

/// One bulleted line per package up to `threshold`, a single inline line above.
fn package_block(packages: &[PackageName], bullet: &str, threshold: usize) -> String {
    if packages.len() <= threshold {
        packages
            .iter()
            .map(|p| format!("  {} `{}`\n", bullet, p))
            .collect()
    } else {
        let joined: Vec<&str> = packages.iter().map(PackageName::as_str).collect();
        format!("`{}`\n", joined.join(", "))
    }
}
