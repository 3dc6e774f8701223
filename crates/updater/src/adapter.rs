//! Package manager adapter.
//!
//! Binds a manager's [`CommandSet`] and output parser to an [`Executor`] and
//! exposes the two operations the updater needs: list what can be upgraded
//! and upgrade one package.

use crate::commands::{command_set, CommandSet};
use crate::executor::Executor;
use crate::parsers;
use std::sync::Arc;
use tracing::{debug, info, warn};
use update_noti_common::{PackageManagerKind, PackageName, UpdateResult, UpgradableSet};

/// Result of asking the manager for upgradable packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The manager answered; possibly with nothing to upgrade.
    Packages(UpgradableSet),
    /// The manager could not be queried. Not the same as "up to date".
    Unavailable { reason: String },
}

impl Listing {
    /// Upgradable packages, empty when the listing was unavailable.
    pub fn packages(&self) -> &[PackageName] {
        match self {
            Listing::Packages(packages) => packages,
            Listing::Unavailable { .. } => &[],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Listing::Unavailable { .. })
    }
}

/// One detected package manager, ready to list and upgrade packages.
pub struct PackageManager {
    commands: Box<dyn CommandSet>,
    executor: Arc<dyn Executor>,
}

impl PackageManager {
    pub fn new(kind: PackageManagerKind, executor: Arc<dyn Executor>) -> Self {
        Self {
            commands: command_set(kind),
            executor,
        }
    }

    pub fn kind(&self) -> PackageManagerKind {
        self.commands.kind()
    }

    /// List upgradable packages in the manager's native order.
    ///
    /// Never fails the run: spawn errors and unexpected exit codes without
    /// parseable output yield [`Listing::Unavailable`].
    ///
    /// On an unexpected exit code with some parseable stdout the parsed names
    /// are kept, so error text the manager prints to stdout (a dnf `Error:`
    /// line, say) shows up as an upgradable package.
    pub async fn list_upgradable(&self) -> Listing {
        let spec = self.commands.list_upgradable_cmd();
        info!("Listing upgradable packages: {}", spec);

        let output = match self.executor.execute(spec.program, &spec.arg_refs()).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to run {}: {:#}", spec, e);
                return Listing::Unavailable {
                    reason: format!("{:#}", e),
                };
            }
        };

        let packages = match parsers::parse_upgradable(&output.stdout, self.kind()) {
            Ok(packages) => packages,
            Err(e) => {
                warn!("Failed to parse output of {}: {:#}", spec, e);
                Vec::new()
            }
        };

        let exit_ok = output
            .exit_code
            .is_some_and(|code| self.commands.listing_exit_ok(code));

        if !exit_ok {
            let status = output
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            if packages.is_empty() {
                warn!(
                    "{} exited with {} and no parseable output: {}",
                    spec,
                    status,
                    output.stderr.trim()
                );
                return Listing::Unavailable {
                    reason: format!("{} exited with {}", spec, status),
                };
            }
            warn!(
                "{} exited with {}; keeping {} parsed packages",
                spec,
                status,
                packages.len()
            );
        }

        debug!("Upgradable: {:?}", packages);
        Listing::Packages(packages)
    }

    /// Upgrade exactly one package, non-interactively.
    ///
    /// Failures are reported as [`UpdateResult::Failed`] and never propagate.
    pub async fn apply_upgrade(&self, package: &PackageName) -> UpdateResult {
        let Some(spec) = self.commands.upgrade_cmd(package) else {
            warn!("Refusing to upgrade suspicious package name {:?}", package.as_str());
            return UpdateResult::Failed;
        };

        info!("Upgrading {}: {}", package, spec);
        match self.executor.execute(spec.program, &spec.arg_refs()).await {
            Ok(output) if output.success() => {
                info!("Upgraded {}", package);
                UpdateResult::Updated
            }
            Ok(output) => {
                warn!(
                    "Upgrade of {} failed with exit code {:?}: {}",
                    package,
                    output.exit_code,
                    output.stderr.trim()
                );
                UpdateResult::Failed
            }
            Err(e) => {
                warn!("Upgrade of {} could not run: {:#}", package, e);
                UpdateResult::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::fake::FakeExecutor;

    fn manager(
        kind: PackageManagerKind,
        executor: FakeExecutor,
    ) -> (PackageManager, Arc<FakeExecutor>) {
        let executor = Arc::new(executor);
        (PackageManager::new(kind, executor.clone()), executor)
    }

    #[tokio::test]
    async fn test_list_apt() {
        let fake = FakeExecutor::new().respond(
            "apt list --upgradable",
            0,
            "Listing... Done\nvim/jammy 2:8.2 amd64 [upgradable from: 2:8.1]\n",
        );
        let (pm, _) = manager(PackageManagerKind::Apt, fake);
        assert_eq!(
            pm.list_upgradable().await,
            Listing::Packages(vec![PackageName::from("vim")])
        );
    }

    #[tokio::test]
    async fn test_list_dnf_exit_100_is_normal() {
        let fake = FakeExecutor::new().respond(
            "dnf check-update",
            100,
            "\nkernel.x86_64   6.7.6-200.fc39   updates\n",
        );
        let (pm, _) = manager(PackageManagerKind::Dnf, fake);
        assert_eq!(pm.list_upgradable().await.packages().len(), 1);
    }

    #[tokio::test]
    async fn test_list_pacman_nothing_to_upgrade() {
        let fake = FakeExecutor::new().respond("pacman -Qu", 1, "");
        let (pm, _) = manager(PackageManagerKind::Pacman, fake);
        assert_eq!(pm.list_upgradable().await, Listing::Packages(vec![]));
    }

    #[tokio::test]
    async fn test_list_failure_without_output_is_unavailable() {
        let fake = FakeExecutor::new().respond("dnf check-update", 1, "");
        let (pm, _) = manager(PackageManagerKind::Dnf, fake);
        let listing = pm.list_upgradable().await;
        assert!(listing.is_unavailable());
        assert!(listing.packages().is_empty());
    }

    #[tokio::test]
    async fn test_list_spawn_failure_is_unavailable() {
        let (pm, _) = manager(PackageManagerKind::Zypper, FakeExecutor::new());
        assert!(pm.list_upgradable().await.is_unavailable());
    }

    #[tokio::test]
    async fn test_list_failure_with_output_keeps_packages() {
        let fake = FakeExecutor::new().respond(
            "apt list --upgradable",
            100,
            "Listing... Done\ncurl/jammy 7.81 amd64 [upgradable from: 7.80]\n",
        );
        let (pm, _) = manager(PackageManagerKind::Apt, fake);
        assert_eq!(
            pm.list_upgradable().await,
            Listing::Packages(vec![PackageName::from("curl")])
        );
    }

    #[tokio::test]
    async fn test_apply_upgrade_outcomes() {
        let fake = FakeExecutor::new()
            .respond("pacman -S --noconfirm linux", 0, "")
            .respond("pacman -S --noconfirm glibc", 1, "");
        let (pm, executor) = manager(PackageManagerKind::Pacman, fake);

        assert_eq!(
            pm.apply_upgrade(&PackageName::from("linux")).await,
            UpdateResult::Updated
        );
        assert_eq!(
            pm.apply_upgrade(&PackageName::from("glibc")).await,
            UpdateResult::Failed
        );
        // Not scripted: the executor reports a spawn failure.
        assert_eq!(
            pm.apply_upgrade(&PackageName::from("mesa")).await,
            UpdateResult::Failed
        );
        assert_eq!(executor.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_apply_upgrade_rejects_option_like_name() {
        let (pm, executor) = manager(PackageManagerKind::Apt, FakeExecutor::new());
        assert_eq!(
            pm.apply_upgrade(&PackageName::from("--purge")).await,
            UpdateResult::Failed
        );
        assert!(executor.calls().is_empty());
    }
}
