//! Update orchestration: list, filter by allow-list, apply one by one.

use crate::adapter::{Listing, PackageManager};
use tracing::{info, warn};
use update_noti_common::{AllowList, PackageName, UpdateResult};

/// Everything a run learned and did, in attempt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub listing: Listing,
    pub attempts: Vec<(PackageName, UpdateResult)>,
}

impl UpdateOutcome {
    pub fn upgradable(&self) -> &[PackageName] {
        self.listing.packages()
    }

    /// Packages whose upgrade succeeded.
    pub fn updated(&self) -> Vec<PackageName> {
        self.with_result(UpdateResult::Updated)
    }

    pub fn failed(&self) -> Vec<PackageName> {
        self.with_result(UpdateResult::Failed)
    }

    fn with_result(&self, wanted: UpdateResult) -> Vec<PackageName> {
        self.attempts
            .iter()
            .filter(|(_, result)| *result == wanted)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Drives one check-and-update pass against a detected manager.
pub struct Orchestrator<'a> {
    manager: &'a PackageManager,
    allow_list: &'a AllowList,
}

impl<'a> Orchestrator<'a> {
    pub fn new(manager: &'a PackageManager, allow_list: &'a AllowList) -> Self {
        Self {
            manager,
            allow_list,
        }
    }

    /// Run the pass.
    ///
    /// Upgrades run sequentially in listing order; package managers hold an
    /// exclusive lock, so there is nothing to gain from concurrency. A failed
    /// package does not stop the remaining ones and is never retried.
    pub async fn run(&self) -> UpdateOutcome {
        let listing = self.manager.list_upgradable().await;

        if listing.packages().is_empty() {
            if listing.is_unavailable() {
                warn!("Upgradable packages could not be determined; skipping updates");
            } else {
                info!("All packages are up to date");
            }
            return UpdateOutcome {
                listing,
                attempts: Vec::new(),
            };
        }

        let to_update = self.allow_list.select(listing.packages());
        info!(
            "{} upgradable, {} allowed for automatic update",
            listing.packages().len(),
            to_update.len()
        );

        let mut attempts = Vec::with_capacity(to_update.len());
        for package in to_update {
            let result = self.manager.apply_upgrade(&package).await;
            attempts.push((package, result));
        }

        UpdateOutcome { listing, attempts }
    }
}
