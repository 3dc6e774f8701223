//! End-to-end runs: detect, update, report.

use crate::adapter::PackageManager;
use crate::detector::Detector;
use crate::executor::Executor;
use crate::notifier::Notifier;
use crate::orchestrator::Orchestrator;
use crate::report::Report;
use crate::sysinfo::SystemProbe;
use std::sync::Arc;
use tracing::{info, warn};
use update_noti_common::{AllowList, Error, Result};

/// Full check → update → notify pass.
///
/// Only a missing package manager is an error; the returned flag is the
/// notifier's delivery result and does not affect the caller's exit status.
pub async fn run_update_check(
    detector: &Detector,
    executor: Arc<dyn Executor>,
    allow_list: &AllowList,
    notifier: &dyn Notifier,
) -> Result<bool> {
    let kind = detector.detect().ok_or(Error::NoPackageManager)?;
    info!("Detected package manager: {}", kind);

    let system = SystemProbe::new(executor.as_ref()).collect().await;
    let manager = PackageManager::new(kind, executor);
    let outcome = Orchestrator::new(&manager, allow_list).run().await;

    let failed = outcome.failed();
    if !failed.is_empty() {
        warn!("{} package(s) failed to update: {:?}", failed.len(), failed);
    }

    let report = Report::update_check(system, kind, &outcome);
    Ok(notifier.send(&report).await)
}

/// Send the one-off installation announcement.
pub async fn announce_install(executor: &dyn Executor, notifier: &dyn Notifier) -> bool {
    let system = SystemProbe::new(executor).collect().await;
    notifier.send(&Report::install_complete(system)).await
}
