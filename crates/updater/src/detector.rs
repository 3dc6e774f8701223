//! Package manager detection.

use std::path::{Path, PathBuf};
use tracing::debug;
use update_noti_common::PackageManagerKind;

/// Directory, relative to the filesystem root, probed for manager binaries.
const BIN_DIR: &str = "usr/bin";

/// Finds the host's package manager by probing well-known executable paths.
#[derive(Debug, Clone)]
pub struct Detector {
    root: PathBuf,
}

impl Detector {
    /// Detector for the running host.
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Detector probing below `root` instead of `/`.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path whose existence marks `kind` as installed.
    pub fn marker_path(&self, kind: PackageManagerKind) -> PathBuf {
        self.root.join(BIN_DIR).join(kind.binary())
    }

    /// First manager present in priority order (apt, dnf, yum, pacman, zypper).
    pub fn detect(&self) -> Option<PackageManagerKind> {
        PackageManagerKind::PRIORITY.into_iter().find(|kind| {
            let path = self.marker_path(*kind);
            let found = path.exists();
            debug!("Probing {:?}: {}", path, if found { "found" } else { "absent" });
            found
        })
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
