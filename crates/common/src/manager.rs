//! Package manager kind definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported package manager families.
///
/// Fixed for the lifetime of a run once detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
}

impl PackageManagerKind {
    /// All kinds, in detection priority order.
    pub const PRIORITY: [PackageManagerKind; 5] = [
        PackageManagerKind::Apt,
        PackageManagerKind::Dnf,
        PackageManagerKind::Yum,
        PackageManagerKind::Pacman,
        PackageManagerKind::Zypper,
    ];

    /// Name of the executable whose presence marks this manager.
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManagerKind::Apt => "apt",
            PackageManagerKind::Dnf => "dnf",
            PackageManagerKind::Yum => "yum",
            PackageManagerKind::Pacman => "pacman",
            PackageManagerKind::Zypper => "zypper",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}
