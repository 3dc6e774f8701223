//! Parsers for package-manager "list upgradable" outputs.
//!
//! Each manager prints its own dialect; these functions reduce it to bare
//! package names in the order the manager printed them.

use anyhow::Result;
use regex::Regex;
use update_noti_common::{PackageManagerKind, PackageName};

/// Banner lines printed by `dnf check-update` ahead of the package table.
pub const DNF_BANNER_PREFIXES: &[&str] = &["Last metadata expiration", "Obsoleting Packages"];

/// Banner lines printed by `yum check-update` ahead of the package table.
pub const YUM_BANNER_PREFIXES: &[&str] = &["Loaded plugins", "Obsoleting Packages"];

/// Parse upgradable packages for the given manager.
pub fn parse_upgradable(output: &str, kind: PackageManagerKind) -> Result<Vec<PackageName>> {
    match kind {
        PackageManagerKind::Apt => parse_apt_upgradable(output),
        PackageManagerKind::Dnf => parse_rpm_check_update(output, DNF_BANNER_PREFIXES),
        PackageManagerKind::Yum => parse_rpm_check_update(output, YUM_BANNER_PREFIXES),
        PackageManagerKind::Pacman => parse_pacman_upgradable(output),
        PackageManagerKind::Zypper => parse_zypper_upgradable(output),
    }
}

fn parse_apt_upgradable(output: &str) -> Result<Vec<PackageName>> {
    let mut packages = Vec::new();

    // First line is the "Listing..." header
    for line in output.lines().skip(1) {
        if line.is_empty() {
            continue;
        }
        // Format: name/suite version arch [upgradable from: old]
        let name = line.split('/').next().unwrap_or_default();
        if !name.is_empty() {
            packages.push(PackageName::from(name));
        }
    }

    Ok(packages)
}

fn parse_rpm_check_update(output: &str, banner_prefixes: &[&str]) -> Result<Vec<PackageName>> {
    let alternatives: Vec<String> = banner_prefixes.iter().map(|p| regex::escape(p)).collect();
    let banner = Regex::new(&format!("^(?:{})", alternatives.join("|")))?;

    let mut packages = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() || banner.is_match(line) {
            continue;
        }
        // Format: name.arch version repo
        if let Some(first) = line.split_whitespace().next() {
            if !first.starts_with('=') {
                packages.push(PackageName::from(first));
            }
        }
    }

    Ok(packages)
}

fn parse_pacman_upgradable(output: &str) -> Result<Vec<PackageName>> {
    let mut packages = Vec::new();

    for line in output.lines() {
        // Format: name old -> new
        if let Some(name) = line.split_whitespace().next() {
            packages.push(PackageName::from(name));
        }
    }

    Ok(packages)
}

fn parse_zypper_upgradable(output: &str) -> Result<Vec<PackageName>> {
    let mut packages = Vec::new();
    let mut seen_header = false;

    // Format: S | Repository | Name | Current Version | Available Version | Arch
    for line in output.lines() {
        if !line.contains('|') {
            continue;
        }
        if !seen_header {
            seen_header = true;
            continue;
        }

        let parts: Vec<&str> = line.split('|').collect();
        if let Some(name) = parts.get(2).map(|s| s.trim()) {
            if !name.is_empty() {
                packages.push(PackageName::from(name));
            }
        }
    }

    Ok(packages)
}
