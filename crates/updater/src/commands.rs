//! Package-manager command sets.
//!
//! Every command the updater may run against a package manager is defined
//! here, one implementation per supported manager.

use crate::executor::command_line;
use update_noti_common::{PackageManagerKind, PackageName};

/// A program plus its arguments, spawned without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl CommandSpec {
    fn new(program: &'static str, args: &[&str]) -> Self {
        Self {
            program,
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&command_line(self.program, &self.arg_refs()))
    }
}

/// Trait for per-manager command sets.
pub trait CommandSet: Send + Sync {
    fn kind(&self) -> PackageManagerKind;

    /// Command that lists upgradable packages.
    fn list_upgradable_cmd(&self) -> CommandSpec;

    /// Non-interactive upgrade of exactly one package.
    ///
    /// Returns `None` for names that could be mistaken for options.
    fn upgrade_cmd(&self, package: &PackageName) -> Option<CommandSpec>;

    /// Whether `code` is a normal exit for the listing command.
    fn listing_exit_ok(&self, code: i32) -> bool {
        code == 0
    }
}

/// Debian/Ubuntu family.
pub struct AptCommands;

impl CommandSet for AptCommands {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Apt
    }

    fn list_upgradable_cmd(&self) -> CommandSpec {
        CommandSpec::new("apt", &["list", "--upgradable"])
    }

    fn upgrade_cmd(&self, package: &PackageName) -> Option<CommandSpec> {
        single_package("apt-get", &["install", "-y"], package)
    }
}

/// Fedora/RHEL 8+ family.
pub struct DnfCommands;

impl CommandSet for DnfCommands {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Dnf
    }

    fn list_upgradable_cmd(&self) -> CommandSpec {
        CommandSpec::new("dnf", &["check-update"])
    }

    fn upgrade_cmd(&self, package: &PackageName) -> Option<CommandSpec> {
        single_package("dnf", &["upgrade", "-y"], package)
    }

    fn listing_exit_ok(&self, code: i32) -> bool {
        // 100: updates are available
        code == 0 || code == 100
    }
}

/// RHEL/CentOS 7 family.
pub struct YumCommands;

impl CommandSet for YumCommands {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Yum
    }

    fn list_upgradable_cmd(&self) -> CommandSpec {
        CommandSpec::new("yum", &["check-update"])
    }

    fn upgrade_cmd(&self, package: &PackageName) -> Option<CommandSpec> {
        single_package("yum", &["update", "-y"], package)
    }

    fn listing_exit_ok(&self, code: i32) -> bool {
        code == 0 || code == 100
    }
}

/// Arch family.
pub struct PacmanCommands;

impl CommandSet for PacmanCommands {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Pacman
    }

    fn list_upgradable_cmd(&self) -> CommandSpec {
        CommandSpec::new("pacman", &["-Qu"])
    }

    fn upgrade_cmd(&self, package: &PackageName) -> Option<CommandSpec> {
        single_package("pacman", &["-S", "--noconfirm"], package)
    }

    fn listing_exit_ok(&self, code: i32) -> bool {
        // 1: nothing to upgrade
        code == 0 || code == 1
    }
}

/// openSUSE/SLES family.
pub struct ZypperCommands;

impl CommandSet for ZypperCommands {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Zypper
    }

    fn list_upgradable_cmd(&self) -> CommandSpec {
        CommandSpec::new("zypper", &["list-updates"])
    }

    fn upgrade_cmd(&self, package: &PackageName) -> Option<CommandSpec> {
        single_package("zypper", &["--non-interactive", "update"], package)
    }

    fn listing_exit_ok(&self, code: i32) -> bool {
        // 100..=103: informational codes (updates/patches pending, restart needed)
        code == 0 || (100..=103).contains(&code)
    }
}

/// Command set for the given manager.
pub fn command_set(kind: PackageManagerKind) -> Box<dyn CommandSet> {
    match kind {
        PackageManagerKind::Apt => Box::new(AptCommands),
        PackageManagerKind::Dnf => Box::new(DnfCommands),
        PackageManagerKind::Yum => Box::new(YumCommands),
        PackageManagerKind::Pacman => Box::new(PacmanCommands),
        PackageManagerKind::Zypper => Box::new(ZypperCommands),
    }
}

fn single_package(
    program: &'static str,
    leading: &[&str],
    package: &PackageName,
) -> Option<CommandSpec> {
    if !is_safe_package_name(package.as_str()) {
        return None;
    }
    let mut spec = CommandSpec::new(program, leading);
    spec.args.push(package.to_string());
    Some(spec)
}

/// Validate that a package name cannot be read as an option.
fn is_safe_package_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() < 256
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | ':' | '@' | '~'))
}
