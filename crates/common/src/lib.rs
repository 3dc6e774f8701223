//! Common types shared across update-noti crates.

pub mod error;
pub mod manager;
pub mod package;
pub mod timestamp;

pub use error::{Error, Result};
pub use manager::PackageManagerKind;
pub use package::{AllowList, PackageName, UpdateResult, UpgradableSet};
pub use timestamp::Timestamp;
