//! update-noti core - package update detection, automatic upgrades and
//! reporting.

pub mod adapter;
pub mod commands;
pub mod config;
pub mod detector;
pub mod executor;
pub mod notifier;
pub mod orchestrator;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod sysinfo;
