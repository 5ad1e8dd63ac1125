//! Core planner functionality shared by the library and the CLI

pub mod config;
pub mod i18n;
pub mod models;
pub mod planner;
pub mod storage;
pub mod transfer;

/// Returns the current version of the `study-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
