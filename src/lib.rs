//! Shared library for `StudyPlanner`
//! Contains the planning core used by the `studyplan` CLI

pub mod core;
pub mod logger;

pub use core::{config, get_version};
