//! Storage-facing record shapes and configuration.

pub mod category;
pub mod config;
#[cfg(feature = "sqlite")]
pub mod entry;
