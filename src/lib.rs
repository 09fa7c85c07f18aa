//! Core library of the knowledge base.
//!
//! This crate exposes the domain model, forms, key-value repositories and
//! service functions behind a role-gated FAQ: accounts with an admin/user
//! split, a two-level category tree and searchable articles. State is kept
//! as JSON documents in a key-value store, either in memory or in SQLite.

#[cfg(feature = "data")]
use crate::domain::types::Role;

#[cfg(feature = "sqlite")]
pub mod bootstrap;
#[cfg(feature = "sqlite")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "data")]
pub mod seed;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "data")]
pub mod state;

/// Role required for every catalogue and account mutation.
#[cfg(feature = "data")]
pub const ADMIN_ROLE: Role = Role::Admin;
