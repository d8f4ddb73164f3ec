//! # repairtrack-store
//!
//! Local persistence for repairtrack, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` and provides typed CRUD helpers for service orders
//! and service providers, plus an [`ImageStore`] that keeps uploaded photos on
//! disk and hands out public URIs for them.

pub mod database;
pub mod images;
pub mod migrations;
pub mod orders;
pub mod providers;

mod convert;
mod error;

pub use database::Database;
pub use error::StoreError;
pub use images::ImageStore;
