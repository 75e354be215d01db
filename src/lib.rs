//! Roommate ledger: a household service for roommates, chores, and bills.
//!
//! The interesting logic lives in [`ledger`]: splitting a bill equally across
//! the roster snapshot and the "due in the next N days" dashboard window.
//! [`api`] exposes it over HTTP, [`db`] persists it in SQLite.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
