//! Domain models for the roommate ledger.
//!
//! # Stored Entities
//!
//! - [`Roommate`]: A member of the household. Created once, never edited.
//! - [`Bill`]: A shared expense with its [`Split`]s, materialized from the roster
//!   snapshot taken when the bill was created.
//! - [`Chore`]: A household task with zero or more assignees and a one-way
//!   completion flag.
//!
//! # Read Projections
//!
//! Views resolve roommate references into display names. They are pure
//! functions of stored state (see [`crate::ledger`]):
//!
//! - [`BillView`] / [`SplitView`]
//! - [`ChoreView`] (dashboard shape, first assignee only) and [`ChoreDetail`]
//! - [`Upcoming`] and [`RoommateSummary`]
//!
//! All wire shapes use camelCase keys.

mod bill;
mod chore;
mod dashboard;
mod roommate;

pub use bill::*;
pub use chore::*;
pub use dashboard::*;
pub use roommate::*;
