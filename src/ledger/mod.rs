//! The ledger core and its service facade.
//!
//! # Responsibility
//! - [`allocator`]: validate bill input and split the amount across a roster.
//! - [`upcoming`]: filter chores and bills into the dashboard window.
//! - [`tracker`]: per-roommate chores done and money owed.
//! - [`Ledger`]: load data from the [`Database`], run the pure core, persist.
//!
//! # Invariants
//! - The core never caches roster state; every call reads it fresh.
//! - Multi-row writes are delegated to single store transactions.

pub mod allocator;
pub mod chores;
pub mod dates;
pub mod money;
pub mod projection;
pub mod roster;
pub mod tracker;
pub mod upcoming;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::Database;
use crate::error::{LedgerError, Result};
use crate::models::*;

use projection::{project_bill, project_chore_detail};
use roster::RosterIndex;

/// Service facade over the store. Cheap to clone.
#[derive(Clone)]
pub struct Ledger {
    db: Database,
}

impl Ledger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // ============================================================
    // Roommates
    // ============================================================

    pub fn create_roommate(&self, input: CreateRoommateInput) -> Result<Roommate> {
        let roommate = roster::new_roommate(input)?;
        self.db.insert_roommate(&roommate)?;
        tracing::info!(roommate_id = %roommate.id, "Added roommate {}", roommate.name);
        Ok(roommate)
    }

    pub fn list_roommates(&self) -> Result<Vec<Roommate>> {
        Ok(self.db.get_all_roommates()?)
    }

    // ============================================================
    // Bills
    // ============================================================

    /// Split a new bill across the current roster and store it.
    pub fn create_bill(&self, input: CreateBillInput) -> Result<BillView> {
        let roster = self.db.get_all_roommates()?;
        let bill = allocator::create_bill(input, &roster)?;
        self.db.insert_bill(&bill)?;

        tracing::info!(
            bill_id = %bill.id,
            splits = bill.splits.len(),
            "Created bill {} for {}",
            bill.description,
            bill.amount
        );
        if bill.splits.is_empty() {
            tracing::debug!(bill_id = %bill.id, "No roommates on roster, bill has no splits");
        }

        Ok(project_bill(&bill, &RosterIndex::new(&roster)))
    }

    /// All bills, by due date then creation time.
    pub fn list_bills(&self) -> Result<Vec<BillView>> {
        let roster = self.db.get_all_roommates()?;
        let mut bills = self.db.get_all_bills()?;
        bills.sort_by_key(|b| (b.due_date, b.created_at));

        let index = RosterIndex::new(&roster);
        Ok(bills.iter().map(|b| project_bill(b, &index)).collect())
    }

    // ============================================================
    // Chores
    // ============================================================

    pub fn create_chore(&self, input: CreateChoreInput) -> Result<ChoreDetail> {
        let roster = self.db.get_all_roommates()?;
        let chore = chores::new_chore(input, &roster)?;
        self.db.insert_chore(&chore)?;
        tracing::info!(chore_id = %chore.id, "Created chore {}", chore.name);
        Ok(project_chore_detail(&chore, &RosterIndex::new(&roster)))
    }

    /// All chores, by due date then creation time.
    pub fn list_chores(&self) -> Result<Vec<ChoreDetail>> {
        let roster = self.db.get_all_roommates()?;
        let mut chores = self.db.get_all_chores()?;
        chores.sort_by_key(|c| (c.due_date, c.created_at));

        let index = RosterIndex::new(&roster);
        Ok(chores
            .iter()
            .map(|c| project_chore_detail(c, &index))
            .collect())
    }

    /// Mark a chore done. Completing a finished chore is a no-op.
    pub fn complete_chore(&self, id: Uuid) -> Result<ChoreDetail> {
        let chore = self
            .db
            .complete_chore(id)?
            .ok_or_else(|| LedgerError::not_found("chore", id))?;
        tracing::info!(chore_id = %id, "Chore marked done");

        let roster = self.db.get_all_roommates()?;
        Ok(project_chore_detail(&chore, &RosterIndex::new(&roster)))
    }

    // ============================================================
    // Dashboard
    // ============================================================

    pub fn upcoming(&self, now: DateTime<Utc>, days: u32) -> Result<Upcoming> {
        let roster = self.db.get_all_roommates()?;
        let chores = self.db.get_all_chores()?;
        let bills = self.db.get_all_bills()?;
        Ok(upcoming::get_upcoming(now, days, &chores, &bills, &roster))
    }

    pub fn tracker_summary(&self) -> Result<Vec<RoommateSummary>> {
        let roster = self.db.get_all_roommates()?;
        let chores = self.db.get_all_chores()?;
        let bills = self.db.get_all_bills()?;
        tracker::summarize(&roster, &chores, &bills)
    }

    /// Remove every roommate, chore, and bill.
    pub fn clear(&self) -> Result<ClearReport> {
        let report = self.db.clear_all()?;
        tracing::info!(
            roommates = report.roommates,
            chores = report.chores,
            bills = report.bills,
            "Cleared ledger"
        );
        Ok(report)
    }
}
