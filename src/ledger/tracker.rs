//! Per-roommate tracker summary.
//!
//! Unlike bill creation, the summary nets out what a payer owes themselves:
//! only unpaid splits on bills paid by someone else count towards `owed`.

use rust_decimal::Decimal;

use super::money::round2;
use crate::error::{LedgerError, Result};
use crate::models::{Bill, Chore, Roommate, RoommateSummary};

/// Fails only when a roommate's owed total no longer fits in a `Decimal`.
pub fn summarize(
    roster: &[Roommate],
    chores: &[Chore],
    bills: &[Bill],
) -> Result<Vec<RoommateSummary>> {
    roster
        .iter()
        .map(|roommate| {
            let chores_completed = chores
                .iter()
                .filter(|c| c.completed && c.assigned_to.contains(&roommate.id))
                .count();

            let owed = bills
                .iter()
                .filter(|b| b.payer_id != Some(roommate.id))
                .flat_map(|b| &b.splits)
                .filter(|s| s.roommate_id == roommate.id && !s.paid)
                .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.owed_amount))
                .ok_or_else(|| {
                    LedgerError::Storage(anyhow::anyhow!(
                        "owed total for roommate {} overflowed",
                        roommate.id
                    ))
                })?;

            Ok(RoommateSummary {
                id: roommate.id,
                name: roommate.name.clone(),
                chores_completed,
                owed: round2(owed),
            })
        })
        .collect()
}
