//! Bill creation and equal-split allocation.
//!
//! # Policy
//! - Every roommate on the roster at creation time gets one split, in roster
//!   order, including the payer. The payer owing their own share is only
//!   netted out by the tracker summary.
//! - Each share is `round2(amount / n)`, half away from zero. The leftover
//!   cent(s) are not redistributed.
//! - An empty roster yields a bill with no splits.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::dates::require_due_date;
use super::money::{equal_share, round2, MAX_AMOUNT};
use super::roster::RosterIndex;
use crate::error::{LedgerError, Result};
use crate::models::{Bill, CreateBillInput, Roommate, Split};

/// Validate `input` and materialize a bill split across `roster`.
///
/// Nothing is persisted here.
pub fn create_bill(input: CreateBillInput, roster: &[Roommate]) -> Result<Bill> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(LedgerError::validation(
            "description",
            "description is required",
        ));
    }

    let amount = input
        .amount
        .map(round2)
        .ok_or_else(|| LedgerError::validation("amount", "amount is required"))?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(
            "amount",
            format!("amount must be greater than zero, got {amount}"),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::validation(
            "amount",
            format!("amount must be at most {MAX_AMOUNT}"),
        ));
    }

    let due_date = require_due_date("dueDate", &input.due_date)?;

    if let Some(payer_id) = input.payer_id {
        if !RosterIndex::new(roster).contains(payer_id) {
            return Err(LedgerError::validation(
                "payerId",
                format!("payer {payer_id} is not a known roommate"),
            ));
        }
    }

    Ok(Bill {
        id: Uuid::new_v4(),
        description: description.to_string(),
        amount,
        due_date,
        payer_id: input.payer_id,
        notes: input.notes.unwrap_or_default(),
        splits: allocate_splits(amount, roster),
        created_at: Utc::now(),
    })
}

/// One unpaid split per roster member, each owing an equal share.
pub fn allocate_splits(amount: Decimal, roster: &[Roommate]) -> Vec<Split> {
    let Some(per_head) = equal_share(amount, roster.len()) else {
        return Vec::new();
    };

    roster
        .iter()
        .map(|roommate| Split {
            roommate_id: roommate.id,
            owed_amount: per_head,
            paid: false,
        })
        .collect()
}
