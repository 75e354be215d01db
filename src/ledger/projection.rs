//! Read-side projections: stored entities to display shapes.
//!
//! Every function here is a pure mapping of stored state plus the roster, so
//! projecting the same input twice yields identical output.

use super::roster::RosterIndex;
use crate::models::{Bill, BillView, Chore, ChoreDetail, ChoreView, SplitView};

pub fn project_bill(bill: &Bill, roster: &RosterIndex<'_>) -> BillView {
    BillView {
        id: bill.id,
        description: bill.description.clone(),
        title: bill.description.clone(),
        amount: bill.amount,
        due_date: bill.due_date,
        payer_id: bill.payer_id,
        payer: bill.payer_id.and_then(|id| roster.reference(id)),
        notes: bill.notes.clone(),
        splits: bill
            .splits
            .iter()
            .map(|split| SplitView {
                roommate_id: split.roommate_id,
                roommate_name: roster.name(split.roommate_id),
                owed_amount: split.owed_amount,
                paid: split.paid,
            })
            .collect(),
        created_at: bill.created_at,
    }
}

/// Dashboard view: the first assignee that still resolves, or none.
pub fn project_chore(chore: &Chore, roster: &RosterIndex<'_>) -> ChoreView {
    ChoreView {
        id: chore.id,
        name: chore.name.clone(),
        assigned_to: chore
            .assigned_to
            .iter()
            .find_map(|id| roster.reference(*id)),
        due_date: chore.due_date,
        completed: chore.completed,
    }
}

pub fn project_chore_detail(chore: &Chore, roster: &RosterIndex<'_>) -> ChoreDetail {
    ChoreDetail {
        id: chore.id,
        name: chore.name.clone(),
        assigned_to: chore
            .assigned_to
            .iter()
            .filter_map(|id| roster.reference(*id))
            .collect(),
        due_date: chore.due_date,
        completed: chore.completed,
        created_at: chore.created_at,
    }
}
