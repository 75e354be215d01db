use chrono::Utc;
use uuid::Uuid;

use super::dates::require_due_date;
use super::roster::RosterIndex;
use crate::error::{LedgerError, Result};
use crate::models::{Chore, CreateChoreInput, Roommate};

/// Validate input against the roster and build a new, incomplete chore.
///
/// Repeated assignee ids keep their first position only.
pub fn new_chore(input: CreateChoreInput, roster: &[Roommate]) -> Result<Chore> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("name", "name is required"));
    }

    let due_date = require_due_date("dueDate", &input.due_date)?;

    let index = RosterIndex::new(roster);
    let mut assigned_to: Vec<Uuid> = Vec::with_capacity(input.assigned_to.len());
    for id in input.assigned_to {
        if !index.contains(id) {
            return Err(LedgerError::validation(
                "assignedTo",
                format!("assignee {id} is not a known roommate"),
            ));
        }
        if !assigned_to.contains(&id) {
            assigned_to.push(id);
        }
    }

    Ok(Chore {
        id: Uuid::new_v4(),
        name: name.to_string(),
        assigned_to,
        due_date,
        completed: false,
        created_at: Utc::now(),
    })
}
