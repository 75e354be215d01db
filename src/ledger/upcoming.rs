//! The "due in the next N days" dashboard window.
//!
//! # Invariants
//! - The window is `[now, now + days]`, inclusive at both ends.
//! - `days` is added as calendar days, never as a raw second count.
//! - Results are sorted by due date, then creation time.

use chrono::{DateTime, Days, Utc};

use super::projection::{project_bill, project_chore};
use super::roster::RosterIndex;
use crate::models::{Bill, Chore, Roommate, Upcoming};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Interpret the raw `days` query value.
///
/// Missing means the default week. Anything unparseable or below one clamps
/// to a single day; this never fails.
pub fn window_days(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_WINDOW_DAYS;
    };

    match raw.trim().parse::<i64>() {
        Ok(days) if days >= 1 => u32::try_from(days).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Inclusive upper bound of the window. Saturates instead of overflowing.
pub fn window_end(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_add_days(Days::new(u64::from(days.max(1))))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Chores and bills due within `[now, now + days]`.
pub fn get_upcoming(
    now: DateTime<Utc>,
    days: u32,
    chores: &[Chore],
    bills: &[Bill],
    roster: &[Roommate],
) -> Upcoming {
    let end = window_end(now, days);
    let in_window = |due: DateTime<Utc>| due >= now && due <= end;
    let index = RosterIndex::new(roster);

    let mut due_chores: Vec<&Chore> = chores.iter().filter(|c| in_window(c.due_date)).collect();
    due_chores.sort_by_key(|c| (c.due_date, c.created_at));

    let mut due_bills: Vec<&Bill> = bills.iter().filter(|b| in_window(b.due_date)).collect();
    due_bills.sort_by_key(|b| (b.due_date, b.created_at));

    Upcoming {
        chores: due_chores
            .into_iter()
            .map(|c| project_chore(c, &index))
            .collect(),
        bills: due_bills
            .into_iter()
            .map(|b| project_bill(b, &index))
            .collect(),
    }
}
