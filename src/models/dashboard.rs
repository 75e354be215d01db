use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bill::BillView;
use super::chore::ChoreView;

/// Items due within the dashboard window, sorted by due date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upcoming {
    pub chores: Vec<ChoreView>,
    pub bills: Vec<BillView>,
}

/// Per-roommate row of the tracker page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoommateSummary {
    pub id: Uuid,
    pub name: String,
    /// Completed chores that list this roommate as an assignee.
    pub chores_completed: usize,
    /// Unpaid shares on bills this roommate did not pay for.
    pub owed: Decimal,
}

/// Number of rows removed by a bulk clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearReport {
    pub roommates: usize,
    pub chores: usize,
    pub bills: usize,
}
