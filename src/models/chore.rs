use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roommate::RoommateRef;

/// A household task.
///
/// `completed` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: Uuid,
    pub name: String,
    /// Responsible roommates, in the order they were given.
    pub assigned_to: Vec<Uuid>,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a chore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoreInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub assigned_to: Vec<Uuid>,
    /// `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
    #[serde(default)]
    pub due_date: String,
}

/// Dashboard shape of a chore.
///
/// Only the first assignee is surfaced; the stored chore keeps all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreView {
    pub id: Uuid,
    pub name: String,
    pub assigned_to: Option<RoommateRef>,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
}

/// Full chore listing with every known assignee resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreDetail {
    pub id: Uuid,
    pub name: String,
    pub assigned_to: Vec<RoommateRef>,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
