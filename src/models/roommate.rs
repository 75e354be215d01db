use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of the household.
///
/// Roommates are referenced by bills (payer, splits) and chores (assignees).
/// They are never mutated after creation and only disappear through a bulk
/// clear of the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roommate {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a roommate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoommateInput {
    /// Display name. Must not be blank.
    #[serde(default)]
    pub name: String,
    /// Blank strings are treated as no email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Minimal roommate reference used inside projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoommateRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&Roommate> for RoommateRef {
    fn from(roommate: &Roommate) -> Self {
        Self {
            id: roommate.id,
            name: roommate.name.clone(),
        }
    }
}
