use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::roommate::RoommateRef;

/// A shared household expense.
///
/// A bill and its splits are written together and are immutable afterwards,
/// except for each split's `paid` flag. The splits reflect the roster at the
/// moment the bill was created; adding or removing roommates later never
/// rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: Uuid,
    pub description: String,
    /// Always stored with two decimal places.
    pub amount: Decimal,
    pub due_date: DateTime<Utc>,
    /// The roommate who fronted the money, if recorded.
    pub payer_id: Option<Uuid>,
    pub notes: String,
    pub splits: Vec<Split>,
    pub created_at: DateTime<Utc>,
}

/// One roommate's share of a bill. Owned by its bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub roommate_id: Uuid,
    pub owed_amount: Decimal,
    pub paid: bool,
}

/// Input for creating a bill.
///
/// Fields are deliberately loose so that missing or malformed values surface
/// as field-level validation errors instead of body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillInput {
    #[serde(default)]
    pub description: String,
    /// Accepts a JSON number or a decimal string.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
    #[serde(default)]
    pub due_date: String,
    /// Blank is the same as absent.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub payer_id: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => Uuid::parse_str(id).map(Some).map_err(de::Error::custom),
    }
}

/// Display shape of a bill with roommate references resolved.
///
/// `title` mirrors `description` for consumers that still read the older key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillView {
    pub id: Uuid,
    pub description: String,
    pub title: String,
    pub amount: Decimal,
    pub due_date: DateTime<Utc>,
    pub payer_id: Option<Uuid>,
    pub payer: Option<RoommateRef>,
    pub notes: String,
    pub splits: Vec<SplitView>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitView {
    pub roommate_id: Uuid,
    /// `None` when the roommate no longer exists.
    pub roommate_name: Option<String>,
    pub owed_amount: Decimal,
    pub paid: bool,
}
