use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiError;
use crate::ledger::{upcoming::window_days, Ledger};
use crate::models::*;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Roommates
// ============================================================

pub async fn list_roommates(
    State(ledger): State<Ledger>,
) -> Result<Json<Vec<Roommate>>, ApiError> {
    Ok(Json(ledger.list_roommates()?))
}

pub async fn create_roommate(
    State(ledger): State<Ledger>,
    payload: Result<Json<CreateRoommateInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Roommate>), ApiError> {
    let Json(input) = payload?;
    let roommate = ledger.create_roommate(input)?;
    Ok((StatusCode::CREATED, Json(roommate)))
}

// ============================================================
// Bills
// ============================================================

pub async fn list_bills(State(ledger): State<Ledger>) -> Result<Json<Vec<BillView>>, ApiError> {
    Ok(Json(ledger.list_bills()?))
}

/// Create a bill split equally across the current roster.
pub async fn create_bill(
    State(ledger): State<Ledger>,
    payload: Result<Json<CreateBillInput>, JsonRejection>,
) -> Result<(StatusCode, Json<BillView>), ApiError> {
    let Json(input) = payload?;
    let bill = ledger.create_bill(input)?;
    Ok((StatusCode::CREATED, Json(bill)))
}

// ============================================================
// Chores
// ============================================================

pub async fn list_chores(
    State(ledger): State<Ledger>,
) -> Result<Json<Vec<ChoreDetail>>, ApiError> {
    Ok(Json(ledger.list_chores()?))
}

pub async fn create_chore(
    State(ledger): State<Ledger>,
    payload: Result<Json<CreateChoreInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ChoreDetail>), ApiError> {
    let Json(input) = payload?;
    let chore = ledger.create_chore(input)?;
    Ok((StatusCode::CREATED, Json(chore)))
}

pub async fn complete_chore(
    State(ledger): State<Ledger>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChoreDetail>, ApiError> {
    Ok(Json(ledger.complete_chore(id)?))
}

// ============================================================
// Dashboard
// ============================================================

/// Query parameters for the upcoming window.
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// Kept raw so that junk values clamp instead of rejecting the request.
    pub days: Option<String>,
}

pub async fn get_upcoming(
    State(ledger): State<Ledger>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Upcoming>, ApiError> {
    let days = window_days(query.days.as_deref());
    Ok(Json(ledger.upcoming(Utc::now(), days)?))
}

pub async fn get_tracker_summary(
    State(ledger): State<Ledger>,
) -> Result<Json<Vec<RoommateSummary>>, ApiError> {
    Ok(Json(ledger.tracker_summary()?))
}
