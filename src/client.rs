//! HTTP client for the roommate ledger API.
//!
//! Used by the CLI subcommands that talk to a running server. The base URL
//! comes from `ROOMMATE_LEDGER_URL` (default: `http://127.0.0.1:5000/api`).

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::api::ErrorBody;
use crate::config::DEFAULT_API_URL;
use crate::models::*;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct LedgerClient {
    base_url: String,
    client: Client,
}

impl LedgerClient {
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ROOMMATE_LEDGER_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Decode a success body, or turn the error payload into a `ClientError`.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(message)),
            _ => Err(ClientError::Server(format!("{}: {}", status, message))),
        }
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Roommates
    // ============================================================

    pub async fn list_roommates(&self) -> Result<Vec<Roommate>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/roommates")
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn create_roommate(
        &self,
        input: &CreateRoommateInput,
    ) -> Result<Roommate, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/roommates")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Bills
    // ============================================================

    pub async fn list_bills(&self) -> Result<Vec<BillView>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/bills").send().await?;
        self.handle_response(response).await
    }

    pub async fn create_bill(&self, input: &CreateBillInput) -> Result<BillView, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/bills")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Chores
    // ============================================================

    pub async fn list_chores(&self) -> Result<Vec<ChoreDetail>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/chores").send().await?;
        self.handle_response(response).await
    }

    pub async fn create_chore(&self, input: &CreateChoreInput) -> Result<ChoreDetail, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/chores")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn complete_chore(&self, id: Uuid) -> Result<ChoreDetail, ClientError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/chores/{}/done", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Dashboard
    // ============================================================

    /// Items due soon. `None` lets the server pick its default window.
    pub async fn upcoming(&self, days: Option<u32>) -> Result<Upcoming, ClientError> {
        let mut request = self.request(reqwest::Method::GET, "/dashboard/upcoming");
        if let Some(days) = days {
            request = request.query(&[("days", days)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    pub async fn tracker_summary(&self) -> Result<Vec<RoommateSummary>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/tracker/summary")
            .send()
            .await?;
        self.handle_response(response).await
    }
}
