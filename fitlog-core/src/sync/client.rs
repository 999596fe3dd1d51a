//! HTTP client for the remote workout service.
//!
//! The service is an external collaborator: this module consumes its three
//! endpoints (list, create, export) and never interprets more of a response
//! than the contract requires. The history payload is handed back as raw
//! JSON; normalization is the caller's concern.

use serde_json::Value;

use super::error::SyncError;
use crate::models::WorkoutDraft;

/// Base URL of the hosted workout service.
pub const DEFAULT_BASE_URL: &str = "https://fitness-tracker-hgt2.onrender.com/api";

/// Remote operations the sync controller depends on.
///
/// [`RemoteClient`] is the HTTP implementation; tests substitute scripted
/// ones, and any other backend can slot in at this seam.
#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    /// Fetches the stored workout history for `user` as raw JSON.
    async fn list_workouts(&self, user: &str) -> Result<Value, SyncError>;

    /// Records a new workout. Only success or failure matters; the
    /// response body is ignored.
    async fn create_workout(&self, user: &str, draft: &WorkoutDraft) -> Result<(), SyncError>;

    /// Asks the server to produce a CSV export of the user's history. The
    /// response is drained, not interpreted.
    async fn export_csv(&self, user: &str) -> Result<(), SyncError>;
}

/// HTTP client for the remote workout service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Creates a client for the service at `base_url`. A bare host gets an
    /// `http://` scheme; a trailing slash is trimmed.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_url(&self, path: &str, user: &str) -> String {
        format!("{}{}?user={}", self.base_url, path, urlencoding::encode(user))
    }
}

fn normalize_base_url(base: String) -> String {
    let base = if base.starts_with("http://") || base.starts_with("https://") {
        base
    } else {
        format!("http://{}", base)
    };
    base.trim_end_matches('/').to_string()
}

impl WorkoutService for RemoteClient {
    async fn list_workouts(&self, user: &str) -> Result<Value, SyncError> {
        let response = self
            .http
            .get(self.user_url("/workouts", user))
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| SyncError::MalformedBody(e.to_string()))
    }

    async fn create_workout(&self, user: &str, draft: &WorkoutDraft) -> Result<(), SyncError> {
        let response = self
            .http
            .post(format!("{}/workouts", self.base_url))
            .json(&draft.to_body(user))
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        Ok(())
    }

    async fn export_csv(&self, user: &str) -> Result<(), SyncError> {
        let response = self
            .http
            .get(self.user_url("/export", user))
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        Ok(())
    }
}
