//! Shared wire types for the reelboard content backend.
//!
//! Every list endpoint of the backend answers with a [`ListEnvelope`]; single
//! item endpoints use the same envelope with a one-element `data` array.

use serde::{Deserialize, Serialize};

/// Outcome flag carried by every backend envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStatus {
    Success,
    Error,
}

/// `{ status, message?, data?, total_count? }` response contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub status: ListStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "none")]
    pub data: Option<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ListEnvelope<T> {
    pub fn success(data: Vec<T>, total_count: u64) -> Self {
        Self {
            status: ListStatus::Success,
            message: None,
            data: Some(data),
            total_count: Some(total_count),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ListStatus::Error,
            message: Some(message.into()),
            data: None,
            total_count: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ListStatus::Success
    }

    /// Rows of the envelope; a `null` or missing `data` is an empty page.
    pub fn into_rows(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

/// Row shape used by the dashboard: a JSON object keyed by column field.
pub type JsonRow = serde_json::Map<String, serde_json::Value>;
