use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

// ============================================================================
// Backend envelope
// ============================================================================

/// The envelope every backend endpoint wraps its payload in.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode a success body and unwrap its payload.
    ///
    /// `endpoint` is only used to label decode errors.
    pub fn decode_data(body: &[u8], endpoint: &str) -> Result<T, ApiError> {
        let envelope: ApiResponse<T> = serde_json::from_slice(body)
            .map_err(|e| ApiError::Decode(format!("{endpoint}: {e}")))?;

        envelope
            .data
            .ok_or_else(|| ApiError::Decode(format!("{endpoint}: response has no data")))
    }
}

// ============================================================================
// Paginated payload
// ============================================================================

/// One page of a listing, as serialized by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// ============================================================================
// Error body
// ============================================================================

/// The part of an error body the client cares about.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Pull the `message` field out of an error response body, if there is one.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}
