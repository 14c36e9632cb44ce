use serde_json::json;
use thiserror::Error;

use storeplan_ai::AiError;
use storeplan_core::LayoutError;

/// Anything an operation can hand back to a caller instead of a result.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("could not encode response: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Layout(_) => "validation_error",
            ApiError::Ai(_) => "invalid_ranking",
            ApiError::Malformed(_) => "malformed_request",
            ApiError::Encode(_) => "encode_error",
        }
    }

    /// `{"error": message}`
    pub fn to_json(&self) -> serde_json::Value {
        json_error(self.to_string())
    }
}

pub fn json_error(message: impl Into<String>) -> serde_json::Value {
    json!({ "error": message.into() })
}
