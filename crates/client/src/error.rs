use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}: {}", .messages.join(", "))]
    Status {
        status: StatusCode,
        messages: Vec<String>,
    },

    /// No response was received (connection refused, timeout, DNS, ...).
    #[error("no response from server: {0}")]
    Network(String),

    #[error("failed to build request: {0}")]
    Request(String),

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::Status {
            status,
            messages: parse_messages(&body),
        }
    }
}

/// Error body sent by the API: `message` may be a single string or a list.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<MessageField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

pub(crate) fn parse_messages(body: &str) -> Vec<String> {
    let body = body.trim();
    if body.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(MessageField::One(message)),
            ..
        }) => vec![message],
        Ok(ErrorBody {
            message: Some(MessageField::Many(messages)),
            ..
        }) => messages,
        Ok(ErrorBody { error, message: None }) => error.into_iter().collect(),
        Err(_) => vec![body.to_string()],
    }
}
