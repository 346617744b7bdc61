// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend answered with status {0}")]
    Status(StatusCode),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend answered with an empty body")]
    EmptyBody,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Messages has to have a content")]
    EmptyMessage,

    #[error("Your username has to have at least {min} letters!")]
    NameTooShort { min: usize },
}

impl ValidationError {
    /// Notification title for the failed user action.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::EmptyMessage => "Sending message failed",
            ValidationError::NameTooShort { .. } => "Chat creation failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse asset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("asset has an unexpected shape")]
    Shape,
}
