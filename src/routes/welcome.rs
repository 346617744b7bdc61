// src/routes/welcome.rs
use std::sync::Arc;

use tracing::info;

use crate::{
    error::ValidationError,
    routes::Route,
    services::{chat_storage::ChatStorage, gateway::Gateway, notification::Notifier},
};

pub const MIN_NAME_LEN: usize = 5;

/// Name entry: starts a chat session and remembers it for this tab.
pub struct WelcomeScreen {
    gateway: Gateway,
    storage: ChatStorage,
    notifier: Arc<dyn Notifier>,
}

pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort { min: MIN_NAME_LEN });
    }
    Ok(trimmed)
}

impl WelcomeScreen {
    pub fn new(gateway: Gateway, storage: ChatStorage, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            storage,
            notifier,
        }
    }

    /// Returns the route to go to next, or `None` to stay on this screen.
    pub async fn start_chat(&self, name: &str) -> Option<Route> {
        let name = match validate_name(name) {
            Ok(n) => n,
            Err(e) => {
                self.notifier.show_error(&e.to_string(), e.title());
                return None;
            }
        };

        let id = self.gateway.create_session(name).await?;
        self.storage.set_id(id);
        self.storage.set_user_name(name);
        info!(chat_id = id, user = name, "chat session created");
        self.notifier
            .show_success(&format!("Welcome, {name}!"), "Chat created");
        Some(Route::Chat)
    }
}
