// src/state.rs
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::routes::welcome::WelcomeScreen;
use crate::services::assets::AssetService;
use crate::services::chat_controller::ChatController;
use crate::services::chat_storage::ChatStorage;
use crate::services::gateway::{ChatBackend, Gateway, HttpBackend};
use crate::services::notification::{ConsoleNotifier, Notifier};
use crate::services::presence::{PresenceHandle, PresencePoller};

/// Everything one client tab shares between its screens.
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub gateway: Gateway,
    pub storage: ChatStorage,
    pub notifier: Arc<dyn Notifier>,
    pub assets: AssetService,
}

impl AppState {
    pub fn new(
        config: ClientConfig,
        backend: Arc<dyn ChatBackend>,
        storage: ChatStorage,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway: Gateway::new(backend, Arc::clone(&notifier)),
            assets: AssetService::new(config.assets_dir.clone(), Arc::clone(&notifier)),
            config,
            storage,
            notifier,
        }
    }

    /// HTTP backend, fresh tab storage and console notifications.
    pub fn from_config(config: ClientConfig) -> Self {
        let backend = Arc::new(HttpBackend::new(config.api_host()));
        Self::new(
            config,
            backend,
            ChatStorage::in_memory(),
            Arc::new(ConsoleNotifier),
        )
    }

    pub fn welcome(&self) -> WelcomeScreen {
        WelcomeScreen::new(
            self.gateway.clone(),
            self.storage.clone(),
            Arc::clone(&self.notifier),
        )
    }

    pub fn chat(&self) -> ChatController {
        ChatController::new(
            self.gateway.clone(),
            self.storage.clone(),
            Arc::clone(&self.notifier),
        )
    }

    pub async fn presence(&self) -> PresenceHandle {
        PresencePoller::start(
            self.gateway.clone(),
            self.storage.clone(),
            self.config.poll_interval,
        )
        .await
    }
}
