// src/services/gateway.rs
use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::{
    error::GatewayError,
    message::{ChatSession, Message, User},
    services::notification::Notifier,
};

const CHAT_TITLE: &str = "ChatService Error";
const USER_TITLE: &str = "UserService Error";

/// Raw access to the chat backend. Every call reports its own failure.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn create_session(&self, name: &str) -> Result<u64, GatewayError>;
    async fn fetch_session(&self, id: u64) -> Result<ChatSession, GatewayError>;
    async fn send_message(&self, id: u64, message: &Message) -> Result<Message, GatewayError>;
    async fn list_users(&self) -> Result<Vec<User>, GatewayError>;
}

/// reqwest implementation of [`ChatBackend`].
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chats_url(&self, path: &str) -> String {
        format!("{}/chats{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status(status));
    }
    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GatewayError::EmptyBody);
    }
    // `null` counts as an empty answer too.
    serde_json::from_slice::<Option<T>>(&body)?.ok_or(GatewayError::EmptyBody)
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn create_session(&self, name: &str) -> Result<u64, GatewayError> {
        let response = self
            .client
            .post(self.chats_url("/new"))
            .query(&[("name", name)])
            .send()
            .await?;
        decode(response).await
    }

    async fn fetch_session(&self, id: u64) -> Result<ChatSession, GatewayError> {
        let response = self
            .client
            .get(self.chats_url(&format!("/id/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    async fn send_message(&self, id: u64, message: &Message) -> Result<Message, GatewayError> {
        let response = self
            .client
            .post(self.chats_url(&format!("/id/{id}/message")))
            .json(message)
            .send()
            .await?;
        decode(response).await
    }

    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/users", self.base_url))
            .send()
            .await?;
        decode(response).await
    }
}

/// Wraps a [`ChatBackend`] so that failures are logged, shown to the user
/// and turned into `None`. Callers never see an error from here.
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn ChatBackend>,
    notifier: Arc<dyn Notifier>,
}

impl Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(backend: Arc<dyn ChatBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self { backend, notifier }
    }

    fn handle<T>(&self, operation: &str, title: &str, result: Result<T, GatewayError>) -> Option<T> {
        match result {
            Ok(value) => {
                debug!(operation, "backend call succeeded");
                Some(value)
            }
            Err(e) => {
                error!(operation, error = %e, "backend call failed");
                self.notifier.show_error(&format!("{operation} failed"), title);
                None
            }
        }
    }

    pub async fn create_session(&self, name: &str) -> Option<u64> {
        let result = self.backend.create_session(name).await;
        self.handle(&format!("createSession name={name}"), CHAT_TITLE, result)
    }

    pub async fn fetch_session(&self, id: u64) -> Option<ChatSession> {
        let result = self.backend.fetch_session(id).await;
        self.handle(&format!("fetchSession id={id}"), CHAT_TITLE, result)
    }

    pub async fn send_message(&self, id: u64, message: &Message) -> Option<Message> {
        let result = self.backend.send_message(id, message).await;
        self.handle(&format!("sendMessage id={id}"), CHAT_TITLE, result)
    }

    pub async fn list_users(&self) -> Option<Vec<User>> {
        let result = self.backend.list_users().await;
        self.handle("listUsers", USER_TITLE, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notification::RecordingNotifier;

    struct DownBackend;

    #[async_trait]
    impl ChatBackend for DownBackend {
        async fn create_session(&self, _name: &str) -> Result<u64, GatewayError> {
            Err(GatewayError::EmptyBody)
        }
        async fn fetch_session(&self, _id: u64) -> Result<ChatSession, GatewayError> {
            Err(GatewayError::Status(reqwest::StatusCode::NOT_FOUND))
        }
        async fn send_message(&self, _id: u64, _m: &Message) -> Result<Message, GatewayError> {
            Err(GatewayError::EmptyBody)
        }
        async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
            Err(GatewayError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
        }
    }

    #[tokio::test]
    async fn failures_become_none_and_notify() {
        let notifier = RecordingNotifier::new();
        let gateway = Gateway::new(Arc::new(DownBackend), Arc::new(notifier.clone()));

        assert_eq!(gateway.create_session("Alice").await, None);
        assert_eq!(gateway.fetch_session(3).await, None);
        assert_eq!(gateway.list_users().await, None);

        let errors = notifier.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].title, "ChatService Error");
        assert_eq!(errors[0].message, "createSession name=Alice failed");
        assert_eq!(errors[1].message, "fetchSession id=3 failed");
        assert_eq!(errors[2].title, "UserService Error");
    }

    #[test]
    fn base_url_is_normalized() {
        let backend = HttpBackend::new("http://127.0.0.1:8080/");
        assert_eq!(backend.base_url(), "http://127.0.0.1:8080");
        assert_eq!(backend.chats_url("/id/4"), "http://127.0.0.1:8080/chats/id/4");
    }
}
