// Shared in-memory backend for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chat_client::config::ClientConfig;
use chat_client::error::GatewayError;
use chat_client::message::{ChatSession, Message, MessageRole, User};
use chat_client::services::chat_storage::ChatStorage;
use chat_client::services::gateway::ChatBackend;
use chat_client::services::notification::RecordingNotifier;
use chat_client::state::AppState;
use chrono::Utc;
use reqwest::StatusCode;

#[derive(Default)]
pub struct Calls {
    pub create: Vec<String>,
    pub fetch: Vec<u64>,
    pub send: Vec<(u64, Message)>,
    pub users: usize,
}

pub struct FakeBackend {
    pub calls: Mutex<Calls>,
    pub next_id: u64,
    pub sessions: Mutex<Vec<(u64, ChatSession)>>,
    pub reply: Mutex<Option<String>>,
    pub users: Mutex<Result<Vec<User>, ()>>,
}

impl FakeBackend {
    pub fn new(next_id: u64) -> Self {
        Self {
            calls: Mutex::new(Calls::default()),
            next_id,
            sessions: Mutex::new(Vec::new()),
            reply: Mutex::new(Some("Hello from the bot".to_string())),
            users: Mutex::new(Ok(Vec::new())),
        }
    }

    pub fn with_session(self, id: u64, session: ChatSession) -> Self {
        self.sessions.lock().unwrap().push((id, session));
        self
    }

    pub fn silent_bot(&self) {
        *self.reply.lock().unwrap() = None;
    }

    pub fn set_users(&self, names: &[&str]) {
        *self.users.lock().unwrap() = Ok(names.iter().map(|n| User::new(*n)).collect());
    }

    pub fn fail_users(&self) {
        *self.users.lock().unwrap() = Err(());
    }

    pub fn create_calls(&self) -> usize {
        self.calls.lock().unwrap().create.len()
    }

    pub fn fetch_calls(&self) -> usize {
        self.calls.lock().unwrap().fetch.len()
    }

    pub fn send_calls(&self) -> usize {
        self.calls.lock().unwrap().send.len()
    }

    pub fn user_calls(&self) -> usize {
        self.calls.lock().unwrap().users
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn create_session(&self, name: &str) -> Result<u64, GatewayError> {
        self.calls.lock().unwrap().create.push(name.to_string());
        let session = ChatSession {
            user: User::new(name),
            bot: Default::default(),
            messages: Vec::new(),
        };
        self.sessions.lock().unwrap().push((self.next_id, session));
        Ok(self.next_id)
    }

    async fn fetch_session(&self, id: u64) -> Result<ChatSession, GatewayError> {
        self.calls.lock().unwrap().fetch.push(id);
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, s)| s.clone())
            .ok_or(GatewayError::Status(StatusCode::NOT_FOUND))
    }

    async fn send_message(&self, id: u64, message: &Message) -> Result<Message, GatewayError> {
        self.calls.lock().unwrap().send.push((id, message.clone()));
        let reply = self.reply.lock().unwrap().clone();
        reply
            .map(|content| Message {
                time_sent: Utc::now(),
                sender: "Bot".to_string(),
                content,
                role: MessageRole::Bot,
            })
            .ok_or(GatewayError::EmptyBody)
    }

    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        self.calls.lock().unwrap().users += 1;
        self.users
            .lock()
            .unwrap()
            .clone()
            .map_err(|_| GatewayError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    }
}

pub struct Harness {
    pub state: AppState,
    pub backend: Arc<FakeBackend>,
    pub notifier: RecordingNotifier,
}

pub fn harness(backend: FakeBackend) -> Harness {
    let config = ClientConfig {
        assets_dir: "tests/no-such-assets".into(),
        ..Default::default()
    };
    harness_with(backend, config)
}

pub fn harness_with(backend: FakeBackend, config: ClientConfig) -> Harness {
    let backend = Arc::new(backend);
    let notifier = RecordingNotifier::new();
    let state = AppState::new(
        config,
        backend.clone(),
        ChatStorage::in_memory(),
        Arc::new(notifier.clone()),
    );
    Harness {
        state,
        backend,
        notifier,
    }
}

pub fn session_with(name: &str, lines: &[(&str, bool)]) -> ChatSession {
    ChatSession {
        user: User::new(name),
        bot: Default::default(),
        messages: lines
            .iter()
            .map(|(content, bot)| Message {
                time_sent: Utc::now(),
                sender: if *bot { "Bot".to_string() } else { name.to_string() },
                content: content.to_string(),
                role: if *bot { MessageRole::Bot } else { MessageRole::User },
            })
            .collect(),
    }
}
