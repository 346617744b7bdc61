// src/services/chat_controller.rs
use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    message::{Bot, ChatSession, Message, MessageRole, User},
    routes::Route,
    services::{chat_storage::ChatStorage, gateway::Gateway, notification::Notifier},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatViewState {
    Uninitialized,
    Loading,
    Active,
    NotFound,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SendOutcome {
    /// Draft was blank; nothing was sent.
    Rejected,
    /// User message appended, but the bot did not answer.
    NoReply,
    Replied(Message),
}

/// Drives the chat screen: loads the stored session and exchanges messages.
pub struct ChatController {
    gateway: Gateway,
    storage: ChatStorage,
    notifier: Arc<dyn Notifier>,
    state: ChatViewState,
    chat_id: u64,
    session: Option<ChatSession>,
    draft: String,
}

impl ChatController {
    pub fn new(gateway: Gateway, storage: ChatStorage, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            storage,
            notifier,
            state: ChatViewState::Uninitialized,
            chat_id: 0,
            session: None,
            draft: String::new(),
        }
    }

    pub fn state(&self) -> ChatViewState {
        self.state
    }

    pub fn chat_id(&self) -> u64 {
        self.chat_id
    }

    /// Loads the session of this tab. Returns a redirect when there is none.
    pub async fn enter(&mut self) -> Option<Route> {
        self.state = ChatViewState::Loading;
        self.chat_id = self.storage.get_id();

        if self.chat_id == 0 {
            info!("no chat id stored, redirecting");
            self.state = ChatViewState::NotFound;
            return Some(Route::ChatNotFound);
        }

        // A failed fetch leaves an empty but active screen.
        self.session = self.gateway.fetch_session(self.chat_id).await;
        self.state = ChatViewState::Active;
        info!(chat_id = self.chat_id, loaded = self.session.is_some(), "chat entered");
        None
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn messages(&self) -> &[Message] {
        self.session
            .as_ref()
            .map(|s| s.messages.as_slice())
            .unwrap_or_default()
    }

    pub fn is_bot_message(message: &Message) -> bool {
        message.is_bot()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, content: impl Into<String>) {
        self.draft = content.into();
    }

    /// Sends the current draft. The user's message is appended before the
    /// request goes out, the bot's reply after it comes back. When the session
    /// could not be loaded, the exchange still goes out under the stored name.
    pub async fn send_message(&mut self) -> SendOutcome {
        let sender = match &self.session {
            Some(session) => session.user.clone(),
            None => User::new(self.storage.get_user_name()),
        };

        let message = match Message::from_user(&sender, &self.draft) {
            Ok(m) => m,
            Err(e) => {
                self.notifier.show_error(&e.to_string(), e.title());
                return SendOutcome::Rejected;
            }
        };

        let chat_id = self.chat_id;
        let session = self.session.get_or_insert_with(|| {
            warn!(chat_id, "sending without a loaded session");
            ChatSession {
                user: sender,
                bot: Bot::default(),
                messages: Vec::new(),
            }
        });
        session.messages.push(message.clone());
        self.draft.clear();

        match self.gateway.send_message(self.chat_id, &message).await {
            Some(mut reply) => {
                reply.role = MessageRole::Bot;
                if let Some(session) = self.session.as_mut() {
                    session.messages.push(reply.clone());
                }
                SendOutcome::Replied(reply)
            }
            None => {
                self.notifier.show_error("No answer from the bot.", "Server Error");
                SendOutcome::NoReply
            }
        }
    }
}
