// src/routes/mod.rs
pub mod welcome;

use std::fmt;

/// Screens the client can navigate between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Welcome,
    Chat,
    ChatNotFound,
    Imprint,
    Documentation,
}

impl Route {
    /// Resolves a path. The empty path redirects to the welcome screen.
    pub fn parse(path: &str) -> Option<Self> {
        match path.trim().trim_matches('/') {
            "" | "welcome" => Some(Route::Welcome),
            "chat" => Some(Route::Chat),
            "chat-not-found" => Some(Route::ChatNotFound),
            "imprint" => Some(Route::Imprint),
            "documentation" => Some(Route::Documentation),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Welcome => "/welcome",
            Route::Chat => "/chat",
            Route::ChatNotFound => "/chat-not-found",
            Route::Imprint => "/imprint",
            Route::Documentation => "/documentation",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub const CHAT_NOT_FOUND_TEXT: &str = "No chat found for this tab. \
Go to the welcome screen and enter your name to start a new chat.";
