// src/app.rs
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{debug, info};

use crate::{
    message::Message,
    routes::{CHAT_NOT_FOUND_TEXT, Route},
    services::{
        assets::{html_to_text, render_imprint},
        chat_controller::{ChatController, SendOutcome},
        presence::PresenceHandle,
    },
    state::AppState,
};

const HELP: &str = "commands: /users /imprint /docs /welcome /quit";

enum Command {
    Go(Route),
    Users,
    Quit,
    Text(String),
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "/quit" | "/exit" => Command::Quit,
        "/users" => Command::Users,
        "/imprint" => Command::Go(Route::Imprint),
        "/docs" => Command::Go(Route::Documentation),
        "/welcome" => Command::Go(Route::Welcome),
        "/chat" => Command::Go(Route::Chat),
        _ => Command::Text(line.to_string()),
    }
}

/// Line-oriented front end. One `App` is one client tab.
pub struct App<R, W> {
    state: AppState,
    input: Lines<R>,
    out: W,
}

impl<R, W> App<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(state: AppState, input: R, out: W) -> Self {
        Self {
            state,
            input: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    async fn render_message(&mut self, message: &Message) -> std::io::Result<()> {
        let time = message.time_sent.format("%H:%M");
        let line = if ChatController::is_bot_message(message) {
            format!("[{time}] bot > {}", message.content)
        } else {
            format!("[{time}] {} > {}", message.sender, message.content)
        };
        self.say(&line).await
    }

    /// Runs until `/quit` or end of input, starting at `start`.
    pub async fn run(&mut self, start: Route) -> std::io::Result<()> {
        let mut route = start;
        let mut previous = Route::Welcome;

        loop {
            info!(%route, "navigate");
            let next = match route {
                Route::Welcome => self.welcome().await?,
                Route::Chat => self.chat().await?,
                Route::ChatNotFound => {
                    self.say(CHAT_NOT_FOUND_TEXT).await?;
                    Some(Route::Welcome)
                }
                Route::Imprint => {
                    match self.state.assets.imprint().await {
                        Some(map) => self.say(render_imprint(&map).trim_end()).await?,
                        None => self.say("Imprint unavailable.").await?,
                    }
                    Some(previous)
                }
                Route::Documentation => {
                    match self.state.assets.documentation().await {
                        Some(html) => self.say(&html_to_text(&html)).await?,
                        None => self.say("Documentation unavailable.").await?,
                    }
                    Some(previous)
                }
            };

            let Some(next) = next else {
                return Ok(());
            };
            if matches!(route, Route::Welcome | Route::Chat) {
                previous = route;
            }
            route = next;
        }
    }

    async fn welcome(&mut self) -> std::io::Result<Option<Route>> {
        let screen = self.state.welcome();
        loop {
            self.say("Enter your name to start chatting (/imprint, /docs, /quit):")
                .await?;
            let Some(line) = self.input.next_line().await? else {
                return Ok(None);
            };
            match parse_command(&line) {
                Command::Quit => return Ok(None),
                Command::Go(Route::Welcome) | Command::Users => continue,
                Command::Go(route) => return Ok(Some(route)),
                Command::Text(name) => {
                    if let Some(route) = screen.start_chat(&name).await {
                        return Ok(Some(route));
                    }
                }
            }
        }
    }

    async fn chat(&mut self) -> std::io::Result<Option<Route>> {
        let mut controller = self.state.chat();
        if let Some(redirect) = controller.enter().await {
            return Ok(Some(redirect));
        }

        let presence = self.state.presence().await;
        let result = self.chat_loop(&mut controller, &presence).await;
        presence.stop().await;
        result
    }

    async fn chat_loop(
        &mut self,
        controller: &mut ChatController,
        presence: &PresenceHandle,
    ) -> std::io::Result<Option<Route>> {
        let name = controller
            .user()
            .map(|u| u.name.clone())
            .unwrap_or_default();
        self.say(&format!("Chat #{} as {name}. {HELP}", controller.chat_id()))
            .await?;
        for message in controller.messages().to_vec() {
            self.render_message(&message).await?;
        }

        loop {
            let Some(line) = self.input.next_line().await? else {
                return Ok(None);
            };
            match parse_command(&line) {
                Command::Quit => return Ok(None),
                Command::Go(Route::Chat) => continue,
                Command::Go(route) => return Ok(Some(route)),
                Command::Users => {
                    let users = presence.users().await;
                    if users.is_empty() {
                        self.say("Nobody else is online.").await?;
                    } else {
                        let names: Vec<_> = users.into_iter().map(|u| u.name).collect();
                        self.say(&format!("Online: {}", names.join(", "))).await?;
                    }
                }
                Command::Text(text) => {
                    controller.set_draft(text);
                    let outcome = controller.send_message().await;
                    debug!(?outcome, "message sent");
                    if let SendOutcome::Replied(reply) = outcome {
                        self.render_message(&reply).await?;
                    }
                }
            }
        }
    }
}
