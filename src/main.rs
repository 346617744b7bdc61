use chat_client::{app::App, config::ClientConfig, routes::Route, state::AppState};
use tokio::io::{BufReader, stdin, stdout};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let start = std::env::args()
        .nth(1)
        .and_then(|path| Route::parse(&path))
        .unwrap_or(Route::Welcome);

    tracing::info!(api = %config.api_host(), "💬 chat client starting");
    let state = AppState::from_config(config);
    let mut app = App::new(state, BufReader::new(stdin()), stdout());
    app.run(start).await?;
    Ok(())
}
