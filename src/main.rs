#![warn(clippy::pedantic)]

mod api;
mod config;
mod error;
mod gemini;
mod state;
mod tts;
mod voice;
mod wav;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::gemini::Gemini;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_tts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config::init()?;
    let config = config::get();

    let gemini = Gemini::new(&config.gemini)?;
    tracing::info!(endpoint = %gemini.endpoint(), "Gemini client ready");

    let app = api::create_router(AppState::new(gemini), &config.server.static_dir);

    let addr = format!("{}:{}", config.server.listen_host, config.server.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _: Result<_, _> = tokio::signal::ctrl_c()
                .await
                .map_err(|why| tracing::error!("Failed to wait Ctrl+C: {why:?}"));

            tracing::info!("Received Ctrl+C, shutting down.");
        })
        .await?;

    Ok(())
}
