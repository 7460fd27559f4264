use axum::extract::Request;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::state::AppState;

pub mod tts;

const INDEX_HTML: &str = include_str!("../../static/index.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn create_router(state: AppState, static_dir: &str) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    let api_routes = Router::new()
        .route("/tts", post(tts::synthesize))
        .route("/voices", get(tts::voices))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(trace_layer)
        .with_state(state)
}
