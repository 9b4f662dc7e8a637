use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmClient, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, transcribe_translate_handler};
use crate::presentation::state::AppState;

pub fn create_router<S, L>(state: AppState<S, L>) -> Router
where
    S: TranscriptionEngine + 'static,
    L: LlmClient + 'static,
{
    // Browser clients send credentials, and a wildcard origin cannot be
    // combined with credentials, so the layer mirrors whatever origin,
    // methods, and headers each request carries.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_upload_bytes = state.settings.server.max_upload_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/transcribe_and_translate",
            post(transcribe_translate_handler::<S, L>),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
