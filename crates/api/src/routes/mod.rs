mod chat;
mod consciousness;
mod misc;

use std::path::Path;

use axum::handler::HandlerWithoutStateExt;
use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::GlobalState;

pub use chat::chat_routes;
pub use consciousness::consciousness_routes;
pub use misc::{misc_routes, not_found};

/// The complete route table. Paths no route claims are looked up in
/// `static_dir` and answer with the JSON 404 when no file matches.
pub fn app_router(state: GlobalState, static_dir: impl AsRef<Path>) -> Router {
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .merge(consciousness_routes())
        .merge(chat_routes())
        .merge(misc_routes())
        .fallback_service(static_files)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
