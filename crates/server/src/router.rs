use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use super::{handlers, proxy, state::AppState};

/// Routes:
/// - `GET /api/getPostList` - upstream post list, passed through
/// - `GET /api/getPost?id=` - post record joined with its body
/// - `GET /api/rss` - upstream feed, passed through
/// - `ANY /api/v1/*` - proxy rule to the backend origin
/// - `GET /health` - liveness
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/getPostList", get(handlers::get_post_list))
        .route("/api/getPost", get(handlers::get_post))
        .route("/api/rss", get(handlers::rss))
        .route(
            &format!("{}/*rest", proxy::PREFIX),
            any(proxy::forward).layer(DefaultBodyLimit::disable()),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
