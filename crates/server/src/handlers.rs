use axum::{
    body::Body,
    extract::{Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rblog_api::response::UpstreamResponse;
use rblog_types::post::PostId;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct PostQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// `GET /api/getPostList`: the upstream list, untouched.
pub async fn get_post_list(State(state): State<AppState>) -> Response {
    let result = state.client.get_list().await.map(relay);
    respond(&state, "getPostList", result.map_err(AppError::from))
}

/// `GET /api/getPost?id=`: post record joined with its body.
pub async fn get_post(State(state): State<AppState>, Query(query): Query<PostQuery>) -> Response {
    let result = async {
        let id = PostId::from_query(query.id.as_deref())?;
        let detail = state.client.get_post_detail(id).await?;
        Ok::<_, AppError>(Json(detail).into_response())
    }
    .await;
    respond(&state, "getPost", result)
}

/// `GET /api/rss`: the upstream feed, untouched.
pub async fn rss(State(state): State<AppState>) -> Response {
    let result = state.client.get_rss().await.map(relay);
    respond(&state, "rss", result.map_err(AppError::from))
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn relay(upstream: UpstreamResponse) -> Response {
    let mut resp = Response::new(Body::from(upstream.body));
    if let Some(content_type) = upstream.content_type {
        resp.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    resp
}

/// Failures are logged, then surfaced as an error status, or swallowed into
/// an empty 200 when the relay runs with silent failures.
fn respond(state: &AppState, handler: &str, result: Result<Response, AppError>) -> Response {
    match result {
        Ok(resp) => resp,
        Err(e) => {
            error!(handler, kind = ?e.kind(), "{}", e);
            if state.config.silent_failures() {
                StatusCode::OK.into_response()
            } else {
                e.into_response()
            }
        }
    }
}
