//! The `/api/v1/**` proxy rule.
//!
//! Requests under the prefix are forwarded to the backend origin with the
//! same method, path, query and body. Hop-by-hop headers are dropped in both
//! directions; nothing else is rewritten.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{
        header::{self, HeaderName},
        HeaderMap, Method, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use super::{error::ErrorBody, state::AppState};

pub const PREFIX: &str = "/api/v1";

const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.to_string());

    let mut outbound = strip_hop_by_hop(headers);
    outbound.remove(header::HOST);
    outbound.remove(header::CONTENT_LENGTH);

    let upstream = match state
        .client
        .forward(method.clone(), &path_and_query, outbound, body)
        .await
    {
        Ok(resp) => resp,
        Err(e) => return bad_gateway(&method, &path_and_query, e),
    };

    let status = upstream.status();
    let mut resp_headers = strip_hop_by_hop(upstream.headers().clone());
    resp_headers.remove(header::CONTENT_LENGTH);
    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(e) => return bad_gateway(&method, &path_and_query, e.into()),
    };
    debug!("{} {} -> {}", method, path_and_query, status);

    let mut resp = Response::new(Body::from(body));
    *resp.status_mut() = status;
    *resp.headers_mut() = resp_headers;
    resp
}

fn strip_hop_by_hop(mut headers: HeaderMap) -> HeaderMap {
    // Headers named by `Connection` are hop-by-hop too.
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::try_from(name.trim()).ok())
        .collect();
    for name in HOP_BY_HOP.iter().chain(listed.iter()) {
        headers.remove(name);
    }
    headers
}

fn bad_gateway(method: &Method, path: &str, e: rblog_api::error::Error) -> Response {
    error!("proxy {} {} failed: {}", method, path, e);
    let body = ErrorBody {
        error: format!("Upstream error: {e}"),
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, "keep-alive, x-private".parse().unwrap());
        headers.insert("keep-alive", "timeout=5".parse().unwrap());
        headers.insert("x-private", "1".parse().unwrap());
        headers.insert(header::TRANSFER_ENCODING, "chunked".parse().unwrap());
        headers.insert(header::ACCEPT, "application/json".parse().unwrap());

        let headers = strip_hop_by_hop(headers);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[header::ACCEPT], "application/json");
    }
}
