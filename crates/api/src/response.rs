use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};

/// An upstream reply kept verbatim, for endpoints the relay passes through untouched.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub async fn read(resp: reqwest::Response) -> Result<Self, reqwest::Error> {
        let content_type = resp.headers().get(CONTENT_TYPE).cloned();
        Ok(UpstreamResponse {
            content_type,
            body: resp.bytes().await?,
        })
    }
}

/// The body of a post, fetched from its `content_url`.
/// JSON documents are parsed, everything else is kept as text.
#[derive(Debug, Clone, PartialEq)]
pub enum PostBody {
    Json(serde_json::Value),
    Text(String),
}

impl PostBody {
    pub async fn parse(resp: reqwest::Response) -> Result<Self, super::error::Error> {
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(false, is_json_content_type);
        if is_json {
            Ok(PostBody::Json(serde_json::from_slice(&resp.bytes().await?)?))
        } else {
            Ok(PostBody::Text(resp.text().await?))
        }
    }

    pub fn into_value(self) -> serde_json::Value {
        match self {
            PostBody::Json(value) => value,
            PostBody::Text(text) => serde_json::Value::String(text),
        }
    }
}

fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json")
        || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/feed+json"));
        assert!(!is_json_content_type("text/markdown"));
        assert!(!is_json_content_type("text/plain; charset=utf-8"));
    }

    #[test]
    fn test_into_value() {
        assert_eq!(
            PostBody::Text("# Hello".to_string()).into_value(),
            serde_json::Value::from("# Hello")
        );
        let json = serde_json::json!({"blocks": []});
        assert_eq!(PostBody::Json(json.clone()).into_value(), json);
    }
}
