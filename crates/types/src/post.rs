use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Identifier of a blog post as accepted in `?id=` query strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostIdError {
    #[error("Missing post id")]
    Missing,

    #[error("Invalid post id: {0:?}")]
    Invalid(String),
}

impl PostId {
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(PostId(id))
    }

    /// Validates a raw query value. An absent value is `Missing`.
    pub fn from_query(raw: Option<&str>) -> Result<Self, PostIdError> {
        raw.ok_or(PostIdError::Missing)?.parse()
    }
}

impl FromStr for PostId {
    type Err = PostIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PostIdError::Missing);
        }
        s.parse::<u32>()
            .ok()
            .and_then(PostId::new)
            .ok_or_else(|| PostIdError::Invalid(s.to_string()))
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blog record as served by the content endpoint.
/// Only `title`, `time` and `content_url` are relied upon.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PostMeta {
    pub id: Option<i64>,
    pub title: String,
    pub subtitle: Option<String>,
    pub time: String,
    pub cover: Option<String>,
    pub hits: Option<i64>,
    pub content_url: String,
}

/// The joined payload handed to the page: `{ "data": { "post", "title", "time" } }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PostDetail {
    pub data: PostDetailData,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PostDetailData {
    pub post: serde_json::Value,
    pub title: String,
    pub time: String,
}

impl PostDetail {
    pub fn new(meta: PostMeta, post: serde_json::Value) -> Self {
        PostDetail {
            data: PostDetailData {
                post,
                title: meta.title,
                time: meta.time,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_parse() {
        assert_eq!("42".parse::<PostId>(), Ok(PostId(42)));
        assert_eq!(" 7 ".parse::<PostId>(), Ok(PostId(7)));
        assert_eq!("".parse::<PostId>(), Err(PostIdError::Missing));
        assert_eq!("0".parse::<PostId>(), Err(PostIdError::Invalid("0".to_string())));
        assert_eq!("-3".parse::<PostId>(), Err(PostIdError::Invalid("-3".to_string())));
        assert_eq!("abc".parse::<PostId>(), Err(PostIdError::Invalid("abc".to_string())));
    }

    #[test]
    fn test_post_id_from_query() {
        assert_eq!(PostId::from_query(None), Err(PostIdError::Missing));
        assert_eq!(PostId::from_query(Some("9")), Ok(PostId(9)));
    }

    #[test]
    fn test_meta_minimal_fields() {
        let meta: PostMeta = serde_json::from_str(
            r#"{"content_url":"https://cdn/x.md","title":"T","time":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(meta.content_url, "https://cdn/x.md");
        assert!(meta.subtitle.is_none());
    }

    #[test]
    fn test_meta_requires_content_url() {
        let meta = serde_json::from_str::<PostMeta>(r#"{"title":"T","time":"2024-01-01"}"#);
        assert!(meta.is_err());
    }

    #[test]
    fn test_detail_shape() {
        let meta = PostMeta {
            id: Some(42),
            title: "T".to_string(),
            subtitle: Some("sub".to_string()),
            time: "2024-01-01".to_string(),
            cover: None,
            hits: Some(3),
            content_url: "https://cdn/x.md".to_string(),
        };
        let detail = PostDetail::new(meta, serde_json::Value::from("# Hello"));
        assert_eq!(
            serde_json::to_string(&detail).unwrap(),
            r##"{"data":{"post":"# Hello","title":"T","time":"2024-01-01"}}"##
        );
    }
}
