use std::fmt::{Display, Formatter};

use rblog_types::post::PostId;
use url::Url;

/// Upstream blog API routes consumed by the relay.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    BlogList,
    BlogContent(PostId),
    Rss,
}

impl Endpoint {
    pub const PREFIX: &'static str = "/api/v1";

    pub fn path(&self) -> String {
        match self {
            Self::BlogList => format!("{}/blog/list", Self::PREFIX),
            Self::BlogContent(_) => format!("{}/blog/content", Self::PREFIX),
            Self::Rss => format!("{}/rss", Self::PREFIX),
        }
    }

    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.join(&self.path())?;
        if let Self::BlogContent(id) = self {
            url.query_pairs_mut().append_pair("id", &id.to_string());
        }
        Ok(url)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlogContent(id) => write!(f, "{}?id={}", self.path(), id),
            _ => write!(f, "{}", self.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let base = Url::parse("http://127.0.0.1:9000").unwrap();
        assert_eq!(
            Endpoint::BlogList.url(&base).unwrap().as_str(),
            "http://127.0.0.1:9000/api/v1/blog/list"
        );
        assert_eq!(
            Endpoint::Rss.url(&base).unwrap().as_str(),
            "http://127.0.0.1:9000/api/v1/rss"
        );
        let id = "42".parse().unwrap();
        assert_eq!(
            Endpoint::BlogContent(id).url(&base).unwrap().as_str(),
            "http://127.0.0.1:9000/api/v1/blog/content?id=42"
        );
        assert_eq!(Endpoint::BlogContent(id).to_string(), "/api/v1/blog/content?id=42");
    }
}
