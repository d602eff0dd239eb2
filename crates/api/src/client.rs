use rblog_types::{
    envelope::Envelope,
    post::{PostDetail, PostId, PostMeta},
};
use reqwest::{header::HeaderMap, Method};
use tracing::{debug, error};
use url::Url;

use super::{
    endpoint::Endpoint,
    error::Error,
    response::{PostBody, UpstreamResponse},
};

/// Configuration for the client.
/// base_url: Origin of the blog backend. (default: http://127.0.0.1:9000)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub base_url: Option<Url>,
}

impl Config {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:9000";

    pub fn new(base_url: Option<Url>) -> Self {
        Config { base_url }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone().unwrap_or_else(Self::default_base_url)
    }

    fn default_base_url() -> Url {
        Url::parse(Self::DEFAULT_BASE_URL).expect("default base url is valid")
    }
}

/// A client for the blog backend.
/// Requests are sent once; there is no retry and no caching.
/// `http` follows redirects like a browser fetch, `passthrough` never does so
/// forwarded 3xx replies reach the caller as-is.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    passthrough: reqwest::Client,
}

impl Client {
    pub fn new(cfg: Option<Config>) -> Result<Self, Error> {
        let passthrough = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            base_url: cfg.unwrap_or_default().base_url(),
            http: reqwest::Client::new(),
            passthrough,
        })
    }

    pub async fn get(&self, endpoint: &Endpoint) -> Result<reqwest::Response, Error> {
        let url = endpoint.url(&self.base_url)?;
        debug!("Sending request to {}", url);
        let resp = self.http.get(url).send().await?;
        Self::handle_response(&endpoint.to_string(), resp)
    }

    fn handle_response(target: &str, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        match resp.status() {
            status if status.is_success() => {
                debug!("request: {} status: {}", target, status);
                Ok(resp)
            }
            reqwest::StatusCode::NOT_FOUND => {
                error!("request {} status: {}", target, resp.status());
                Err(Error::NotFound(target.to_string()))
            }
            status => {
                error!("request {} status: {}", target, status);
                Err(Error::StatusCode(status))
            }
        }
    }

    pub async fn get_list(&self) -> Result<UpstreamResponse, Error> {
        Ok(UpstreamResponse::read(self.get(&Endpoint::BlogList).await?).await?)
    }

    pub async fn get_rss(&self) -> Result<UpstreamResponse, Error> {
        Ok(UpstreamResponse::read(self.get(&Endpoint::Rss).await?).await?)
    }

    pub async fn get_post_meta(&self, id: PostId) -> Result<PostMeta, Error> {
        let resp = self.get(&Endpoint::BlogContent(id)).await?;
        let envelope: Envelope<PostMeta> = serde_json::from_slice(&resp.bytes().await?)?;
        Ok(envelope.into_payload()?)
    }

    /// Fetches a post body. `content_url` is normally absolute; a relative one
    /// resolves against the backend origin.
    pub async fn get_post_body(&self, content_url: &str) -> Result<PostBody, Error> {
        let url = self.base_url.join(content_url)?;
        debug!("Fetching post body from {}", url);
        let resp = self.http.get(url).send().await?;
        PostBody::parse(Self::handle_response(content_url, resp)?).await
    }

    /// Looks up the post record, then fetches its body.
    /// The body is never requested when the lookup fails.
    pub async fn get_post_detail(&self, id: PostId) -> Result<PostDetail, Error> {
        let meta = self.get_post_meta(id).await?;
        let post = self.get_post_body(&meta.content_url).await?;
        Ok(PostDetail::new(meta, post.into_value()))
    }

    /// Sends an arbitrary request to the backend origin, keeping method, path,
    /// query, headers and body. The reply is returned whatever its status,
    /// redirects included.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: HeaderMap,
        body: bytes::Bytes,
    ) -> Result<reqwest::Response, Error> {
        let url = self.base_url.join(path_and_query)?;
        debug!("Forwarding {} {}", method, url);
        Ok(self
            .passthrough
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?)
    }
}
