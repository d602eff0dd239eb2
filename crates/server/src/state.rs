use std::sync::Arc;

use rblog_api::client::Client;

use super::config::Config;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<Client>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, rblog_api::error::Error> {
        let client = Client::new(Some(config.client_config()))?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: Config, client: Client) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }
}
