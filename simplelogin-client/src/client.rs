// simplelogin-client/src/client.rs
use crate::config::Settings;
use anyhow::{anyhow, Result};
use log::debug;
use simplelogin_api::{ReqwestClient, SimpleLoginClient};
use std::time::Duration;

/// Per-request timeout of the HTTP transport
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type Client = SimpleLoginClient<ReqwestClient>;

/// Build an API client from resolved settings
pub fn connect(settings: &Settings) -> Result<Client> {
    let http = ReqwestClient::new(Some(REQUEST_TIMEOUT))
        .map_err(|e| anyhow!("Failed to build HTTP client: {}", e.message))?;

    let client = SimpleLoginClient::new(http, &settings.base_url, settings.api_key.clone());
    debug!(
        "using {} ({})",
        client.base_url(),
        if client.has_api_key() { "authenticated" } else { "no API key" }
    );
    Ok(client)
}
