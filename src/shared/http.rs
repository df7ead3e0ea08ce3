//! Shared HTTP client. One instance is built at startup and cloned into every adapter.

use reqwest::Client;
use std::time::Duration;
use tracing::info;

/// Desktop browser User-Agent. Search pages and Yahoo reject bare client agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.4951.54 Safari/537.36";

/// Build the shared client with a browser User-Agent and the given overall timeout.
pub fn build_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    let client = Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()?;
    info!(timeout_secs, "http client ready");
    Ok(client)
}
