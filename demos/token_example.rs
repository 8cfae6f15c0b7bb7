use anyhow::Result;
use pbi_client::config::Config;
use pbi_client::session::auth::Authenticator;
use pbi_client::session::cache::TokenCache;
use pbi_client::session::interface::TokenSource;
use pbi_client::transport::http_client::PbiHttpClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger
    tracing_subscriber::fmt::init();

    // Load the configuration from the environment
    let config = Arc::new(Config::new());
    let client = Arc::new(PbiHttpClient::new(config.rest_api.timeout)?);
    let cache = Arc::new(TokenCache::new());

    let authenticator = Authenticator::new(config, client, cache);

    // First acquisition hits the identity provider
    match authenticator.acquire_token().await {
        Ok(token) => {
            println!("Token acquired ({} chars)", token.len());

            // Second acquisition is served from the cache
            let cached = authenticator.acquire_token().await?;
            println!("Silent reuse returned the same token: {}", cached == token);
        }
        Err(e) => {
            eprintln!("Authentication error: {}", e);
        }
    }

    Ok(())
}
