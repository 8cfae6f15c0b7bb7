use crate::config::Config;
use crate::constants::{DEFAULT_TOKEN_LIFETIME_SECS, TOKEN_ENDPOINT_PATH};
use crate::error::AuthError;
use crate::session::cache::TokenCache;
use crate::session::interface::TokenSource;
use crate::transport::http_client::PbiHttpClient;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: String,
    error_description: String,
}

/// Acquires bearer tokens for the fixed service account: silent reuse of the
/// cached token first, full username/password grant against the identity
/// provider otherwise.
pub struct Authenticator {
    config: Arc<Config>,
    client: Arc<PbiHttpClient>,
    cache: Arc<TokenCache>,
}

impl Authenticator {
    pub fn new(config: Arc<Config>, client: Arc<PbiHttpClient>, cache: Arc<TokenCache>) -> Self {
        Self {
            config,
            client,
            cache,
        }
    }

    fn token_url(&self) -> String {
        format!(
            "{}{}",
            self.config.credentials.authority_url, TOKEN_ENDPOINT_PATH
        )
    }

    /// Performs the full credential grant and stores the result in the cache.
    /// The cache is only mutated on success.
    #[instrument(skip(self))]
    async fn authenticate(&self) -> Result<String, AuthError> {
        let creds = &self.config.credentials;
        debug!("Requesting new token for {}", creds.username);

        let scope = creds.scope.join(" ");
        let form = [
            ("grant_type", "password"),
            ("client_id", creds.client_id.as_str()),
            ("username", creds.username.as_str()),
            ("password", creds.password.as_str()),
            ("scope", scope.as_str()),
        ];

        let (status, body) = self
            .client
            .post_form(&self.token_url(), &form)
            .await
            .map_err(AuthError::from)?;

        if status.is_success() {
            let token: TokenResponse = serde_json::from_str(&body)?;
            let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
            let expires_at = Utc::now() + Duration::seconds(lifetime as i64);

            self.cache
                .store(&creds.username, token.access_token.clone(), expires_at);

            info!(
                "Authenticated {} (token valid for {}s)",
                creds.username, lifetime
            );
            Ok(token.access_token)
        } else {
            // Surface the provider's error code and description untouched; an
            // unparseable body is carried raw under the HTTP status.
            let failure = match serde_json::from_str::<ProviderError>(&body) {
                Ok(provider) => AuthError::Provider {
                    error: provider.error,
                    error_description: provider.error_description,
                },
                Err(_) => AuthError::Provider {
                    error: status.to_string(),
                    error_description: body,
                },
            };
            warn!("Authentication rejected for {}: {}", creds.username, failure);
            Err(failure)
        }
    }
}

#[async_trait::async_trait]
impl TokenSource for Authenticator {
    async fn acquire_token(&self) -> Result<String, AuthError> {
        let account_key = self.config.credentials.username.as_str();

        if let Some(token) = self.cache.get_valid(account_key) {
            debug!("Reusing cached token for {}", account_key);
            return Ok(token);
        }

        self.authenticate().await
    }
}
