use crate::error::AuthError;

/// Source of bearer tokens for the fixed service account.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns a valid access token, reusing a cached one when possible.
    async fn acquire_token(&self) -> Result<String, AuthError>;
}
