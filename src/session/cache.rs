use crate::constants::TOKEN_EXPIRY_LEEWAY_SECS;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// In-memory token store shared by every request. Holds at most one live token
/// per account key; a successful re-authentication replaces the prior entry.
///
/// Injectable rather than ambient process state, so the fast path and the
/// fallback path can be exercised independently.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: Mutex<HashMap<String, CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token for `account_key` if it is still valid.
    /// Tokens within the expiry leeway are treated as already expired and are
    /// never handed out.
    pub fn get_valid(&self, account_key: &str) -> Option<String> {
        let entries = self.lock();
        let entry = entries.get(account_key)?;

        let cutoff = Utc::now() + Duration::seconds(TOKEN_EXPIRY_LEEWAY_SECS);
        if entry.expires_at > cutoff {
            debug!("Token cache hit for {}", account_key);
            Some(entry.access_token.clone())
        } else {
            debug!("Cached token for {} has expired", account_key);
            None
        }
    }

    /// Stores a freshly issued token, replacing any prior entry for the key.
    pub fn store(&self, account_key: &str, access_token: String, expires_at: DateTime<Utc>) {
        let mut entries = self.lock();
        entries.insert(
            account_key.to_string(),
            CachedToken {
                access_token,
                expires_at,
            },
        );
        debug!("Stored token for {} (expires {})", account_key, expires_at);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedToken>> {
        // A poisoned lock still guards a structurally valid map.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
