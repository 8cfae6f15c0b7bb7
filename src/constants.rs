pub(crate) const DEFAULT_AUTHORITY_BASE: &str = "https://login.microsoftonline.com";
pub(crate) const DEFAULT_API_BASE_URL: &str = "https://api.powerbi.com/v1.0/myorg";
pub(crate) const DEFAULT_SCOPE: &str = "https://analysis.windows.net/powerbi/api/Report.Read.All";

pub(crate) const TOKEN_ENDPOINT_PATH: &str = "/oauth2/v2.0/token";

pub(crate) const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Tokens this close to expiry are treated as already expired, so a request
/// never starts with a token that lapses mid-flight.
pub(crate) const TOKEN_EXPIRY_LEEWAY_SECS: i64 = 30;
