use reqwest::StatusCode;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Failure to obtain a bearer token for the service account.
#[derive(Debug)]
pub enum AuthError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    /// The identity provider rejected the credential grant. `error` and
    /// `error_description` carry the provider's fields untouched.
    Provider {
        error: String,
        error_description: String,
    },
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network(e) => write!(f, "network error: {e}"),
            AuthError::Json(e) => write!(f, "json error: {e}"),
            AuthError::Provider {
                error,
                error_description,
            } => write!(f, "{error}: {error_description}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Network(e)
    }
}
impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Json(e)
    }
}
impl From<AppError> for AuthError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Network(e) => AuthError::Network(e),
            AppError::Json(e) => AuthError::Json(e),
            AppError::Unexpected { status, body } => AuthError::Provider {
                error: status.to_string(),
                error_description: body,
            },
        }
    }
}

/// Failure of an authenticated call to the reporting API.
#[derive(Debug)]
pub enum AppError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    /// Non-success response; status and raw body kept for diagnostics.
    Unexpected { status: StatusCode, body: String },
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Unexpected { status, body } => {
                write!(f, "unexpected http status: {status}, body: {body}")
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

/// Terminal outcome of a "show report N" request. Each stage of the pipeline
/// short-circuits into its own variant.
#[derive(Debug)]
pub enum EmbedError {
    /// The requested index is outside the catalog bounds.
    NotFound(usize),
    Auth(AuthError),
    Resolve(AppError),
}

impl Display for EmbedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::NotFound(index) => write!(f, "report {index} not found"),
            EmbedError::Auth(e) => write!(f, "authentication failed: {e}"),
            EmbedError::Resolve(e) => write!(f, "report resolution failed: {e}"),
        }
    }
}

impl std::error::Error for EmbedError {}

impl From<AuthError> for EmbedError {
    fn from(e: AuthError) -> Self {
        EmbedError::Auth(e)
    }
}
impl From<AppError> for EmbedError {
    fn from(e: AppError) -> Self {
        EmbedError::Resolve(e)
    }
}
