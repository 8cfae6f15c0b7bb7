use crate::error::AppError;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// HTTP client shared by the identity and reporting endpoints.
#[derive(Debug)]
pub struct PbiHttpClient {
    client: Client,
}

impl PbiHttpClient {
    /// Creates a new client with the given request timeout in seconds.
    pub fn new(timeout: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self { client })
    }

    /// Sends a bearer-authenticated GET request and parses the JSON response.
    #[instrument(skip(self, token))]
    pub async fn get_with_bearer<T: DeserializeOwned + Debug>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, AppError> {
        debug!("Sending GET request to {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;

        Self::handle_response(response).await
    }

    /// Sends a form-urlencoded POST request and returns the status with the
    /// raw body, so the caller can parse endpoint-specific error payloads.
    #[instrument(skip(self, form))]
    pub async fn post_form<F: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &F,
    ) -> Result<(StatusCode, String), AppError> {
        debug!("Sending POST request to {}", url);

        let response = self.client.post(url).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Response status: {}", status);

        Ok((status, body))
    }

    async fn handle_response<T: DeserializeOwned + Debug>(
        response: Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", body_text);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            Ok(body)
        } else {
            error!(
                "API request failed. Status: {}, Body: {}",
                status, body_text
            );
            Err(AppError::Unexpected {
                status,
                body: body_text,
            })
        }
    }
}
