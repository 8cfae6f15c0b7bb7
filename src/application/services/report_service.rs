use crate::application::models::report::ReportMetadata;
use crate::config::Config;
use crate::error::AppError;
use crate::transport::http_client::PbiHttpClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Looks up embedding metadata for a single report.
#[async_trait]
pub trait ReportResolver: Send + Sync {
    /// Fetches the embed URL and canonical id for the report addressed by
    /// `group_id`/`report_id`. One attempt per call; retries are a caller
    /// concern.
    async fn resolve(
        &self,
        access_token: &str,
        group_id: &str,
        report_id: &str,
    ) -> Result<ReportMetadata, AppError>;
}

pub struct ReportService {
    config: Arc<Config>,
    client: Arc<PbiHttpClient>,
}

impl ReportService {
    pub fn new(config: Arc<Config>, client: Arc<PbiHttpClient>) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ReportResolver for ReportService {
    async fn resolve(
        &self,
        access_token: &str,
        group_id: &str,
        report_id: &str,
    ) -> Result<ReportMetadata, AppError> {
        let url = format!(
            "{}/groups/{}/reports/{}",
            self.config.rest_api.base_url, group_id, report_id
        );
        info!("Fetching report metadata for {}/{}", group_id, report_id);

        let metadata: ReportMetadata = self.client.get_with_bearer(&url, access_token).await?;

        debug!("Report {} resolves to embed URL {}", report_id, metadata.embed_url);
        Ok(metadata)
    }
}
