use crate::application::models::report::RenderPayload;
use crate::application::services::report_service::ReportResolver;
use crate::error::EmbedError;
use crate::session::interface::TokenSource;
use crate::storage::catalog::Catalog;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestrates a "show report N" request: catalog lookup, token acquisition,
/// metadata resolution. Each stage short-circuits into its own error variant;
/// nothing persists across calls except the shared token cache behind
/// `TokenSource`.
pub struct EmbedService {
    catalog: Arc<Catalog>,
    tokens: Arc<dyn TokenSource>,
    reports: Arc<dyn ReportResolver>,
}

impl EmbedService {
    pub fn new(
        catalog: Arc<Catalog>,
        tokens: Arc<dyn TokenSource>,
        reports: Arc<dyn ReportResolver>,
    ) -> Self {
        Self {
            catalog,
            tokens,
            reports,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn handle(&self, index: usize) -> Result<RenderPayload, EmbedError> {
        // Bounds check comes first: an out-of-range index never touches the
        // authenticator.
        let descriptor = match self.catalog.get(index) {
            Some(descriptor) => descriptor.clone(),
            None => {
                warn!(
                    "Report index {} out of range (catalog has {} entries)",
                    index,
                    self.catalog.len()
                );
                return Err(EmbedError::NotFound(index));
            }
        };

        let access_token = self.tokens.acquire_token().await?;

        let metadata = self
            .reports
            .resolve(&access_token, &descriptor.group_id, &descriptor.report_id)
            .await?;

        debug!("Rendering report {} ({})", index, descriptor.label);
        Ok(RenderPayload {
            access_token,
            embed_url: metadata.embed_url,
            report_id: metadata.report_id,
            catalog: Arc::clone(&self.catalog),
            active: index,
        })
    }
}
