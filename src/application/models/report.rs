use crate::storage::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One catalog entry: a display label plus the workspace and report
/// identifiers addressing the dashboard in the reporting service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDescriptor {
    pub label: String,
    pub group_id: String,
    pub report_id: String,
}

/// Embedding metadata returned by the reporting API. Fetched fresh for every
/// request, never cached.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportMetadata {
    #[serde(rename = "embedUrl")]
    pub embed_url: String,
    /// Canonical report id as the API knows it.
    #[serde(rename = "id")]
    pub report_id: String,
}

/// Everything the external renderer needs to display the active report and
/// its navigation menu.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub access_token: String,
    pub embed_url: String,
    pub report_id: String,
    pub catalog: Arc<Catalog>,
    pub active: usize,
}
