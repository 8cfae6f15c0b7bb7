use anyhow::Result;
use pbi_client::application::services::embed_service::EmbedService;
use pbi_client::application::services::report_service::ReportService;
use pbi_client::config::Config;
use pbi_client::error::EmbedError;
use pbi_client::session::auth::Authenticator;
use pbi_client::session::cache::TokenCache;
use pbi_client::storage::catalog::Catalog;
use pbi_client::transport::http_client::PbiHttpClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger
    tracing_subscriber::fmt::init();

    // Catalog path defaults to reportes.json next to the process
    let catalog_path =
        std::env::var("PBI_CATALOG_PATH").unwrap_or_else(|_| String::from("reportes.json"));
    let catalog = Arc::new(Catalog::load(&catalog_path));

    let config = Arc::new(Config::new());
    let client = Arc::new(PbiHttpClient::new(config.rest_api.timeout)?);
    let cache = Arc::new(TokenCache::new());

    let tokens = Arc::new(Authenticator::new(
        Arc::clone(&config),
        Arc::clone(&client),
        cache,
    ));
    let reports = Arc::new(ReportService::new(config, client));
    let service = EmbedService::new(catalog, tokens, reports);

    // Resolve the first report, the way the front end's "/" route would
    match service.handle(0).await {
        Ok(payload) => {
            println!("Active report: {}", payload.active);
            println!("Embed URL:     {}", payload.embed_url);
            println!("Report id:     {}", payload.report_id);
            println!("Menu entries:  {}", payload.catalog.len());
        }
        Err(EmbedError::NotFound(index)) => {
            eprintln!("Report {} not found (catalog empty?)", index);
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
        }
    }

    Ok(())
}
