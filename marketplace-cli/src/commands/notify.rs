//! One-shot notifications from JSON files.

use marketplace_webhooks::{BookEvent, BrandEvent, MarketplaceClient, SeoEvent};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Read and parse an event file.
pub fn read_event<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    debug!(path = %path.display(), "Reading event file");
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `brand <FILE>`
pub async fn brand(client: &MarketplaceClient, file: &Path) -> CliResult<()> {
    let brand: BrandEvent = read_event(file)?;
    let result = client.notify_brand_created(&brand).await?;
    print_json(&result)
}

/// `book --brand-id <ID> [--cover <PATH>] [--pdf <PATH>] <FILE>`
pub async fn book(
    client: &MarketplaceClient,
    brand_id: &str,
    file: &Path,
    cover: Option<&Path>,
    pdf: Option<&Path>,
) -> CliResult<()> {
    let book: BookEvent = read_event(file)?;
    let result = client
        .notify_book_generated(brand_id, &book, cover, pdf)
        .await?;
    print_json(&result)
}

/// `seo --brand-id <ID> <FILE>`
pub async fn seo(client: &MarketplaceClient, brand_id: &str, file: &Path) -> CliResult<()> {
    let post: SeoEvent = read_event(file)?;
    let result = client.notify_seo_generated(brand_id, &post).await?;
    print_json(&result)
}
