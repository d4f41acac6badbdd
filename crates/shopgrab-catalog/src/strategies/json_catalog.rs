//! Strategies 1 and 2: the storefront's JSON catalog endpoints.
//!
//! The primary endpoint is `/products.json`; the secondary is the
//! `/collections/all/products.json` variant some storefronts serve when the
//! primary is blocked. Both return the same document shape and share one
//! parser.

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::types::{CatalogDocument, RawRecord};

/// Upper bound on catalog entries taken from one document.
const MAX_ENTRIES: usize = 250;

pub(crate) async fn fetch_primary(client: &CatalogClient) -> Result<Vec<RawRecord>, CatalogError> {
    let url = format!("{}/products.json?limit={MAX_ENTRIES}", client.origin());
    fetch_and_parse(client, &url).await
}

pub(crate) async fn fetch_collection_variant(
    client: &CatalogClient,
) -> Result<Vec<RawRecord>, CatalogError> {
    let url = format!("{}/collections/all/products.json", client.origin());
    fetch_and_parse(client, &url).await
}

async fn fetch_and_parse(
    client: &CatalogClient,
    url: &str,
) -> Result<Vec<RawRecord>, CatalogError> {
    let body = client.fetch_text(url).await?;
    let document: CatalogDocument =
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("catalog document from {url}"),
            source: e,
        })?;

    let mut entries = document.into_entries();
    entries.truncate(MAX_ENTRIES);

    Ok(entries.into_iter().map(|e| e.into_raw("json")).collect())
}
