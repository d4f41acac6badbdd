//! The strategy ladder.
//!
//! Tries acquisition strategies in fixed priority order — primary JSON
//! catalog, secondary JSON variant, sitemap + structured data, loose HTML —
//! and accepts the first one that yields at least one valid, deduplicated
//! product. When every live strategy errors or comes back empty, the
//! bundled fallback dataset is served. No strategy is retried within one
//! invocation; a repeat call by the caller is the retry mechanism.

mod html;
mod json_catalog;
mod sitemap;
mod structured_data;

use shopgrab_core::{CatalogConfig, Product};

use crate::client::CatalogClient;
use crate::dedupe::dedupe_by_url;
use crate::fallback::fallback_products;
use crate::normalize::normalize_record;
use crate::origin::extract_store_origin;
use crate::types::RawRecord;

/// Acquires the storefront's product catalog. Never fails: any total
/// failure resolves to the bundled fallback dataset, so the result is empty
/// only if the bundled dataset is itself empty.
pub async fn acquire_catalog(config: &CatalogConfig) -> Vec<Product> {
    match CatalogClient::new(config) {
        Ok(client) => fetch_catalog(&client, config).await,
        Err(e) => {
            tracing::warn!(error = %e, "HTTP client construction failed — serving fallback catalog");
            fallback_products(&extract_store_origin(&config.shop_url))
        }
    }
}

/// Runs the ladder against an already-constructed client. Same contract as
/// [`acquire_catalog`].
pub async fn fetch_catalog(client: &CatalogClient, config: &CatalogConfig) -> Vec<Product> {
    // Strategy 1: primary JSON catalog endpoint.
    match json_catalog::fetch_primary(client).await {
        Ok(raws) => {
            let products = finish(raws, client.origin());
            if !products.is_empty() {
                tracing::debug!(count = products.len(), "primary JSON catalog accepted");
                return products;
            }
        }
        Err(e) => tracing::warn!(error = %e, "primary JSON catalog strategy failed"),
    }

    // Strategy 2: collection-scoped JSON variant.
    match json_catalog::fetch_collection_variant(client).await {
        Ok(raws) => {
            let products = finish(raws, client.origin());
            if !products.is_empty() {
                tracing::debug!(count = products.len(), "collection JSON variant accepted");
                return products;
            }
        }
        Err(e) => tracing::warn!(error = %e, "collection JSON variant strategy failed"),
    }

    // Strategy 3: sitemap discovery + per-page structured data.
    match sitemap::fetch_structured(client, config).await {
        Ok(raws) => {
            let products = finish(raws, client.origin());
            if !products.is_empty() {
                tracing::debug!(count = products.len(), "sitemap strategy accepted");
                return products;
            }
        }
        Err(e) => tracing::warn!(error = %e, "sitemap strategy failed"),
    }

    // Strategy 4: loose HTML scan of the collection listing.
    match html::fetch_collection_pages(client).await {
        Ok(raws) => {
            let products = finish(raws, client.origin());
            if !products.is_empty() {
                tracing::debug!(count = products.len(), "loose HTML strategy accepted");
                return products;
            }
        }
        Err(e) => tracing::warn!(error = %e, "loose HTML strategy failed"),
    }

    tracing::warn!("every live strategy failed — serving bundled fallback catalog");
    fallback_products(client.origin())
}

/// Normalize + dedupe one strategy's raw output.
fn finish(raws: Vec<RawRecord>, origin: &str) -> Vec<Product> {
    dedupe_by_url(
        raws.into_iter()
            .filter_map(|raw| normalize_record(raw, origin))
            .collect(),
    )
}
