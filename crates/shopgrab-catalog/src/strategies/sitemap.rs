//! Strategy 3: sitemap discovery plus per-page structured-data extraction.
//!
//! Recovers a catalog when the JSON endpoints are blocked: the root sitemap
//! index names product sub-sitemaps, the sub-sitemaps name individual
//! product pages, and each page's JSON-LD block describes one product.
//! This is the most fetch-heavy strategy, so the per-page fetches run
//! through a bounded worker pool and the whole strategy runs under a
//! wall-clock deadline; on expiry it fails and the ladder falls through.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use quick_xml::events::Event;
use quick_xml::Reader;
use shopgrab_core::CatalogConfig;

use super::structured_data::extract_product_blocks;
use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::types::RawRecord;

/// Product sub-sitemaps taken from the root index.
const MAX_PRODUCT_SITEMAPS: usize = 3;
/// Product-page URLs collected across all sub-sitemaps.
const MAX_PRODUCT_URLS: usize = 120;
/// Product pages actually fetched.
const MAX_PAGE_FETCHES: usize = 100;

pub(crate) async fn fetch_structured(
    client: &CatalogClient,
    config: &CatalogConfig,
) -> Result<Vec<RawRecord>, CatalogError> {
    let deadline = Duration::from_secs(config.sitemap_deadline_secs);
    match tokio::time::timeout(deadline, run(client, config)).await {
        Ok(result) => result,
        Err(_) => Err(CatalogError::DeadlineExpired {
            strategy: "sitemap",
            deadline_secs: config.sitemap_deadline_secs,
        }),
    }
}

async fn run(
    client: &CatalogClient,
    config: &CatalogConfig,
) -> Result<Vec<RawRecord>, CatalogError> {
    let origin = client.origin();

    // Phase 1: discover product sub-sitemaps from the root index. A blocked
    // or unparsable index is treated the same as an index that lists no
    // product sub-sitemaps; the conventional name below covers both.
    let index_locs = match client.fetch_text(&format!("{origin}/sitemap.xml")).await {
        Ok(index) => extract_loc_entries(&index).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "root sitemap index did not parse");
            Vec::new()
        }),
        Err(e) => {
            tracing::debug!(error = %e, "root sitemap index fetch failed");
            Vec::new()
        }
    };
    let mut sub_sitemaps: Vec<String> = index_locs
        .into_iter()
        .filter(|loc| loc.contains("sitemap_products"))
        .take(MAX_PRODUCT_SITEMAPS)
        .collect();

    if sub_sitemaps.is_empty() {
        // Some storefronts serve the conventionally-named sub-sitemap without
        // listing it in an index.
        sub_sitemaps.push(format!("{origin}/sitemap_products_1.xml"));
    }

    // Phase 2a: enumerate product-page URLs.
    let mut page_urls: Vec<String> = Vec::new();
    'sitemaps: for sub in &sub_sitemaps {
        let body = match client.fetch_text(sub).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(sitemap = %sub, error = %e, "sub-sitemap fetch failed");
                continue;
            }
        };
        for loc in extract_loc_entries(&body)? {
            if loc.contains("/products/") {
                page_urls.push(loc);
                if page_urls.len() >= MAX_PRODUCT_URLS {
                    break 'sitemaps;
                }
            }
        }
    }
    page_urls.truncate(MAX_PAGE_FETCHES);

    tracing::debug!(
        sitemaps = sub_sitemaps.len(),
        pages = page_urls.len(),
        "sitemap discovery complete"
    );

    // Phase 2b: fetch pages through a bounded pool and scan each for a
    // JSON-LD Product block. `buffered` (not `buffer_unordered`) keeps the
    // sitemap's own page order in the output. A page that fails to fetch
    // contributes nothing rather than failing the strategy.
    let per_page: Vec<Vec<RawRecord>> = stream::iter(page_urls)
        .map(|url| async move {
            match client.fetch_text(&url).await {
                Ok(html) => extract_product_blocks(&html, &url),
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "product page fetch failed");
                    Vec::new()
                }
            }
        })
        .buffered(config.page_concurrency.max(1))
        .collect()
        .await;

    Ok(per_page.into_iter().flatten().collect())
}

/// Collects the text of every `<loc>` element in a sitemap document.
fn extract_loc_entries(xml: &str) -> Result<Vec<String>, CatalogError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locs = Vec::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                in_loc = e.name().as_ref() == b"loc";
            }
            Ok(Event::End(_)) => {
                in_loc = false;
            }
            Ok(Event::Text(e)) => {
                if in_loc {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if !text.is_empty() {
                        locs.push(text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_loc {
                    let text = String::from_utf8_lossy(e.as_ref()).trim().to_string();
                    if !text.is_empty() {
                        locs.push(text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CatalogError::Xml(e)),
            _ => {}
        }
    }

    Ok(locs)
}
