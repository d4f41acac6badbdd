//! Strategy 4: loose HTML scan of the collection-listing pages.
//!
//! Last resort, intentionally permissive: regex-scans anchors whose target
//! looks like a product page and pulls a title and image out of each
//! anchor's inner markup heuristically. Only ever reached when every
//! structured strategy has failed.

use regex::Regex;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::types::RawRecord;

/// Upper bound on records taken from the listing pages.
const MAX_RESULTS: usize = 60;

pub(crate) async fn fetch_collection_pages(
    client: &CatalogClient,
) -> Result<Vec<RawRecord>, CatalogError> {
    let origin = client.origin();

    let first = client
        .fetch_text(&format!("{origin}/collections/all"))
        .await?;
    let mut records = extract_anchor_products(&first, origin);

    // The second page is best-effort; many storefronts only have one.
    if records.len() < MAX_RESULTS {
        match client
            .fetch_text(&format!("{origin}/collections/all?page=2"))
            .await
        {
            Ok(body) => records.extend(extract_anchor_products(&body, origin)),
            Err(e) => tracing::debug!(error = %e, "second collection page fetch failed"),
        }
    }

    records.truncate(MAX_RESULTS);
    Ok(records)
}

/// Scans `html` for product-page anchors and heuristically extracts a title
/// (`alt` attribute, heading text, or a title-like `span`) and an image
/// `src` from each anchor's inner markup. Anchors with no extractable
/// title are skipped.
pub(crate) fn extract_anchor_products(html: &str, origin: &str) -> Vec<RawRecord> {
    let anchor_re = Regex::new(
        r#"(?is)<a\b[^>]*href\s*=\s*["']([^"']*/products/[^"']+)["'][^>]*>(.*?)</a>"#,
    )
    .expect("valid regex");
    let alt_re = Regex::new(r#"(?i)alt\s*=\s*["']([^"']+)["']"#).expect("valid regex");
    let heading_re = Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>").expect("valid regex");
    let span_re = Regex::new(
        r#"(?is)<span[^>]*class\s*=\s*["'][^"']*title[^"']*["'][^>]*>(.*?)</span>"#,
    )
    .expect("valid regex");
    let img_re = Regex::new(r#"(?is)<img[^>]+src\s*=\s*["']([^"']+)["']"#).expect("valid regex");

    let mut records = Vec::new();

    for cap in anchor_re.captures_iter(html) {
        if records.len() >= MAX_RESULTS {
            break;
        }

        let (href, inner) = match (cap.get(1), cap.get(2)) {
            (Some(h), Some(i)) => (h.as_str(), i.as_str()),
            _ => continue,
        };

        let url = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{href}", origin.trim_end_matches('/'))
        } else {
            continue;
        };

        let title = alt_re
            .captures(inner)
            .and_then(|c| c.get(1))
            .map(|m| clean_text(m.as_str()))
            .or_else(|| {
                heading_re
                    .captures(inner)
                    .and_then(|c| c.get(1))
                    .map(|m| clean_text(m.as_str()))
            })
            .or_else(|| {
                span_re
                    .captures(inner)
                    .and_then(|c| c.get(1))
                    .map(|m| clean_text(m.as_str()))
            })
            .filter(|t| !t.is_empty());

        let Some(title) = title else {
            continue;
        };

        let image = img_re
            .captures(inner)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_owned());

        records.push(RawRecord {
            id: None,
            handle: None,
            title: Some(title),
            url: Some(url),
            image,
            price: None,
            source: "html",
        });
    }

    records
}

/// Strips tags from a markup fragment and collapses whitespace.
fn clean_text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
