//! Normalization from raw candidate records to the canonical
//! [`Product`] shape.
//!
//! Applied uniformly to every strategy's output and to the bundled
//! fallback dataset, so URL, image, and price handling never depends on
//! which strategy produced a record.

use shopgrab_core::Product;

use crate::types::RawRecord;

/// Normalizes one raw candidate record into a [`Product`].
///
/// Pure and infallible in the error sense: a record without a usable title
/// is dropped (`None`), and any other field that cannot be normalized
/// degrades to `None` on the product rather than failing the record.
#[must_use]
pub fn normalize_record(raw: RawRecord, origin: &str) -> Option<Product> {
    let origin = origin.trim_end_matches('/');

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())?;

    let url = build_product_url(raw.handle.as_deref(), raw.url.as_deref(), origin);

    // Keep the source slug when the strategy supplied one; otherwise recover
    // it from the product-page URL so sitemap and HTML records still carry a
    // usable handle.
    let handle = raw.handle.or_else(|| handle_from_url(&url));

    let id = raw
        .id
        .filter(|s| !s.is_empty())
        .or_else(|| handle.clone())
        .unwrap_or_else(|| title.clone());

    let image = raw.image.and_then(|i| normalize_image_url(&i, origin));
    let price = raw.price.and_then(normalize_price);

    Some(Product {
        id,
        title,
        url,
        image,
        price,
        handle,
    })
}

/// Builds the product-page URL: from the handle when present, else from the
/// record's own URL field, else the storefront root.
fn build_product_url(handle: Option<&str>, url: Option<&str>, origin: &str) -> String {
    if let Some(handle) = handle.filter(|h| !h.is_empty()) {
        return format!("{origin}/products/{handle}");
    }
    if let Some(url) = url {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        if url.starts_with('/') {
            return format!("{origin}{url}");
        }
    }
    format!("{origin}/")
}

/// Extracts the slug from a `/products/<slug>` URL path.
fn handle_from_url(url: &str) -> Option<String> {
    let idx = url.find("/products/")?;
    let rest = &url[idx + "/products/".len()..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let handle = &rest[..end];
    (!handle.is_empty()).then(|| handle.to_string())
}

/// Normalizes an image URL to an absolute `https?` URL.
///
/// Protocol-relative (`//host/path`) is upgraded to `https`, root-relative
/// (`/path`) is prefixed with the storefront origin, an already-absolute URL
/// passes through, and anything unparsable is dropped.
fn normalize_image_url(raw: &str, origin: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if trimmed.starts_with('/') {
        return Some(format!("{origin}{trimmed}"));
    }
    match reqwest::Url::parse(trimmed) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Some(u.to_string()),
        _ => None,
    }
}

/// Normalizes a raw price to positive major currency units.
///
/// Sources disagree on units: some report integer cents, some decimal
/// dollars. An integer-like value above 1000 is treated as cents and
/// divided by 100; everything else passes through. A price of 0 or below
/// is dropped.
fn normalize_price(raw: f64) -> Option<f64> {
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    if raw > 1000.0 && raw.fract() == 0.0 {
        Some(raw / 100.0)
    } else {
        Some(raw)
    }
}
