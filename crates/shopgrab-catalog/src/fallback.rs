//! The fallback provider: a bundled static dataset served when every live
//! strategy fails.

use shopgrab_core::Product;

use crate::dedupe::dedupe_by_url;
use crate::normalize::normalize_record;
use crate::types::CatalogEntry;

static BUNDLED_CATALOG: &str = include_str!("../data/fallback_products.json");

/// Returns the bundled fallback catalog, run through the same normalizer
/// and deduplicator as live strategy output.
///
/// Cannot fail: an unparsable bundle is a build defect and yields an empty
/// list, which is the pipeline's only legitimately empty output.
#[must_use]
pub fn fallback_products(origin: &str) -> Vec<Product> {
    let entries: Vec<CatalogEntry> = match serde_json::from_str(BUNDLED_CATALOG) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(error = %e, "bundled fallback dataset failed to parse");
            return Vec::new();
        }
    };

    dedupe_by_url(
        entries
            .into_iter()
            .filter_map(|entry| normalize_record(entry.into_raw("fallback"), origin))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://shop.example.com";

    #[test]
    fn bundled_catalog_is_non_empty() {
        assert!(!fallback_products(ORIGIN).is_empty());
    }

    #[test]
    fn bundled_catalog_satisfies_output_invariants() {
        let products = fallback_products(ORIGIN);
        for product in &products {
            assert!(!product.title.is_empty(), "title must be non-empty");
            assert!(!product.id.is_empty(), "id must be non-empty");
            assert!(
                product.url.starts_with(ORIGIN),
                "url must be on the storefront origin: {}",
                product.url
            );
        }
        let urls: std::collections::HashSet<_> = products.iter().map(|p| &p.url).collect();
        assert_eq!(urls.len(), products.len(), "urls must be unique");
    }

    #[test]
    fn bundled_prices_are_in_major_units() {
        let products = fallback_products(ORIGIN);
        for product in products {
            if let Some(price) = product.price {
                assert!(price > 0.0 && price < 1000.0, "unexpected price: {price}");
            }
        }
    }
}
