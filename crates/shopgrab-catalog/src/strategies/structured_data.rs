//! schema.org JSON-LD `Product` extraction from product-page markup.

use regex::Regex;

use crate::types::{value_to_f64, RawRecord};

/// Extracts `Product` records from the `<script type="application/ld+json">`
/// blocks of one product page. `page_url` becomes the record's URL.
pub(crate) fn extract_product_blocks(html: &str, page_url: &str) -> Vec<RawRecord> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    let mut results = Vec::new();

    for cap in script_re.captures_iter(html) {
        let json_text = match cap.get(1) {
            Some(m) => m.as_str(),
            None => continue,
        };

        let value: serde_json::Value = match serde_json::from_str(json_text) {
            Ok(v) => v,
            Err(_) => continue,
        };

        // Accept top-level object, array, or @graph container.
        let mut candidates: Vec<serde_json::Value> = if let Some(arr) = value.as_array() {
            arr.clone()
        } else {
            vec![value]
        };

        let mut expanded = Vec::new();
        for item in &candidates {
            if let Some(graph) = item.get("@graph").and_then(serde_json::Value::as_array) {
                expanded.extend(graph.iter().cloned());
            }
        }
        candidates.extend(expanded);

        for item in candidates {
            if let Some(record) = jsonld_item_to_record(&item, page_url) {
                results.push(record);
            }
        }
    }

    results
}

/// Converts a single JSON-LD object to a raw record, if its declared type
/// is `Product`.
fn jsonld_item_to_record(item: &serde_json::Value, page_url: &str) -> Option<RawRecord> {
    let type_node = item.get("@type")?;

    // `@type` may be a plain string or an array of strings.
    let type_matches = if let Some(s) = type_node.as_str() {
        s.eq_ignore_ascii_case("Product")
    } else if let Some(arr) = type_node.as_array() {
        arr.iter()
            .filter_map(|v| v.as_str())
            .any(|s| s.eq_ignore_ascii_case("Product"))
    } else {
        false
    };
    if !type_matches {
        return None;
    }

    let title = item.get("name").and_then(|v| v.as_str()).map(str::to_owned);
    let image = extract_image(item.get("image"));
    let price = extract_offer_price(item.get("offers"));

    Some(RawRecord {
        id: item
            .get("sku")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        handle: None,
        title,
        url: Some(page_url.to_owned()),
        image,
        price,
        source: "sitemap",
    })
}

/// `image` may be a string, an array of strings/objects, or an
/// `ImageObject` with a `url` field.
fn extract_image(node: Option<&serde_json::Value>) -> Option<String> {
    let node = node?;
    if let Some(s) = node.as_str() {
        return Some(s.to_owned());
    }
    if let Some(arr) = node.as_array() {
        return extract_image(arr.first());
    }
    node.get("url")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}

/// `offers` may be a single offer object or an array of them; the price may
/// be a number or a numeric string.
fn extract_offer_price(node: Option<&serde_json::Value>) -> Option<f64> {
    let node = node?;
    if let Some(arr) = node.as_array() {
        return extract_offer_price(arr.first());
    }
    node.get("price").and_then(value_to_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://shop.example.com/products/cedar-candle";

    #[test]
    fn extracts_product_from_jsonld() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@type": "Product",
                "name": "Cedar Candle",
                "sku": "CC-001",
                "image": "https://cdn.example.com/cedar.jpg",
                "offers": {
                    "@type": "Offer",
                    "price": "24.00",
                    "priceCurrency": "USD"
                }
            }
            </script>
            </head></html>
        "#;

        let records = extract_product_blocks(html, PAGE_URL);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title.as_deref(), Some("Cedar Candle"));
        assert_eq!(record.id.as_deref(), Some("CC-001"));
        assert_eq!(record.image.as_deref(), Some("https://cdn.example.com/cedar.jpg"));
        assert_eq!(record.price, Some(24.0));
        assert_eq!(record.url.as_deref(), Some(PAGE_URL));
    }

    #[test]
    fn skips_non_product_types() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "BreadcrumbList", "name": "Home"}
            </script>
        "#;
        assert!(extract_product_blocks(html, PAGE_URL).is_empty());
    }

    #[test]
    fn type_as_array_is_accepted() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": ["Product", "IndividualProduct"], "name": "Cedar Candle"}
            </script>
        "#;
        let records = extract_product_blocks(html, PAGE_URL);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn graph_container_is_expanded() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@graph": [
                    {"@type": "Organization", "name": "Example Shop"},
                    {"@type": "Product", "name": "Cedar Candle", "offers": {"price": 24.0}}
                ]
            }
            </script>
        "#;
        let records = extract_product_blocks(html, PAGE_URL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, Some(24.0));
    }

    #[test]
    fn image_object_and_array_shapes_resolve() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Product", "name": "A", "image": {"@type": "ImageObject", "url": "https://cdn.example.com/a.jpg"}}
            </script>
            <script type="application/ld+json">
            {"@type": "Product", "name": "B", "image": ["https://cdn.example.com/b.jpg", "https://cdn.example.com/b2.jpg"]}
            </script>
        "#;
        let records = extract_product_blocks(html, PAGE_URL);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].image.as_deref(), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(records[1].image.as_deref(), Some("https://cdn.example.com/b.jpg"));
    }

    #[test]
    fn offers_array_uses_first_offer() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Product", "name": "A", "offers": [{"price": "12.50"}, {"price": "15.00"}]}
            </script>
        "#;
        let records = extract_product_blocks(html, PAGE_URL);
        assert_eq!(records[0].price, Some(12.5));
    }

    #[test]
    fn malformed_jsonld_block_is_skipped() {
        let html = r#"
            <script type="application/ld+json">{not json</script>
            <script type="application/ld+json">{"@type": "Product", "name": "Survivor"}</script>
        "#;
        let records = extract_product_blocks(html, PAGE_URL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Survivor"));
    }
}
