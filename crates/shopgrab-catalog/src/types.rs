//! Wire types for the storefront's JSON catalog endpoints, plus the
//! strategy-agnostic raw candidate record.
//!
//! ## Observed shapes from live storefronts
//!
//! The catalog document is usually `{"products": [...]}` but some proxies
//! strip the wrapper and return a bare array; [`CatalogDocument`] accepts
//! both. Within an entry, almost every field is optional in the wild:
//! `id` may be a number or a string, the image may live at `image.src`,
//! `images[0].src`, or a flat `featured_image` string, and the price may be
//! a flat `price` number, a `price_min`, or the first variant's `price`
//! string. Loose fields are modeled as `serde_json::Value` and converted by
//! the helpers at the bottom of this module.

use serde::Deserialize;

/// A catalog document: wrapped (`{"products": [...]}`) or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    Wrapped { products: Vec<CatalogEntry> },
    Bare(Vec<CatalogEntry>),
}

impl CatalogDocument {
    pub fn into_entries(self) -> Vec<CatalogEntry> {
        match self {
            CatalogDocument::Wrapped { products } | CatalogDocument::Bare(products) => products,
        }
    }
}

/// A single entry from a JSON catalog document. Every field is optional;
/// shape validation happens during normalization, not deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogEntry {
    /// Numeric or string product ID.
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    /// URL slug for the product page.
    #[serde(default)]
    pub handle: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// Entry's own URL-like field; used only when `handle` is absent.
    #[serde(default)]
    pub url: Option<String>,

    /// Primary image object.
    #[serde(default)]
    pub image: Option<EntryImage>,

    /// Full image gallery.
    #[serde(default)]
    pub images: Vec<EntryImage>,

    /// Flat image URL used by some storefront themes instead of `image`.
    #[serde(default)]
    pub featured_image: Option<String>,

    /// Flat price; number or string depending on the endpoint.
    #[serde(default)]
    pub price: Option<serde_json::Value>,

    /// Lowest variant price, present on collection endpoints.
    #[serde(default)]
    pub price_min: Option<serde_json::Value>,

    #[serde(default)]
    pub variants: Vec<EntryVariant>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryImage {
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryVariant {
    #[serde(default)]
    pub price: Option<serde_json::Value>,
}

impl CatalogEntry {
    /// Flattens the entry's competing field shapes into a [`RawRecord`].
    pub fn into_raw(self, source: &'static str) -> RawRecord {
        let image = self
            .image
            .and_then(|i| i.src)
            .or_else(|| self.images.into_iter().find_map(|i| i.src))
            .or(self.featured_image);

        let price = self
            .price
            .as_ref()
            .and_then(value_to_f64)
            .or_else(|| self.price_min.as_ref().and_then(value_to_f64))
            .or_else(|| {
                self.variants
                    .first()
                    .and_then(|v| v.price.as_ref())
                    .and_then(value_to_f64)
            });

        RawRecord {
            id: self.id.as_ref().and_then(value_to_string),
            handle: self.handle,
            title: self.title,
            url: self.url,
            image,
            price,
            source,
        }
    }
}

/// A candidate product record as produced by one of the acquisition
/// strategies, before normalization. Any field may be missing; the
/// normalizer decides what survives.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub id: Option<String>,
    pub handle: Option<String>,
    pub title: Option<String>,
    /// Absolute or root-relative product-page URL, if the strategy had one.
    pub url: Option<String>,
    pub image: Option<String>,
    /// Price exactly as the source reported it; unit normalization happens
    /// in the normalizer.
    pub price: Option<f64>,
    /// Which strategy produced this record: `"json"`, `"sitemap"`,
    /// `"html"`, or `"fallback"`. Surfaced in logs only.
    pub source: &'static str,
}

/// Converts a loosely-typed JSON price field (number or numeric string)
/// to `f64`.
pub(crate) fn value_to_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Converts a loosely-typed JSON ID field (number or string) to a string.
pub(crate) fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_document_parses() {
        let doc: CatalogDocument =
            serde_json::from_str(r#"{"products": [{"title": "Candle"}]}"#).unwrap();
        let entries = doc.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Candle"));
    }

    #[test]
    fn bare_array_document_parses() {
        let doc: CatalogDocument = serde_json::from_str(r#"[{"title": "Candle"}]"#).unwrap();
        assert_eq!(doc.into_entries().len(), 1);
    }

    #[test]
    fn image_resolution_prefers_primary_image() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"image": {"src": "a.jpg"}, "images": [{"src": "b.jpg"}], "featured_image": "c.jpg"}"#,
        )
        .unwrap();
        assert_eq!(entry.into_raw("json").image.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn image_resolution_falls_back_to_gallery_then_featured() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"images": [{"src": "b.jpg"}], "featured_image": "c.jpg"}"#)
                .unwrap();
        assert_eq!(entry.into_raw("json").image.as_deref(), Some("b.jpg"));

        let entry: CatalogEntry =
            serde_json::from_str(r#"{"featured_image": "c.jpg"}"#).unwrap();
        assert_eq!(entry.into_raw("json").image.as_deref(), Some("c.jpg"));
    }

    #[test]
    fn price_resolution_tries_flat_then_min_then_variant() {
        let entry: CatalogEntry = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert_eq!(entry.into_raw("json").price, Some(12.5));

        let entry: CatalogEntry = serde_json::from_str(r#"{"price_min": "9.99"}"#).unwrap();
        assert_eq!(entry.into_raw("json").price, Some(9.99));

        let entry: CatalogEntry =
            serde_json::from_str(r#"{"variants": [{"price": "30.00"}]}"#).unwrap();
        assert_eq!(entry.into_raw("json").price, Some(30.0));
    }

    #[test]
    fn numeric_and_string_ids_both_convert() {
        let entry: CatalogEntry = serde_json::from_str(r#"{"id": 6789012345678}"#).unwrap();
        assert_eq!(entry.into_raw("json").id.as_deref(), Some("6789012345678"));

        let entry: CatalogEntry = serde_json::from_str(r#"{"id": "abc-123"}"#).unwrap();
        assert_eq!(entry.into_raw("json").id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn unparsable_price_string_degrades_to_none() {
        let entry: CatalogEntry = serde_json::from_str(r#"{"price": "call us"}"#).unwrap();
        assert_eq!(entry.into_raw("json").price, None);
    }
}
