//! URL origin extraction for the configured storefront.

/// Extracts the scheme+host origin from a shop URL.
///
/// Given `"https://shop.example.com/collections/all"`, returns
/// `"https://shop.example.com"`. Every strategy builds its endpoint URLs
/// from this origin, so a configured `shop_url` that points at a collection
/// page still works.
#[must_use]
pub fn extract_store_origin(shop_url: &str) -> String {
    reqwest::Url::parse(shop_url).map_or_else(
        |e| {
            tracing::warn!(
                shop_url,
                error = %e,
                "shop_url is not a parsable URL; deriving the origin from the raw string"
            );
            // Keep scheme://host by cutting the string at the first path segment.
            shop_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_collection_path() {
        assert_eq!(
            extract_store_origin("https://shop.example.com/collections/all"),
            "https://shop.example.com"
        );
    }

    #[test]
    fn bare_origin_passes_through() {
        assert_eq!(
            extract_store_origin("https://shop.example.com"),
            "https://shop.example.com"
        );
    }

    #[test]
    fn keeps_explicit_port() {
        assert_eq!(
            extract_store_origin("http://127.0.0.1:8080/products.json"),
            "http://127.0.0.1:8080"
        );
    }
}
