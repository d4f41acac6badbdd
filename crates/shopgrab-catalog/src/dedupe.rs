//! URL-keyed deduplication of normalized products.

use std::collections::HashSet;

use shopgrab_core::Product;

/// Filters `products` to the first occurrence of each `url`, preserving
/// input order.
///
/// Only one strategy's output is ever deduplicated per pipeline run, so
/// "first" means first in that strategy's own order.
#[must_use]
pub fn dedupe_by_url(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| seen.insert(p.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, url: &str) -> Product {
        Product {
            id: title.to_owned(),
            title: title.to_owned(),
            url: url.to_owned(),
            image: None,
            price: None,
            handle: None,
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let deduped = dedupe_by_url(vec![
            product("First", "https://shop.example.com/products/a"),
            product("Second", "https://shop.example.com/products/a"),
        ]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].title, "First");
    }

    #[test]
    fn order_is_preserved() {
        let deduped = dedupe_by_url(vec![
            product("A", "https://shop.example.com/products/a"),
            product("B", "https://shop.example.com/products/b"),
            product("A again", "https://shop.example.com/products/a"),
            product("C", "https://shop.example.com/products/c"),
        ]);
        let titles: Vec<_> = deduped.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn distinct_urls_are_untouched() {
        let deduped = dedupe_by_url(vec![
            product("A", "https://shop.example.com/products/a"),
            product("B", "https://shop.example.com/products/b"),
        ]);
        assert_eq!(deduped.len(), 2);
    }
}
