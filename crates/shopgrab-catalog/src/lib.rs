//! Resilient product-catalog acquisition pipeline.
//!
//! Retrieves a merchant's product listing from a storefront that exposes no
//! guaranteed API, using a ladder of independent strategies of decreasing
//! reliability (`products.json` endpoints, sitemap + structured data, loose
//! HTML scanning), normalizes every strategy's output into the canonical
//! [`shopgrab_core::Product`] shape, deduplicates by URL, and falls back to
//! a bundled static dataset when every live strategy fails. The top-level
//! operation, [`acquire_catalog`], never returns an error.

pub mod client;
mod dedupe;
pub mod error;
mod fallback;
mod normalize;
mod origin;
mod strategies;
mod types;

pub use client::CatalogClient;
pub use dedupe::dedupe_by_url;
pub use error::CatalogError;
pub use fallback::fallback_products;
pub use normalize::normalize_record;
pub use origin::extract_store_origin;
pub use strategies::{acquire_catalog, fetch_catalog};
pub use types::RawRecord;
