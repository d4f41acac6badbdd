use serde::{Deserialize, Serialize};

/// A catalog product in its canonical shape, independent of which
/// acquisition strategy produced it.
///
/// Every instance emitted by the pipeline satisfies two invariants:
/// `title` is non-empty, and `url` is an absolute URL on the storefront
/// origin. Products are rebuilt from scratch on every pipeline run and
/// never persisted or mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier: the source's native ID when available, else the
    /// URL-path handle, else the title. Never empty.
    pub id: String,
    /// Display name. Records without one are dropped before this type is
    /// ever constructed.
    pub title: String,
    /// Absolute product-page URL on the storefront origin, e.g.
    /// `"https://shop.example.com/products/cedar-candle"`.
    pub url: String,
    /// Absolute URL of a representative image, if one could be resolved.
    pub image: Option<String>,
    /// Price in major currency units (dollars, not cents).
    pub price: Option<f64>,
    /// Source URL slug, e.g. `"cedar-candle"`, kept for traceability.
    pub handle: Option<String>,
}
