use thiserror::Error;

/// Failure taxonomy for a single acquisition strategy.
///
/// Every variant is handled identically by the strategy ladder: the failing
/// strategy is logged and the next one is tried. Nothing here escapes the
/// top-level [`crate::acquire_catalog`] call.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{strategy} strategy exceeded its {deadline_secs}s deadline")]
    DeadlineExpired {
        strategy: &'static str,
        deadline_secs: u64,
    },
}
