use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime configuration for the catalog acquisition pipeline.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Storefront URL the catalog is acquired from. Only the scheme+host
    /// origin is used; a configured collection path is ignored.
    pub shop_url: String,
    /// Per-request timeout applied to every outbound fetch.
    pub request_timeout_secs: u64,
    /// `User-Agent` sent on every outbound fetch.
    pub user_agent: String,
    /// Worker-pool width for per-page fetches inside the sitemap strategy.
    /// `1` restores strictly sequential page fetching.
    pub page_concurrency: usize,
    /// Wall-clock budget for the whole sitemap strategy. On expiry the
    /// strategy is treated as failed and the ladder falls through.
    pub sitemap_deadline_secs: u64,
    pub log_level: String,
}

/// Load pipeline configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_catalog_config() -> Result<CatalogConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_catalog_config_from_env()
}

/// Load pipeline configuration from environment variables already in the
/// process.
///
/// Unlike [`load_catalog_config`], this does NOT load `.env` files — useful
/// for testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_catalog_config_from_env() -> Result<CatalogConfig, ConfigError> {
    build_catalog_config(|key| std::env::var(key))
}

/// Load pipeline configuration with an explicit shop URL, taking every
/// other knob from the environment. Used by the CLI's `--shop-url` flag.
///
/// # Errors
///
/// Returns `ConfigError` if the shop URL or any env var value is invalid.
pub fn load_catalog_config_with_shop_url(shop_url: &str) -> Result<CatalogConfig, ConfigError> {
    build_catalog_config(|key| {
        if key == "SHOPGRAB_SHOP_URL" {
            Ok(shop_url.to_string())
        } else {
            std::env::var(key)
        }
    })
}

/// Build pipeline configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_catalog_config<F>(lookup: F) -> Result<CatalogConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let shop_url = require("SHOPGRAB_SHOP_URL")?;
    if !shop_url.starts_with("http://") && !shop_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPGRAB_SHOP_URL".to_string(),
            reason: format!("\"{shop_url}\" is not an http(s) URL"),
        });
    }

    let request_timeout_secs = parse_u64("SHOPGRAB_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("SHOPGRAB_USER_AGENT", "shopgrab/0.1 (catalog-sync)");
    let page_concurrency = parse_usize("SHOPGRAB_PAGE_CONCURRENCY", "8")?;
    let sitemap_deadline_secs = parse_u64("SHOPGRAB_SITEMAP_DEADLINE_SECS", "45")?;
    let log_level = or_default("SHOPGRAB_LOG_LEVEL", "info");

    if page_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPGRAB_PAGE_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(CatalogConfig {
        shop_url,
        request_timeout_secs,
        user_agent,
        page_concurrency,
        sitemap_deadline_secs,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
