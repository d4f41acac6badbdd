mod config;
mod products;

pub use config::{
    load_catalog_config, load_catalog_config_from_env, load_catalog_config_with_shop_url,
    CatalogConfig, ConfigError,
};
pub use products::Product;
