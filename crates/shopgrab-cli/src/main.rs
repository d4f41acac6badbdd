use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "shopgrab")]
#[command(about = "Acquire a storefront's product catalog and print it as JSON")]
struct Cli {
    /// Storefront URL to acquire the catalog from.
    #[arg(long, env = "SHOPGRAB_SHOP_URL")]
    shop_url: String,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = shopgrab_core::load_catalog_config_with_shop_url(&cli.shop_url)?;
    init_tracing(&config.log_level);

    let products = shopgrab_catalog::acquire_catalog(&config).await;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&products)?
    } else {
        serde_json::to_string(&products)?
    };
    println!("{output}");

    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_owned()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
