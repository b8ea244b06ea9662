use clap::Parser;
use tracing_subscriber::EnvFilter;

use shortkey::config::ShortenerConfig;
use shortkey::server;

/// URL shortener service.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Deletes and recreates the Elasticsearch index, then exits.
    #[arg(long)]
    refresh_index: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ShortenerConfig::from_env()?;
    config.validate()?;

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    server::run_shortener(config, cli.refresh_index).await
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
