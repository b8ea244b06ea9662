use clap::Parser;
use tracing_subscriber::EnvFilter;

use shortkey::config::KeygenConfig;
use shortkey::server;

/// Key allocation service.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Reverts all database migrations, re-applies them, then exits.
    #[arg(long)]
    refresh_database: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = KeygenConfig::from_env()?;
    config.validate()?;

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    server::run_keygen(config, cli.refresh_database).await
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
