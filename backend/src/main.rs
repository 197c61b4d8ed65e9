use backend::{build_app, config::AppConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    info!(
        "🚀 Starting rating board: {} players, ledger at {}, port {}",
        config.roster.len(),
        config.ledger_path.display(),
        config.port
    );

    let rocket = build_app(config)?;
    rocket.launch().await?;
    Ok(())
}
