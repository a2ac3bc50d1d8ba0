use anyhow::Result;
use portfolio_backend::config::Config;
use portfolio_backend::lifecycle::setup_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    setup_tracing(config.log_format);

    tracing::info!(
        prefix = %config.api_prefix,
        accounts = config.accounts.len(),
        technologies = config.expose_technologies,
        "Loaded configuration"
    );
    portfolio_backend::api::serve(config).await
}
