use filehub_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (stores, state, routes)
    let (_state, router) = filehub_api::setup::initialize_app(config.clone())?;

    // Start the server
    filehub_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
