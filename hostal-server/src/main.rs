use hostal_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first: configuration is strict and refuses to start
    // without DATA_DIR and JWT_SECRET.
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    init_logger_with_file(None, config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Hostal admin server starting"
    );

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
