use toque_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_environment()?;

    print_banner();

    tracing::info!("Toque Server starting...");

    let config = Config::from_env();

    let state = ServerState::initialize(&config).await?;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
