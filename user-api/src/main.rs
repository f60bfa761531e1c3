use user_api::core::{Config, Result, Server};
use user_api::setup_environment;

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Starting User API"
    );

    Server::new(config).run().await
}
