use tokio::net::TcpListener;
use todo_server::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let listener = TcpListener::bind(config.address()).await?;
    tracing::info!("Server is running on http://{}", listener.local_addr()?);

    todo_server::serve(listener, todo_server::shutdown_signal()).await?;
    Ok(())
}
