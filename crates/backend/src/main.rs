pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use tokio::net::TcpListener;

use crate::shared::app_state::AppState;
use crate::shared::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;
    system::tracing::initialize(&config::get_log_dir(&config))?;

    let state = AppState::from_config(&config)?;
    let app = routes::configure_routes(state);

    let addr = config.bind_addr();
    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: {} is already in use. Please ensure no other process is using this port.",
                    addr
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
