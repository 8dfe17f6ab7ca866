pub mod handlers;
pub mod router;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use crate::errors::NewsTagResult;

pub use router::create_router;
pub use state::AppState;

pub async fn run_server(addr: SocketAddr, state: AppState) -> NewsTagResult<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
}
