// src/main.rs

use std::net::SocketAddr;

use trivia_backend::{
    bootstrap::{connect_and_migrate, init_tracing},
    config::Config,
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env included)
    let config = Config::from_env();

    let _guard = init_tracing(&config, "app.log", std::io::stdout);

    let pool = connect_and_migrate(&config).await?;

    let state = AppState::new(pool, config.clone());

    // Create the Axum application router
    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
