use std::sync::Arc;

use employee_directory_api::database::store::PgEmployeeStore;
use employee_directory_api::{app, config, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL and friends.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting employee directory API in {:?} mode", config.environment);

    // A partially configured instance must never serve traffic: any store
    // failure here ends the process before the listener binds.
    let store = match PgEmployeeStore::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to initialize employee store: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        store: Arc::new(store),
    };
    let app = app(state, &config.security);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Employee directory API listening on http://{}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
