use std::net::SocketAddr;

use edu_triad::bootstrap::{initialize_admin_user, seed_rubric_catalog};
use edu_triad::static_service::get_database_connection;
use edu_triad::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};
use tokio::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    fs::create_dir_all(&APP_CONFIG.upload_dir).await?;

    let db_connection = get_database_connection().await;

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(db_connection).await {
        tracing::error!("Failed to initialize admin user: {}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    tracing::info!("Checking rubric catalog...");
    if let Err(e) = seed_rubric_catalog(db_connection).await {
        tracing::error!("Failed to seed rubric catalog: {}", e);
        tracing::warn!("Continuing without rubric catalog seed...");
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
