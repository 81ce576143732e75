use crm_graphql::config::load_config;
use crm_graphql::infrastructure::logger::Logger;
use crm_graphql::infrastructure::Repositories;
use crm_graphql::server::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    // 初始化日志，guard 需保持到进程退出
    let _log_guard = Logger::init(&config.logging)?;

    info!("Starting CRM GraphQL server...");

    let repos = Repositories::connect(&config.storage).await.map_err(|e| {
        error!("Failed to initialize storage: {}", e);
        e
    })?;

    let app = create_router(AppState::new(&repos));

    let listener = TcpListener::bind(config.socket_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 CRM GraphQL server running on http://{}", addr);
    info!("📊 Available endpoints:");
    info!("   POST   /graphql   - GraphQL mutations");
    info!("   GET    /graphql   - GraphQL playground");
    info!("   GET    /health    - Health check ({} storage)", repos.health.backend());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
