use anyhow::Context;
use coordsim::{api, config::Config};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        eprintln!("Server error: {:#}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(
        max_leverage = config.max_leverage,
        fee_rate = %config.fee_rate,
        history_limit = config.history_limit,
        direction_window = config.direction_window,
        "session configured"
    );

    let app = api::create_router(api::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("server stopped")?;
    Ok(())
}
