use produkty_api::{app, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET and DATABASE_URL.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // A missing JWT secret aborts startup here, before anything listens.
    let config = AppConfig::from_env()?;
    let pool = database::connect(&config.database).await?;

    let port = config.server.port;
    let state = AppState::new(pool, config)?;

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{bind_addr}");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
