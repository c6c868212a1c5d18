use winetime_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    winetime_api::init_tracing();

    let config = AppConfig::from_env();
    tracing::info!("Starting Winetime API in {:?} mode", config.environment);

    winetime_api::app::serve(config).await
}
