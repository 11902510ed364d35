mod app;
mod form_context;
mod page;

use anyhow::{Context, Result};
use login_form::{Config, LoginSchema};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });
    let config = config.apply_env_overrides()?;

    info!(
        username_min_length = config.schema.username_min_length,
        password_min_length = config.schema.password_min_length,
        allowed_domain = %config.schema.allowed_domain,
        "login schema configured"
    );

    let state = app::AppState::new(LoginSchema::new(&config.schema));
    let app = app::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
