//! # Storefront
//!
//! Static pages plus a Stripe Checkout proxy.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STATIC_DIR=./public
//! export DOMAIN=http://localhost:3000
//! export SECRET_KEY=sk_test_...
//!
//! # Run the server
//! storefront
//! ```

use shop_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Static root: {}", state.static_dir().display());
    info!("Payment provider: {}", state.payments.provider_name());

    // Create router
    let app = routes::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on port: {}", addr.port());
    info!("You may access your app at: {}", state.config.domain);

    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON logs in production, human-readable otherwise
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let production = std::env::var("ENVIRONMENT").is_ok_and(|env| env == "production");

    if production {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
