#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::JwtKeys;
use crate::config::Config;
use crate::config::env_var_or_else;
use crate::service::AliasService;
use crate::storage::Storage;
use crate::storage::setup;

mod accounts;
mod aliases;
mod api;
mod codes;
mod config;
mod graceful_shutdown;
mod password;
mod redirect;
mod service;
mod storage;
#[cfg(test)]
mod tests;

const DEFAULT_RUST_LOG: &str = "curtail=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:7000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app().await?;

    let address = setup_address()?;
    tracing::info!("Listening on {}", address);

    let listener = TcpListener::bind(address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if any of its dependencies fail to load:
/// - Database connection
/// - Configuration
pub async fn setup_app() -> Result<Router> {
    let storage = setup().await;
    let config = Config::from_env()?;
    let jwt_keys = setup_jwt_keys();

    Ok(create_router(storage, config, jwt_keys))
}

/// Create the router for Curtail
fn create_router<S: Storage>(storage: S, config: Config, jwt_keys: JwtKeys) -> Router {
    let service = AliasService::new(storage.clone(), config.base_url.clone());

    Router::new()
        .nest("/api", api::router::<S>())
        .route("/r/{code}", get(redirect::redirect::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
        .layer(Extension(service))
        .layer(Extension(jwt_keys))
        .layer(Extension(config))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_jwt_keys() -> JwtKeys {
    use crate::password::generate_secret;

    let jwt_secret = env_var_or_else("JWT_SECRET", || {
        let jwt_secret = generate_secret();
        tracing::info!("`JWT_SECRET` is not set, generating temporary one: {jwt_secret}");
        jwt_secret
    });

    JwtKeys::new(jwt_secret.as_bytes())
}

fn setup_address() -> Result<std::net::SocketAddr> {
    let mut address = env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS))
        .parse::<std::net::SocketAddr>()?;

    // optional override of just the port
    if let Ok(port) = std::env::var("PORT") {
        // only check non-empty strings
        if !port.is_empty() {
            let port = port.parse::<u16>()?;

            address.set_port(port);
        }
    }

    Ok(address)
}
