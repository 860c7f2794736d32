use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::handlers::{handle_find, handle_root, RelayState};
use super::{GuardedInferenceService, RemoteCallPolicy};
use crate::core::interfaces::adapters::LookalikeInferenceService;
use crate::core::models::RelaySettings;
use crate::global_constants::{LOG_TAG_RELAY, RELAY_FIND_PATH, RELAY_LEGACY_FIND_PATH};

pub fn build_router(
    inference_service: Arc<dyn LookalikeInferenceService>,
    settings: &RelaySettings,
) -> Result<Router> {
    let policy = RemoteCallPolicy::from_settings(settings);
    log::debug!("{} remote call policy: {:?}", LOG_TAG_RELAY, policy);

    let state = RelayState {
        inference_service: Arc::new(GuardedInferenceService::new(inference_service, policy)),
    };

    let router = Router::new()
        .route("/", get(handle_root))
        .route(RELAY_FIND_PATH, post(handle_find))
        .route(RELAY_LEGACY_FIND_PATH, post(handle_find))
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(build_cors_layer(&settings.allowed_origin)?)
        .with_state(state);

    Ok(router)
}

/// `*` allows any origin; otherwise a comma-separated list of exact origins.
fn build_cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let allow_origin = if allowed_origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let origins = allowed_origin
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid allowed origin '{}'", origin))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}

pub async fn run(
    inference_service: Arc<dyn LookalikeInferenceService>,
    settings: &RelaySettings,
) -> Result<()> {
    let router = build_router(inference_service, settings)?;

    let listener = tokio::net::TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("Failed to bind relay to {}", settings.bind_address))?;

    log::info!(
        "{} relay is running on http://{}",
        LOG_TAG_RELAY,
        listener.local_addr()?
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("Relay server stopped unexpectedly")?;

    log::info!("{} relay stopped", LOG_TAG_RELAY);
    Ok(())
}

async fn wait_for_shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("{} failed to listen for Ctrl+C: {}", LOG_TAG_RELAY, error);
        std::future::pending::<()>().await;
    }
    log::info!("{} shutdown requested", LOG_TAG_RELAY);
}
