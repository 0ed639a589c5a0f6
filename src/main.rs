//! Crop advisor service: binary entrypoint.
//! Boots the Axum HTTP server with the dataset loaded once into shared state.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crop_advisor::api::{self, AppState};

/// Compact tracing logs for local development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - CROP_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("CROP_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crop_advisor=info,warn"));

    // The Shuttle runtime may already own the global subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Picks up CROP_CONFIG_PATH / CROP_DATASET_PATH from .env in local runs.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let state = AppState::from_env().context("failed to load crop advisor configuration")?;
    info!(
        records = state.store.len(),
        dataset = %state.config.dataset_path.display(),
        "crop advisor ready"
    );

    let router = api::create_router(state);
    Ok(router.into())
}
