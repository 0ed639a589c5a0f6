use std::any::Any;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use shuttle_axum::axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, warn};

use crate::config::AppConfig;
use crate::dataset::CropStore;
use crate::error::CropError;
use crate::interpret::{interpret, InterpretDefaults, Intent, Selection, StructuredFilters};
use crate::matcher::{find_recommendations, FilterCriteria};
use crate::options::list_options_by_key;
use crate::render::{render_chart_top, render_chat_with, render_climate, ChatLimits, ClimateLimits};

/// Shared, read-only state. The store is loaded once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CropStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: CropStore, config: AppConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Load config (env + file) and the dataset it points at.
    pub fn from_env() -> Result<Self, CropError> {
        let config = AppConfig::load_default()?;
        let store = CropStore::load(&config.dataset_path);
        Ok(Self::new(store, config))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/options", get(get_options))
        .route("/api/chat", post(chat))
        .route("/api/recommendations", get(get_recommendations))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Same router as [`create_router`].
pub fn router(state: AppState) -> Router {
    create_router(state)
}

#[derive(Deserialize)]
struct OptionsQuery {
    #[serde(rename = "type", default)]
    kind: String,
}

async fn get_options(
    State(state): State<AppState>,
    Query(q): Query<OptionsQuery>,
) -> Result<Json<Value>, CropError> {
    let options = list_options_by_key(&state.store, &q.kind)?;
    Ok(Json(json!({ "status": "success", "options": options })))
}

#[derive(Debug, Default, Deserialize)]
struct ChatReq {
    #[serde(default)]
    message: String,
    #[serde(default)]
    filters: StructuredFilters,
}

async fn chat(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let req: ChatReq = if body.is_empty() {
        ChatReq::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!(error = %e, "malformed chat body; treating as empty message");
            ChatReq::default()
        })
    };
    debug!(message = %req.message, filters = ?req.filters, "chat request");

    let cfg = state.config.as_ref();
    let parsed = interpret(&req.message, &req.filters, &InterpretDefaults::from(cfg));
    let results = find_recommendations(&state.store, &parsed.criteria);

    let response = match parsed.intent {
        Intent::Climate(condition) => {
            render_climate(condition, &results, &state.store, ClimateLimits::from(cfg))
        }
        Intent::Recommend => {
            render_chat_with(&results, parsed.criteria.land_size, ChatLimits::from(cfg))
        }
    };

    Json(json!({ "status": "success", "response": response }))
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationsQuery {
    soil: Option<String>,
    month: Option<String>,
    season: Option<String>,
    land_type: Option<String>,
    land_size: Option<String>,
}

impl RecommendationsQuery {
    fn into_criteria(self, cfg: &AppConfig) -> FilterCriteria {
        let land_size = self
            .land_size
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(cfg.default_land_size);

        FilterCriteria {
            soil_type: non_blank(self.soil),
            month: non_blank(self.month),
            season: non_blank(self.season),
            land_type: Selection::from_raw(self.land_type.map(Some))
                .resolve(&cfg.default_land_type),
            land_size,
        }
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(q): Query<RecommendationsQuery>,
) -> Json<Value> {
    let criteria = q.into_criteria(&state.config);
    let results = find_recommendations(&state.store, &criteria);
    let chart = render_chart_top(&results, state.config.chart_top_n);
    Json(json!({ "status": "success", "data": chart }))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%detail, "unhandled failure while processing request");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error", "message": format!("An error occurred: {detail}") })),
    )
        .into_response()
}
