// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod interpret;
pub mod matcher;
pub mod measures;
pub mod options;
pub mod remedies;
pub mod render;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::config::AppConfig;
pub use crate::dataset::{CropField, CropRecord, CropStore};
pub use crate::error::CropError;
pub use crate::interpret::{interpret, Intent, Interpretation, Selection, StructuredFilters};
pub use crate::matcher::{find_recommendations, FilterCriteria, RecommendationResult};
pub use crate::measures::split_measures;
pub use crate::options::list_options;
pub use crate::remedies::ClimateCondition;
pub use crate::render::{render_chart, render_chat, render_climate, ChartData};
