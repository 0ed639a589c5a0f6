// src/config.rs
//! Runtime configuration, read once at startup.
//!
//! Lookup order:
//! 1) $CROP_CONFIG_PATH (must exist)
//! 2) config/crop_advisor.toml
//! 3) built-in defaults
//!
//! `$CROP_DATASET_PATH` overrides `dataset_path` in every case.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CropError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/crop_advisor.toml";
pub const DEFAULT_DATASET_PATH: &str = "data/crops.json";

pub const ENV_CONFIG_PATH: &str = "CROP_CONFIG_PATH";
pub const ENV_DATASET_PATH: &str = "CROP_DATASET_PATH";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub default_land_type: String,
    pub default_land_size: f64,
    /// Result blocks shown in a chat reply.
    pub chat_max_results: usize,
    /// Drought/flood bullets per chat block.
    pub chat_max_measures: usize,
    pub chart_top_n: usize,
    /// Dataset records scanned for general climate advice.
    pub climate_sample_limit: usize,
    pub climate_max_general: usize,
    pub climate_max_specific: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            default_land_type: "Dry Land".to_string(),
            default_land_size: 1.0,
            chat_max_results: 5,
            chat_max_measures: 3,
            chart_top_n: 8,
            climate_sample_limit: 20,
            climate_max_general: 5,
            climate_max_specific: 7,
        }
    }
}

impl AppConfig {
    /// Parse a TOML file. Missing keys keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: AppConfig = toml::from_str(&raw)
            .map_err(|e| CropError::Config(format!("{}: {e}", path.display())))?;
        cfg.validated()
    }

    /// Resolve the config via env var and fallbacks, then apply env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    return Err(CropError::Config(format!(
                        "{ENV_CONFIG_PATH} points to non-existent path {}",
                        pb.display()
                    )));
                }
                Self::load_from(&pb)?
            }
            Err(_) => {
                let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
                if pb.exists() {
                    Self::load_from(&pb)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(p) = std::env::var(ENV_DATASET_PATH) {
            if !p.trim().is_empty() {
                cfg.dataset_path = PathBuf::from(p.trim());
            }
        }
        Ok(cfg)
    }

    fn validated(self) -> Result<Self> {
        if !self.default_land_size.is_finite() || self.default_land_size <= 0.0 {
            return Err(CropError::Config(format!(
                "default_land_size must be positive, got {}",
                self.default_land_size
            )));
        }
        if self.chart_top_n == 0 {
            return Err(CropError::Config("chart_top_n must be at least 1".into()));
        }
        Ok(self)
    }
}
