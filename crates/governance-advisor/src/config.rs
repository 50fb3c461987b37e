use crate::error::AppError;

const DEFAULT_CATALOG_PATH: &str = "data/vendors.json";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Server configuration loaded from environment variables.
///
/// Redis URL is optional; if absent, the server runs without the assessment
/// cache and usage counters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the vendor catalog JSON file.
    pub catalog_path: String,
    /// Default chat model for assessments (callers may override per call).
    pub default_model: String,
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379"). `None` disables caching.
    pub redis_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `VENDOR_CATALOG_PATH`: catalog file (default: `data/vendors.json`)
    /// - `GOVERNANCE_MODEL`: default assessment model (default: `gpt-4o-mini`)
    /// - `REDIS_URL`: Redis connection string (omit to disable caching)
    pub fn from_env() -> Result<Self, AppError> {
        let catalog_path = std::env::var("VENDOR_CATALOG_PATH")
            .unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());

        if !std::path::Path::new(&catalog_path).exists() {
            return Err(AppError::Config(format!(
                "vendor catalog not found at {catalog_path} (set VENDOR_CATALOG_PATH)"
            )));
        }

        let default_model = std::env::var("GOVERNANCE_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let redis_url = std::env::var("REDIS_URL").ok();

        Ok(Self {
            catalog_path,
            default_model,
            redis_url,
        })
    }

    pub fn catalog_file_path(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.catalog_path)
    }
}
