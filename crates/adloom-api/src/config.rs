//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

use adloom_storage::DEFAULT_CACHE_FILE;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Base URL of the video understanding service
    pub graphon_api_url: String,
    /// Base URL of the video generation service
    pub gemini_api_url: String,
    /// Directory holding the source videos
    pub videos_dir: PathBuf,
    /// Path of the JSON cache file
    pub cache_file: PathBuf,
    /// Model for ad-hoc video generation and the merge stage
    pub veo_model: String,
    /// Model for scene cut detection
    pub cuts_model: String,
    /// Model for per-snippet branding
    pub branding_model: String,
    /// File processing poll attempts
    pub file_poll_attempts: u32,
    /// File processing poll interval
    pub file_poll_interval: Duration,
    /// Group build poll attempts
    pub group_poll_attempts: u32,
    /// Group build poll interval
    pub group_poll_interval: Duration,
    /// Generation operation poll attempts
    pub operation_poll_attempts: u32,
    /// Generation operation poll interval
    pub operation_poll_interval: Duration,
    /// Max request body size in bytes
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            graphon_api_url: "https://api.graphon.ai/v1".to_string(),
            gemini_api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            videos_dir: PathBuf::from("videos"),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            veo_model: "veo-3.1-generate-preview".to_string(),
            cuts_model: "gemini-3.0-flash-preview".to_string(),
            branding_model: "nano-banana-pro-preview".to_string(),
            file_poll_attempts: 60,
            file_poll_interval: Duration::from_millis(2000),
            group_poll_attempts: 120,
            group_poll_interval: Duration::from_millis(5000),
            operation_poll_attempts: 120,
            operation_poll_interval: Duration::from_millis(5000),
            max_body_size: 10 * 1024 * 1024, // 10MB
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            graphon_api_url: std::env::var("GRAPHON_API_URL").unwrap_or(defaults.graphon_api_url),
            gemini_api_url: std::env::var("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),
            videos_dir: std::env::var("VIDEOS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.videos_dir),
            cache_file: std::env::var("CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_file),
            veo_model: std::env::var("VEO_MODEL").unwrap_or(defaults.veo_model),
            cuts_model: std::env::var("CUTS_MODEL").unwrap_or(defaults.cuts_model),
            branding_model: std::env::var("BRANDING_MODEL").unwrap_or(defaults.branding_model),
            file_poll_attempts: env_u32("FILE_POLL_ATTEMPTS", defaults.file_poll_attempts),
            file_poll_interval: env_interval("FILE_POLL_INTERVAL_MS", defaults.file_poll_interval),
            group_poll_attempts: env_u32("GROUP_POLL_ATTEMPTS", defaults.group_poll_attempts),
            group_poll_interval: env_interval(
                "GROUP_POLL_INTERVAL_MS",
                defaults.group_poll_interval,
            ),
            operation_poll_attempts: env_u32(
                "OPERATION_POLL_ATTEMPTS",
                defaults.operation_poll_attempts,
            ),
            operation_poll_interval: env_interval(
                "OPERATION_POLL_INTERVAL_MS",
                defaults.operation_poll_interval,
            ),
            max_body_size: std::env::var("MAX_BODY_MB")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

fn env_u32(var: &str, default: u32) -> u32 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_interval(var: &str, default: Duration) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}
